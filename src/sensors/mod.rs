//! Sensor output samples and page 1 sensor configuration
//!
//! Output registers hold little-endian signed 16-bit counts. [`data`] turns
//! them into physical units and [`config`] decodes the raw sensor setup
//! that lives on register page 1.

pub mod config;
pub mod data;

pub use config::{
    AccelBandwidth, AccelConfig, AccelPowerMode, AccelRange, AccelSleepConfig,
    AccelSleepDuration, GyroBandwidth, GyroConfig, GyroPowerConfig, GyroPowerMode, GyroRange,
    MagConfig, MagDataRate, MagOperationMode, MagPowerMode,
};
pub use data::{
    Acceleration, AngularRate, EulerAngles, Gravity, LinearAcceleration, MagneticField,
    Quaternion,
};

/// Decode consecutive little-endian `i16` values from a burst
#[must_use]
pub fn decode_le_i16<const N: usize, const B: usize>(bytes: &[u8; B]) -> [i16; N] {
    let mut out = [0i16; N];
    for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(2)) {
        *value = i16::from_le_bytes([chunk[0], chunk[1]]);
    }
    out
}
