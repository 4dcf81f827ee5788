//! Calibration status, offsets and the persistable calibration block

use crate::CALIB_BYTECOUNT;
use crate::registers::{ACC_OFFSET_X_LSB, SIC_MATRIX_0_LSB};

/// Length of the offset image at `ACC_OFFSET_X_LSB` (0x55..=0x6A)
pub const OFFSETS_BYTECOUNT: usize = 22;

/// Per-subsystem calibration levels from `CALIB_STAT`
///
/// Each level ranges from 0 (uncalibrated) to 3 (fully calibrated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationStatus {
    /// Fusion system level
    pub system: u8,
    /// Gyroscope level
    pub gyroscope: u8,
    /// Accelerometer level
    pub accelerometer: u8,
    /// Magnetometer level
    pub magnetometer: u8,
}

impl CalibrationStatus {
    /// Level reported by a fully calibrated subsystem
    pub const FULLY_CALIBRATED: u8 = 3;

    /// Whether every subsystem reports level 3
    #[must_use]
    pub const fn is_fully_calibrated(&self) -> bool {
        self.system == Self::FULLY_CALIBRATED
            && self.gyroscope == Self::FULLY_CALIBRATED
            && self.accelerometer == Self::FULLY_CALIBRATED
            && self.magnetometer == Self::FULLY_CALIBRATED
    }
}

/// Sensor offsets and radii, decoded from the 22-byte image at 0x55
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationOffsets {
    /// Accelerometer offsets (x, y, z)
    pub accel: [i16; 3],
    /// Magnetometer offsets (x, y, z)
    pub mag: [i16; 3],
    /// Gyroscope offsets (x, y, z)
    pub gyro: [i16; 3],
    /// Accelerometer radius
    pub accel_radius: i16,
    /// Magnetometer radius
    pub mag_radius: i16,
}

impl CalibrationOffsets {
    /// Decode the little-endian offset image
    #[must_use]
    pub fn from_bytes(bytes: &[u8; OFFSETS_BYTECOUNT]) -> Self {
        let word = |i: usize| i16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]]);
        Self {
            accel: [word(0), word(1), word(2)],
            mag: [word(3), word(4), word(5)],
            gyro: [word(6), word(7), word(8)],
            accel_radius: word(9),
            mag_radius: word(10),
        }
    }

    /// Encode back into the register layout
    #[must_use]
    pub fn to_bytes(&self) -> [u8; OFFSETS_BYTECOUNT] {
        let mut out = [0u8; OFFSETS_BYTECOUNT];
        let words = self
            .accel
            .iter()
            .chain(&self.mag)
            .chain(&self.gyro)
            .chain([&self.accel_radius, &self.mag_radius]);
        for (chunk, word) in out.chunks_exact_mut(2).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }
}

/// Raw calibration block, exactly [`CALIB_BYTECOUNT`] bytes starting at 0x43
///
/// The block has no header and no checksum. It is the exact register image
/// the device returns and accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationBlob([u8; CALIB_BYTECOUNT]);

impl CalibrationBlob {
    /// Wrap a register image
    #[must_use]
    pub const fn new(bytes: [u8; CALIB_BYTECOUNT]) -> Self {
        Self(bytes)
    }

    /// The raw bytes, in register order
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CALIB_BYTECOUNT] {
        &self.0
    }

    /// Offsets and radii contained in the tail of the block
    ///
    /// The block ends at 0x64, so the gyroscope Z offset and both radii
    /// are not part of it and come back as zero.
    #[must_use]
    pub fn offsets(&self) -> CalibrationOffsets {
        let start = usize::from(ACC_OFFSET_X_LSB - SIC_MATRIX_0_LSB);
        let mut image = [0u8; OFFSETS_BYTECOUNT];
        let tail = &self.0[start..];
        image[..tail.len()].copy_from_slice(tail);
        CalibrationOffsets::from_bytes(&image)
    }
}

impl From<CalibrationBlob> for [u8; CALIB_BYTECOUNT] {
    fn from(blob: CalibrationBlob) -> Self {
        blob.0
    }
}

/// Rejected calibration data length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlobLengthError(pub usize);

impl TryFrom<&[u8]> for CalibrationBlob {
    type Error = BlobLengthError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; CALIB_BYTECOUNT]>::try_from(bytes)
            .map(Self)
            .map_err(|_| BlobLengthError(bytes.len()))
    }
}

/// One calibration byte that did not read back as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationMismatch {
    /// Register address
    pub register: u8,
    /// Byte written
    pub expected: u8,
    /// Byte read back
    pub actual: u8,
}

/// All mismatches of one calibration write
pub type CalibrationMismatches = heapless::Vec<CalibrationMismatch, CALIB_BYTECOUNT>;

/// Compare a written block with its read-back, starting at `base`
pub(crate) fn compare_blocks(
    base: u8,
    expected: &[u8; CALIB_BYTECOUNT],
    actual: &[u8; CALIB_BYTECOUNT],
) -> CalibrationMismatches {
    let mut mismatches = CalibrationMismatches::new();
    for (offset, (&e, &a)) in (0u8..).zip(expected.iter().zip(actual)) {
        if e != a {
            // Capacity equals the block length, push cannot fail
            let _ = mismatches.push(CalibrationMismatch {
                register: base + offset,
                expected: e,
                actual: a,
            });
        }
    }
    mismatches
}
