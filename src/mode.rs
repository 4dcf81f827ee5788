//! Operating and power modes
//!
//! The BNO055 accepts configuration writes only in [`OperationMode::Config`].
//! Every switch between two non-CONFIG modes has to pass through CONFIG, and
//! each transition needs a settle time before the device answers reliably.

/// Settle time after switching into CONFIG mode (ms)
pub const CONFIG_ENTRY_SETTLE_MS: u32 = 10;

/// Settle time after switching from CONFIG into any other mode (ms)
pub const CONFIG_EXIT_SETTLE_MS: u32 = 25;

/// Settle time around each step of a power mode change (ms)
pub const POWER_SETTLE_MS: u32 = 30;

/// Settle time after forcing CONFIG ahead of a calibration write (ms)
pub const CALIBRATION_LOAD_SETTLE_MS: u32 = 50;

/// Time for the fusion engine to pick up restored calibration (ms)
pub const FUSION_RECONVERGE_MS: u32 = 650;

/// Time for the device to boot after a system reset (ms)
pub const BOOT_TIME_MS: u32 = 650;

/// Settle time after a page switch during a register dump (ms)
pub const PAGE_SWITCH_SETTLE_MS: u32 = 50;

/// Operating mode (`OPR_MODE`, low 4 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Configuration mode, all outputs reset to zero
    Config = 0x00,
    /// Accelerometer only
    AccOnly = 0x01,
    /// Magnetometer only
    MagOnly = 0x02,
    /// Gyroscope only
    GyroOnly = 0x03,
    /// Accelerometer and magnetometer
    AccMag = 0x04,
    /// Accelerometer and gyroscope
    AccGyro = 0x05,
    /// Magnetometer and gyroscope
    MagGyro = 0x06,
    /// All three sensors, no fusion
    Amg = 0x07,
    /// Relative orientation from accelerometer and gyroscope
    Imu = 0x08,
    /// Tilt-compensated heading from accelerometer and magnetometer
    Compass = 0x09,
    /// Magnet-for-gyroscope, relative orientation without a gyroscope
    M4g = 0x0A,
    /// Nine degrees of freedom with fast magnetometer calibration off
    NdofFmcOff = 0x0B,
    /// Nine degrees of freedom absolute orientation
    Ndof = 0x0C,
}

impl OperationMode {
    /// Raw register code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a raw register code
    ///
    /// Only the low 4 bits are significant. Codes 0x0D-0x0F are undefined.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code & 0x0F {
            0x00 => Self::Config,
            0x01 => Self::AccOnly,
            0x02 => Self::MagOnly,
            0x03 => Self::GyroOnly,
            0x04 => Self::AccMag,
            0x05 => Self::AccGyro,
            0x06 => Self::MagGyro,
            0x07 => Self::Amg,
            0x08 => Self::Imu,
            0x09 => Self::Compass,
            0x0A => Self::M4g,
            0x0B => Self::NdofFmcOff,
            0x0C => Self::Ndof,
            _ => return None,
        })
    }

    /// Whether this is CONFIG mode
    #[must_use]
    pub const fn is_config(self) -> bool {
        matches!(self, Self::Config)
    }

    /// Whether the on-chip fusion engine runs in this mode
    #[must_use]
    pub const fn is_fusion(self) -> bool {
        matches!(
            self,
            Self::Imu | Self::Compass | Self::M4g | Self::NdofFmcOff | Self::Ndof
        )
    }

    /// Settle time after writing this mode as the transition target
    #[must_use]
    pub const fn settle_ms(self) -> u32 {
        if self.is_config() {
            CONFIG_ENTRY_SETTLE_MS
        } else {
            CONFIG_EXIT_SETTLE_MS
        }
    }
}

/// Power mode (`PWR_MODE`, low 2 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// All selected sensors always on
    #[default]
    Normal = 0x00,
    /// Sensors sleep until motion is detected
    Low = 0x01,
    /// Sensors and MCU suspended
    Suspend = 0x02,
}

impl PowerMode {
    /// Raw register code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a raw register code (low 2 bits, 3 is undefined)
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code & 0x03 {
            0x00 => Some(Self::Normal),
            0x01 => Some(Self::Low),
            0x02 => Some(Self::Suspend),
            _ => None,
        }
    }
}
