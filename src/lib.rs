#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[cfg(feature = "linux")]
extern crate std;

pub mod calibration;
pub mod device;
pub mod info;
pub mod interface;
pub mod mode;
pub mod registers;
pub mod sensors;

#[cfg(feature = "linux")]
pub mod linux;

// Re-export main types
pub use calibration::{
    BlobLengthError, CalibrationBlob, CalibrationMismatch, CalibrationMismatches,
    CalibrationOffsets, CalibrationStatus,
};
pub use device::Bno055Driver;
pub use info::{
    Axis, AxisRemap, AxisRemapRegister, ClockSource, DeviceInfo, Identity, RegisterDump,
    SelfTestResult, SystemError, SystemStatus, Temperature, UnitSelection,
};
pub use interface::I2cInterface;
pub use mode::{OperationMode, PowerMode};
pub use sensors::{
    AccelConfig, Acceleration, AngularRate, EulerAngles, Gravity, GyroConfig, GyroPowerConfig,
    LinearAcceleration, MagConfig, MagneticField, Quaternion,
};

/// BNO055 I2C address when the COM3 pin is low (default: 0x28)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_PRIMARY: u8 = 0x28;

/// BNO055 I2C address when the COM3 pin is high (alternative: 0x29)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_ALTERNATE: u8 = 0x29;

/// Expected value of the `CHIP_ID` register
pub const CHIP_ID_VALUE: u8 = 0xA0;

/// Size of the calibration block starting at `SIC_MATRIX_0_LSB` (0x43)
pub const CALIB_BYTECOUNT: usize = 34;

/// Register page identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    /// Page 0 - Identity, data output, status and mode registers
    Page0 = 0,
    /// Page 1 - Raw sensor configuration
    Page1 = 1,
}

/// Sub-step of a composite operation, carried by [`Error::Io`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Chip ID probe during construction
    Probe,
    /// Writing `PAGE_ID`
    SelectPage,
    /// Reading the current operating mode
    ReadMode,
    /// Forcing CONFIG mode before a change
    EnterConfig,
    /// Writing the requested operating mode
    WriteMode,
    /// Reading the operating mode back
    VerifyMode,
    /// Reading the current power mode
    ReadPower,
    /// Writing the requested power mode
    WritePower,
    /// Writing the original operating mode back
    RestoreMode,
    /// Reading the power mode back
    VerifyPower,
    /// Reading `UNIT_SEL` ahead of a scaled read
    ReadUnits,
    /// Burst read of a sensor output group
    ReadData,
    /// Reading the calibration offset image
    ReadOffsets,
    /// Burst read of the calibration block
    ReadCalibration,
    /// Burst write of the calibration block
    WriteCalibration,
    /// Reading the calibration block back
    VerifyCalibration,
    /// Identity burst at 0x00
    Identity,
    /// Reading `AXIS_MAP_CONFIG`
    RemapConfig,
    /// Reading `AXIS_MAP_SIGN`
    RemapSign,
    /// Reading `SYS_STATUS`
    SystemStatus,
    /// Reading `ST_RESULT`
    SelfTest,
    /// Reading `SYS_ERR`
    SystemError,
    /// Reading `TEMP`
    Temperature,
    /// Reading a page 1 configuration register
    ReadConfig,
    /// Reading a register dump row
    Dump,
    /// Writing `SYS_TRIGGER` for a reset
    Reset,
}

/// Broad error class, for callers that only need to decide how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// The bus could not be opened or the address could not be bound
    Transport,
    /// A register transfer failed
    Io,
    /// A write was not reflected by the read-back
    Verification,
    /// An argument or register value was rejected before or instead of I/O
    Precondition,
}

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Opening the bus or binding the device address failed
    Transport(E),
    /// A register read or write failed
    Io {
        /// First register of the failed transfer
        register: u8,
        /// Sub-step of the composite operation, if any
        step: Option<Step>,
        /// Underlying bus error
        source: E,
    },
    /// Invalid `CHIP_ID` register value (contains the actual value read)
    InvalidDevice(u8),
    /// The address is neither 0x28 nor 0x29
    InvalidAddress(u8),
    /// A register held a code with no defined meaning
    InvalidRegisterValue {
        /// Register address
        register: u8,
        /// Raw value read
        value: u8,
    },
    /// The operating mode read back differs from the one written
    ModeVerification {
        /// Mode that was written
        requested: mode::OperationMode,
        /// Raw mode code read back
        actual: u8,
    },
    /// The power mode read back differs from the one written
    PowerVerification {
        /// Power mode that was written
        requested: mode::PowerMode,
        /// Raw power code read back
        actual: u8,
    },
    /// Calibration bytes read back differ from the ones written
    CalibrationVerification(calibration::CalibrationMismatches),
    /// Calibration data is not exactly [`CALIB_BYTECOUNT`] bytes long
    InvalidBlobLength(usize),
}

impl<E> Error<E> {
    /// Classify the error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Io { .. } => ErrorKind::Io,
            Self::ModeVerification { .. }
            | Self::PowerVerification { .. }
            | Self::CalibrationVerification(_) => ErrorKind::Verification,
            Self::InvalidDevice(_)
            | Self::InvalidAddress(_)
            | Self::InvalidRegisterValue { .. }
            | Self::InvalidBlobLength(_) => ErrorKind::Precondition,
        }
    }

    /// The sub-step a failed transfer belonged to
    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::Io { step, .. } => *step,
            _ => None,
        }
    }

    /// The register a failed transfer or rejected value belonged to
    pub const fn register(&self) -> Option<u8> {
        match self {
            Self::Io { register, .. } | Self::InvalidRegisterValue { register, .. } => {
                Some(*register)
            }
            _ => None,
        }
    }

    /// Attach a step to an untagged I/O error
    ///
    /// An already tagged error keeps its step, so the innermost attribution wins.
    #[must_use]
    pub fn in_step(self, step: Step) -> Self {
        match self {
            Self::Io {
                register,
                step: None,
                source,
            } => Self::Io {
                register,
                step: Some(step),
                source,
            },
            other => other,
        }
    }
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Transport(error)
    }
}

/// Wrap a bus error from a transfer starting at `register`
pub(crate) fn io<E>(register: u8) -> impl FnOnce(E) -> Error<E> {
    move |source| Error::Io {
        register,
        step: None,
        source,
    }
}
