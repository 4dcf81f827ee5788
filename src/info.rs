//! Device identity, status and configuration snapshots

use crate::mode::{OperationMode, PowerMode};

/// Identity block at 0x00..=0x06
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    /// `CHIP_ID`, 0xA0
    pub chip_id: u8,
    /// Accelerometer ID, 0xFB
    pub accel_id: u8,
    /// Magnetometer ID, 0x32
    pub mag_id: u8,
    /// Gyroscope ID, 0x0F
    pub gyro_id: u8,
    /// Firmware revision (MSB << 8 | LSB)
    pub sw_revision: u16,
    /// Bootloader revision
    pub bootloader_revision: u8,
}

impl Identity {
    /// Length of the identity burst
    pub const LEN: usize = 7;

    /// Decode the identity burst
    #[must_use]
    pub const fn from_bytes(bytes: &[u8; Self::LEN]) -> Self {
        Self {
            chip_id: bytes[0],
            accel_id: bytes[1],
            mag_id: bytes[2],
            gyro_id: bytes[3],
            sw_revision: u16::from_le_bytes([bytes[4], bytes[5]]),
            bootloader_revision: bytes[6],
        }
    }
}

/// Source axis in an axis remap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Physical X
    X = 0,
    /// Physical Y
    Y = 1,
    /// Physical Z
    Z = 2,
}

impl Axis {
    const fn from_code(code: u8) -> Option<Self> {
        match code & 0x03 {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }
}

/// Which axis remap register to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisRemapRegister {
    /// `AXIS_MAP_CONFIG` (0x41)
    Config,
    /// `AXIS_MAP_SIGN` (0x42)
    Sign,
}

impl AxisRemapRegister {
    /// Register address
    #[must_use]
    pub const fn address(self) -> u8 {
        match self {
            Self::Config => crate::registers::AXIS_MAP_CONFIG,
            Self::Sign => crate::registers::AXIS_MAP_SIGN,
        }
    }
}

/// Axis remap configuration and sign, kept raw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisRemap {
    /// Raw `AXIS_MAP_CONFIG`
    pub config: u8,
    /// Raw `AXIS_MAP_SIGN`
    pub sign: u8,
}

impl AxisRemap {
    /// Power-on remap configuration (X=X, Y=Y, Z=Z)
    pub const DEFAULT_CONFIG: u8 = 0x24;
    /// Power-on sign (all positive)
    pub const DEFAULT_SIGN: u8 = 0x00;

    /// Source axis reported as X (`None` for the invalid code 3)
    #[must_use]
    pub const fn x(&self) -> Option<Axis> {
        Axis::from_code(self.config)
    }

    /// Source axis reported as Y
    #[must_use]
    pub const fn y(&self) -> Option<Axis> {
        Axis::from_code(self.config >> 2)
    }

    /// Source axis reported as Z
    #[must_use]
    pub const fn z(&self) -> Option<Axis> {
        Axis::from_code(self.config >> 4)
    }

    /// Sign flags as (x, y, z), `true` meaning negated
    #[must_use]
    pub const fn negated(&self) -> (bool, bool, bool) {
        (
            self.sign & 0x04 != 0,
            self.sign & 0x02 != 0,
            self.sign & 0x01 != 0,
        )
    }

    /// Whether the remap matches the power-on default
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.config == Self::DEFAULT_CONFIG && self.sign & 0x07 == Self::DEFAULT_SIGN
    }
}

/// System status code from `SYS_STATUS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemStatus {
    /// System idle
    Idle = 0,
    /// System error, see [`SystemError`]
    Error = 1,
    /// Initializing peripherals
    InitializingPeripherals = 2,
    /// System initialization
    Initializing = 3,
    /// Executing self-test
    SelfTest = 4,
    /// Sensor fusion algorithm running
    FusionRunning = 5,
    /// Running without fusion algorithm
    RunningNoFusion = 6,
}

impl SystemStatus {
    /// Decode a raw status code
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Idle,
            1 => Self::Error,
            2 => Self::InitializingPeripherals,
            3 => Self::Initializing,
            4 => Self::SelfTest,
            5 => Self::FusionRunning,
            6 => Self::RunningNoFusion,
            _ => return None,
        })
    }
}

/// System error code from `SYS_ERR`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemError {
    /// No error
    None = 0x00,
    /// Peripheral initialization error
    PeripheralInit = 0x01,
    /// System initialization error
    SystemInit = 0x02,
    /// Self-test result failed
    SelfTestFailed = 0x03,
    /// Register map value out of range
    RegisterValueOutOfRange = 0x04,
    /// Register map address out of range
    RegisterAddressOutOfRange = 0x05,
    /// Register map write error
    RegisterWrite = 0x06,
    /// Low power mode not available for the selected operating mode
    LowPowerUnavailable = 0x07,
    /// Accelerometer power mode not available
    AccelPowerModeUnavailable = 0x08,
    /// Fusion algorithm configuration error
    FusionConfig = 0x09,
    /// Sensor configuration error
    SensorConfig = 0x0A,
}

impl SystemError {
    /// Decode a raw error code
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x00 => Self::None,
            0x01 => Self::PeripheralInit,
            0x02 => Self::SystemInit,
            0x03 => Self::SelfTestFailed,
            0x04 => Self::RegisterValueOutOfRange,
            0x05 => Self::RegisterAddressOutOfRange,
            0x06 => Self::RegisterWrite,
            0x07 => Self::LowPowerUnavailable,
            0x08 => Self::AccelPowerModeUnavailable,
            0x09 => Self::FusionConfig,
            0x0A => Self::SensorConfig,
            _ => return None,
        })
    }
}

/// Power-on self-test result (`ST_RESULT`, low 4 bits, set bit = passed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestResult(pub u8);

impl SelfTestResult {
    /// Accelerometer passed
    #[must_use]
    pub const fn accelerometer(&self) -> bool {
        self.0 & 0x01 != 0
    }

    /// Magnetometer passed
    #[must_use]
    pub const fn magnetometer(&self) -> bool {
        self.0 & 0x02 != 0
    }

    /// Gyroscope passed
    #[must_use]
    pub const fn gyroscope(&self) -> bool {
        self.0 & 0x04 != 0
    }

    /// Microcontroller passed
    #[must_use]
    pub const fn mcu(&self) -> bool {
        self.0 & 0x08 != 0
    }

    /// All four tests passed
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.0 & 0x0F == 0x0F
    }
}

/// Output units selected in `UNIT_SEL`
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnitSelection {
    /// Acceleration in mg (otherwise m/s^2)
    pub accel_mg: bool,
    /// Angular rate in rad/s (otherwise deg/s)
    pub gyro_rps: bool,
    /// Euler angles in radians (otherwise degrees)
    pub euler_radians: bool,
    /// Temperature in Fahrenheit (otherwise Celsius)
    pub temperature_fahrenheit: bool,
    /// Android orientation convention (otherwise Windows)
    pub orientation_android: bool,
}

impl UnitSelection {
    /// Divisor turning raw gravity or linear acceleration counts into the selected unit
    ///
    /// 1 LSB is 1 mg or 0.01 m/s^2.
    #[must_use]
    pub const fn accel_divisor(&self) -> f32 {
        if self.accel_mg { 1.0 } else { 100.0 }
    }
}

/// Die temperature as reported by `TEMP`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    /// Raw signed register value
    pub raw: i8,
    /// Reported in Fahrenheit
    pub fahrenheit: bool,
}

impl Temperature {
    /// Temperature in the selected unit (1 LSB = 1 degC or 2 degF)
    #[must_use]
    pub fn value(&self) -> f32 {
        if self.fahrenheit {
            f32::from(self.raw) * 2.0
        } else {
            f32::from(self.raw)
        }
    }
}

/// Clock source selected in `SYS_TRIGGER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal oscillator (default)
    Internal,
    /// External crystal
    External,
}

/// Device information snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    /// Identity block
    pub identity: Identity,
    /// Operating mode
    pub operation_mode: OperationMode,
    /// Power mode
    pub power_mode: PowerMode,
    /// Axis remap
    pub axis_remap: AxisRemap,
    /// Raw `SYS_STATUS`
    pub system_status: u8,
    /// Self-test result
    pub self_test: SelfTestResult,
    /// Raw `SYS_ERR`
    pub system_error: u8,
    /// Output units
    pub units: UnitSelection,
    /// Die temperature
    pub temperature: Temperature,
}

/// Raw contents of both register pages, 8 rows of 16 bytes each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterDump {
    /// Page 0, row `n` covering 0x`n`0..=0x`n`F
    pub page0: [[u8; 16]; 8],
    /// Page 1
    pub page1: [[u8; 16]; 8],
}
