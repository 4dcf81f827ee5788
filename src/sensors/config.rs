//! Raw sensor configuration on register page 1
//!
//! In fusion modes the BNO055 manages these registers itself; they are
//! reported here for diagnostics. Every decoder rejects reserved codes so a
//! corrupted read is never mistaken for a valid setting.

macro_rules! code_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code,)+
        }

        impl $name {
            /// Decode a raw field value
            #[must_use]
            pub const fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Raw field value
            #[must_use]
            pub const fn code(self) -> u8 {
                self as u8
            }
        }
    };
}

code_enum!(
    /// Accelerometer full-scale range
    AccelRange {
        /// ±2 g
        G2 = 0,
        /// ±4 g
        G4 = 1,
        /// ±8 g
        G8 = 2,
        /// ±16 g
        G16 = 3,
    }
);

code_enum!(
    /// Accelerometer bandwidth
    AccelBandwidth {
        /// 7.81 Hz
        Hz7_81 = 0,
        /// 15.63 Hz
        Hz15_63 = 1,
        /// 31.25 Hz
        Hz31_25 = 2,
        /// 62.5 Hz
        Hz62_5 = 3,
        /// 125 Hz
        Hz125 = 4,
        /// 250 Hz
        Hz250 = 5,
        /// 500 Hz
        Hz500 = 6,
        /// 1000 Hz
        Hz1000 = 7,
    }
);

code_enum!(
    /// Accelerometer operation mode
    AccelPowerMode {
        /// Normal
        Normal = 0,
        /// Suspend
        Suspend = 1,
        /// Low power 1
        LowPower1 = 2,
        /// Standby
        Standby = 3,
        /// Low power 2
        LowPower2 = 4,
        /// Deep suspend
        DeepSuspend = 5,
    }
);

code_enum!(
    /// Magnetometer output data rate
    MagDataRate {
        /// 2 Hz
        Hz2 = 0,
        /// 6 Hz
        Hz6 = 1,
        /// 8 Hz
        Hz8 = 2,
        /// 10 Hz
        Hz10 = 3,
        /// 15 Hz
        Hz15 = 4,
        /// 20 Hz
        Hz20 = 5,
        /// 25 Hz
        Hz25 = 6,
        /// 30 Hz
        Hz30 = 7,
    }
);

code_enum!(
    /// Magnetometer operation mode
    MagOperationMode {
        /// Low power
        LowPower = 0,
        /// Regular
        Regular = 1,
        /// Enhanced regular
        EnhancedRegular = 2,
        /// High accuracy
        HighAccuracy = 3,
    }
);

code_enum!(
    /// Magnetometer power mode
    MagPowerMode {
        /// Normal
        Normal = 0,
        /// Sleep
        Sleep = 1,
        /// Suspend
        Suspend = 2,
        /// Force mode
        Force = 3,
    }
);

code_enum!(
    /// Gyroscope full-scale range
    GyroRange {
        /// ±2000 deg/s
        Dps2000 = 0,
        /// ±1000 deg/s
        Dps1000 = 1,
        /// ±500 deg/s
        Dps500 = 2,
        /// ±250 deg/s
        Dps250 = 3,
        /// ±125 deg/s
        Dps125 = 4,
    }
);

code_enum!(
    /// Gyroscope bandwidth
    GyroBandwidth {
        /// 523 Hz
        Hz523 = 0,
        /// 230 Hz
        Hz230 = 1,
        /// 116 Hz
        Hz116 = 2,
        /// 47 Hz
        Hz47 = 3,
        /// 23 Hz
        Hz23 = 4,
        /// 12 Hz
        Hz12 = 5,
        /// 64 Hz
        Hz64 = 6,
        /// 32 Hz
        Hz32 = 7,
    }
);

code_enum!(
    /// Gyroscope power mode
    GyroPowerMode {
        /// Normal
        Normal = 0,
        /// Fast power up
        FastPowerUp = 1,
        /// Deep suspend
        DeepSuspend = 2,
        /// Suspend
        Suspend = 3,
        /// Advanced power save
        AdvancedPowerSave = 4,
    }
);

/// Accelerometer sleep duration
///
/// Codes 0-5 all select the shortest duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelSleepDuration {
    /// 0.5 ms
    Us500,
    /// 1 ms
    Ms1,
    /// 2 ms
    Ms2,
    /// 4 ms
    Ms4,
    /// 6 ms
    Ms6,
    /// 10 ms
    Ms10,
    /// 25 ms
    Ms25,
    /// 50 ms
    Ms50,
    /// 100 ms
    Ms100,
    /// 500 ms
    Ms500,
    /// 1 s
    S1,
}

impl AccelSleepDuration {
    /// Decode the 4-bit duration field
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x0F {
            0..=5 => Self::Us500,
            6 => Self::Ms1,
            7 => Self::Ms2,
            8 => Self::Ms4,
            9 => Self::Ms6,
            10 => Self::Ms10,
            11 => Self::Ms25,
            12 => Self::Ms50,
            13 => Self::Ms100,
            14 => Self::Ms500,
            _ => Self::S1,
        }
    }

    /// Duration in microseconds
    #[must_use]
    pub const fn as_micros(self) -> u32 {
        match self {
            Self::Us500 => 500,
            Self::Ms1 => 1_000,
            Self::Ms2 => 2_000,
            Self::Ms4 => 4_000,
            Self::Ms6 => 6_000,
            Self::Ms10 => 10_000,
            Self::Ms25 => 25_000,
            Self::Ms50 => 50_000,
            Self::Ms100 => 100_000,
            Self::Ms500 => 500_000,
            Self::S1 => 1_000_000,
        }
    }
}

/// Accelerometer configuration (`ACC_CONFIG`, page 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelConfig {
    /// Full-scale range
    pub range: AccelRange,
    /// Bandwidth
    pub bandwidth: AccelBandwidth,
    /// Operation mode
    pub power: AccelPowerMode,
}

/// Accelerometer sleep configuration (`ACC_SLEEP_CONFIG`, page 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSleepConfig {
    /// Equidistant sampling instead of event-driven
    pub equidistant: bool,
    /// Sleep phase duration
    pub duration: AccelSleepDuration,
}

/// Magnetometer configuration (`MAG_CONFIG`, page 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagConfig {
    /// Output data rate
    pub rate: MagDataRate,
    /// Operation mode
    pub operation: MagOperationMode,
    /// Power mode
    pub power: MagPowerMode,
}

/// Gyroscope configuration (`GYR_CONFIG_0`, page 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroConfig {
    /// Full-scale range
    pub range: GyroRange,
    /// Bandwidth
    pub bandwidth: GyroBandwidth,
}

/// Gyroscope power configuration (`GYR_CONFIG_1`, page 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroPowerConfig {
    /// Power mode
    pub power: GyroPowerMode,
}
