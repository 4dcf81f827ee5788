//! Register definitions for the BNO055
//!
//! The BNO055 splits its register map into two pages selected through
//! `PAGE_ID` (0x07, present on both pages). Page 0 holds identity, sensor
//! output, status and mode registers. Page 1 holds the raw sensor
//! configuration.
//!
//! Bit-packed registers are described with the `device-driver` DSL. Multi-byte
//! output groups and the calibration block are transferred as raw bursts, so
//! only their start addresses are listed here.

// ==================== PAGE 0 ADDRESSES ====================

/// `CHIP_ID`, first byte of the 7-byte identity block
pub const CHIP_ID: u8 = 0x00;
/// `PAGE_ID`
pub const PAGE_ID: u8 = 0x07;
/// Accelerometer output, X LSB
pub const ACC_DATA_X_LSB: u8 = 0x08;
/// Magnetometer output, X LSB
pub const MAG_DATA_X_LSB: u8 = 0x0E;
/// Gyroscope output, X LSB
pub const GYR_DATA_X_LSB: u8 = 0x14;
/// Euler heading LSB
pub const EUL_HEADING_LSB: u8 = 0x1A;
/// Quaternion W LSB
pub const QUA_DATA_W_LSB: u8 = 0x20;
/// Linear acceleration X LSB
pub const LIA_DATA_X_LSB: u8 = 0x28;
/// Gravity vector X LSB
pub const GRV_DATA_X_LSB: u8 = 0x2E;
/// Temperature
pub const TEMP: u8 = 0x34;
/// Calibration status
pub const CALIB_STAT: u8 = 0x35;
/// Self-test result
pub const ST_RESULT: u8 = 0x36;
/// System status
pub const SYS_STATUS: u8 = 0x39;
/// System error code
pub const SYS_ERR: u8 = 0x3A;
/// Unit selection
pub const UNIT_SEL: u8 = 0x3B;
/// Operating mode
pub const OPR_MODE: u8 = 0x3D;
/// Power mode
pub const PWR_MODE: u8 = 0x3E;
/// System trigger
pub const SYS_TRIGGER: u8 = 0x3F;
/// Axis remap configuration
pub const AXIS_MAP_CONFIG: u8 = 0x41;
/// Axis remap sign
pub const AXIS_MAP_SIGN: u8 = 0x42;
/// Soft-iron calibration matrix, first byte of the calibration block
pub const SIC_MATRIX_0_LSB: u8 = 0x43;
/// Accelerometer offset X LSB, first byte of the offset image
pub const ACC_OFFSET_X_LSB: u8 = 0x55;

// ==================== PAGE 1 ADDRESSES ====================

/// Accelerometer configuration (page 1)
pub const ACC_CONFIG: u8 = 0x08;
/// Magnetometer configuration (page 1)
pub const MAG_CONFIG: u8 = 0x09;
/// Gyroscope range and bandwidth (page 1)
pub const GYR_CONFIG_0: u8 = 0x0A;
/// Gyroscope power mode (page 1)
pub const GYR_CONFIG_1: u8 = 0x0B;
/// Accelerometer sleep configuration (page 1)
pub const ACC_SLEEP_CONFIG: u8 = 0x0C;

/// Value written to `SYS_TRIGGER` to request a system reset
pub const RST_SYS: u8 = 0x20;

device_driver::create_device!(
    device_name: Bno055,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// PAGE_ID - Register page selector (both pages, 0x07)
        register PageId {
            const ADDRESS = 0x07;
            const SIZE_BITS = 8;

            /// Selected page (0 or 1)
            page: uint = 0..8,
        },

        // ==================== PAGE 0 REGISTERS ====================

        /// CHIP_ID - Device ID Register (Page 0, 0x00)
        /// Expected value: 0xA0
        register ChipId {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Device ID (should read 0xA0)
            chip_id: uint = 0..8,
        },

        /// TEMP - Temperature (Page 0, 0x34)
        register Temp {
            const ADDRESS = 0x34;
            const SIZE_BITS = 8;

            /// Signed temperature, 1 LSB = 1 degC or 2 degF
            value: int = 0..8,
        },

        /// CALIB_STAT - Calibration status (Page 0, 0x35)
        register CalibStat {
            const ADDRESS = 0x35;
            const SIZE_BITS = 8;

            /// Magnetometer calibration level (0-3)
            mag: uint = 0..2,
            /// Accelerometer calibration level (0-3)
            acc: uint = 2..4,
            /// Gyroscope calibration level (0-3)
            gyr: uint = 4..6,
            /// System calibration level (0-3)
            sys: uint = 6..8,
        },

        /// ST_RESULT - Power-on self-test result (Page 0, 0x36)
        register StResult {
            const ADDRESS = 0x36;
            const SIZE_BITS = 8;

            /// Pass bits: accelerometer, magnetometer, gyroscope, MCU
            result: uint = 0..4,
            reserved: uint = 4..8,
        },

        /// SYS_STATUS - System status code (Page 0, 0x39)
        register SysStatus {
            const ADDRESS = 0x39;
            const SIZE_BITS = 8;

            /// Status code (0-6)
            status: uint = 0..8,
        },

        /// SYS_ERR - System error code (Page 0, 0x3A)
        register SysErr {
            const ADDRESS = 0x3A;
            const SIZE_BITS = 8;

            /// Error code (0 = no error)
            error: uint = 0..8,
        },

        /// UNIT_SEL - Output unit selection (Page 0, 0x3B)
        register UnitSel {
            const ADDRESS = 0x3B;
            const SIZE_BITS = 8;

            /// Acceleration in mg instead of m/s^2
            acc_mg: bool = 0,
            /// Angular rate in rad/s instead of deg/s
            gyr_rps: bool = 1,
            /// Euler angles in radians instead of degrees
            eul_rad: bool = 2,
            reserved_3: uint = 3..4,
            /// Temperature in Fahrenheit instead of Celsius
            temp_fahrenheit: bool = 4,
            reserved_6_5: uint = 5..7,
            /// Android orientation convention instead of Windows
            ori_android: bool = 7,
        },

        /// OPR_MODE - Operating mode (Page 0, 0x3D)
        register OprMode {
            const ADDRESS = 0x3D;
            const SIZE_BITS = 8;

            /// Operating mode code (0x00-0x0C)
            mode: uint = 0..4,
            reserved: uint = 4..8,
        },

        /// PWR_MODE - Power mode (Page 0, 0x3E)
        register PwrMode {
            const ADDRESS = 0x3E;
            const SIZE_BITS = 8;

            /// Power mode code (0-2)
            mode: uint = 0..2,
            reserved: uint = 2..8,
        },

        /// SYS_TRIGGER - System trigger (Page 0, 0x3F)
        register SysTrigger {
            const ADDRESS = 0x3F;
            const SIZE_BITS = 8;

            /// Trigger self-test
            self_test: bool = 0,
            reserved_4_1: uint = 1..5,
            /// Reset the system
            rst_sys: bool = 5,
            /// Reset all interrupt status bits
            rst_int: bool = 6,
            /// Use the external crystal
            clk_sel: bool = 7,
        },

        // ==================== PAGE 1 REGISTERS ====================
        // Only valid while PAGE_ID selects page 1

        /// ACC_CONFIG - Accelerometer configuration (Page 1, 0x08)
        register AccConfig {
            const ADDRESS = 0x08;
            const SIZE_BITS = 8;

            /// G range
            range: uint = 0..2,
            /// Bandwidth
            bandwidth: uint = 2..5,
            /// Operation mode
            power: uint = 5..8,
        },

        /// MAG_CONFIG - Magnetometer configuration (Page 1, 0x09)
        register MagConfig {
            const ADDRESS = 0x09;
            const SIZE_BITS = 8;

            /// Output data rate
            rate: uint = 0..3,
            /// Operation mode
            operation: uint = 3..5,
            /// Power mode
            power: uint = 5..7,
            reserved: uint = 7..8,
        },

        /// GYR_CONFIG_0 - Gyroscope range and bandwidth (Page 1, 0x0A)
        register GyrConfig {
            const ADDRESS = 0x0A;
            const SIZE_BITS = 8;

            /// Range
            range: uint = 0..3,
            /// Bandwidth
            bandwidth: uint = 3..6,
            reserved: uint = 6..8,
        },

        /// GYR_CONFIG_1 - Gyroscope power mode (Page 1, 0x0B)
        register GyrPowerConfig {
            const ADDRESS = 0x0B;
            const SIZE_BITS = 8;

            /// Power mode
            power: uint = 0..3,
            reserved: uint = 3..8,
        },

        /// ACC_SLEEP_CONFIG - Accelerometer sleep timing (Page 1, 0x0C)
        register AccSleepConfig {
            const ADDRESS = 0x0C;
            const SIZE_BITS = 8;

            /// Equidistant sampling instead of event driven
            equidistant: bool = 0,
            /// Sleep duration code
            duration: uint = 1..5,
            reserved: uint = 5..8,
        },
    }
);
