//! High-level driver API for the BNO055
//!
//! This module provides the session object for one BNO055. It handles page
//! selection, the operating and power mode state machines, calibration
//! persistence and sensor data decoding.
//!
//! Every composite operation leaves the device on register page 0, also when
//! it fails half way through.

use crate::calibration::{
    self, BlobLengthError, CalibrationBlob, CalibrationOffsets, CalibrationStatus,
    OFFSETS_BYTECOUNT,
};
use crate::info::{
    AxisRemap, AxisRemapRegister, ClockSource, DeviceInfo, Identity, RegisterDump,
    SelfTestResult, SystemError, SystemStatus, Temperature, UnitSelection,
};
use crate::mode::{
    BOOT_TIME_MS, CALIBRATION_LOAD_SETTLE_MS, CONFIG_ENTRY_SETTLE_MS, FUSION_RECONVERGE_MS,
    OperationMode, PAGE_SWITCH_SETTLE_MS, POWER_SETTLE_MS, PowerMode,
};
use crate::registers::{self, Bno055 as RegisterDevice};
use crate::sensors::config::{
    AccelBandwidth, AccelConfig, AccelPowerMode, AccelRange, AccelSleepConfig,
    AccelSleepDuration, GyroBandwidth, GyroConfig, GyroPowerConfig, GyroPowerMode, GyroRange,
    MagConfig, MagDataRate, MagOperationMode, MagPowerMode,
};
use crate::sensors::{
    Acceleration, AngularRate, EulerAngles, Gravity, LinearAcceleration, MagneticField,
    Quaternion, decode_le_i16,
};
use crate::{CALIB_BYTECOUNT, CHIP_ID_VALUE, Error, Page, Step, io};

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

/// Reject a register field with no defined meaning
const fn invalid<E>(register: u8, value: u8) -> Error<E> {
    Error::InvalidRegisterValue { register, value }
}

/// Main driver for the BNO055
pub struct Bno055Driver<I> {
    device: RegisterDevice<I>,
    current_page: Option<Page>,
}

impl<I> Bno055Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new BNO055 driver instance
    ///
    /// Selects page 0 and probes `CHIP_ID`. The device is not reconfigured.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `CHIP_ID` register contains an unexpected value
    pub fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let mut driver = Self {
            device: RegisterDevice::new(interface),
            current_page: None,
        };

        driver.select_page(Page::Page0)?;
        let chip_id = driver.read_chip_id().map_err(|e| e.in_step(Step::Probe))?;

        if chip_id != CHIP_ID_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unexpected CHIP_ID {=u8:#x}", chip_id);
            return Err(Error::InvalidDevice(chip_id));
        }

        Ok(driver)
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Page the driver last selected, `None` after a failed page write
    pub const fn current_page(&self) -> Option<Page> {
        self.current_page
    }

    /// Select a register page
    ///
    /// Skipped when the page is already selected. A failed write clears the
    /// cached page so the next call writes `PAGE_ID` again.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn select_page(&mut self, page: Page) -> Result<(), Error<I::Error>> {
        if self.current_page != Some(page) {
            if let Err(e) = self.device.page_id().write(|w| {
                w.set_page(page as u8);
            }) {
                self.current_page = None;
                return Err(io(registers::PAGE_ID)(e).in_step(Step::SelectPage));
            }

            self.current_page = Some(page);
        }
        Ok(())
    }

    /// Run `f` on page 1 and return to page 0 on every path
    ///
    /// The first error wins; a failed restore is reported only when `f`
    /// succeeded.
    fn with_page1<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error<I::Error>>,
    ) -> Result<T, Error<I::Error>> {
        let result = match self.select_page(Page::Page1) {
            Ok(()) => f(self),
            Err(e) => Err(e),
        };
        let restored = self.select_page(Page::Page0);

        #[cfg(feature = "defmt")]
        if restored.is_err() {
            defmt::warn!("Failed to restore register page 0");
        }

        let value = result?;
        restored?;
        Ok(value)
    }

    // ==================== REGISTER PRIMITIVES ====================

    #[allow(clippy::cast_possible_truncation)]
    fn read_bytes<const N: usize>(&mut self, register: u8) -> Result<[u8; N], Error<I::Error>> {
        let mut buffer = [0u8; N];
        self.device
            .interface
            .read_register(register, (N as u32) * 8, &mut buffer)
            .map_err(io(register))?;
        Ok(buffer)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_bytes(&mut self, register: u8, data: &[u8]) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .write_register(register, (data.len() as u32) * 8, data)
            .map_err(io(register))
    }

    fn read_chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self
            .device
            .chip_id()
            .read()
            .map_err(io(registers::CHIP_ID))?;
        Ok(reg.chip_id())
    }

    fn read_mode_code(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self
            .device
            .opr_mode()
            .read()
            .map_err(io(registers::OPR_MODE))?;
        Ok(reg.mode())
    }

    fn write_mode_code(&mut self, code: u8) -> Result<(), Error<I::Error>> {
        self.device
            .opr_mode()
            .write(|w| {
                w.set_mode(code);
            })
            .map_err(io(registers::OPR_MODE))
    }

    fn read_power_code(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self
            .device
            .pwr_mode()
            .read()
            .map_err(io(registers::PWR_MODE))?;
        Ok(reg.mode())
    }

    // ==================== MODE CONTROL ====================

    /// Read the current operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the
    /// register holds an undefined mode code.
    pub fn operation_mode(&mut self) -> Result<OperationMode, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let code = self
            .read_mode_code()
            .map_err(|e| e.in_step(Step::ReadMode))?;
        OperationMode::from_code(code).ok_or(invalid(registers::OPR_MODE, code))
    }

    /// Switch the operating mode
    ///
    /// Does nothing when the device is already in `mode`. A change between two
    /// non-CONFIG modes passes through CONFIG first. The mode is read back
    /// after the settle time.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the mode
    /// read back differs from `mode`.
    pub fn set_operation_mode<D>(
        &mut self,
        mode: OperationMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.select_page(Page::Page0)?;

        let current = self
            .read_mode_code()
            .map_err(|e| e.in_step(Step::ReadMode))?;
        if current == mode.code() {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Operation mode {=u8:#x} -> {}", current, mode);

        if current != OperationMode::Config.code() && !mode.is_config() {
            self.write_mode_code(OperationMode::Config.code())
                .map_err(|e| e.in_step(Step::EnterConfig))?;
            delay.delay_ms(CONFIG_ENTRY_SETTLE_MS);
        }

        self.write_mode_code(mode.code())
            .map_err(|e| e.in_step(Step::WriteMode))?;
        delay.delay_ms(mode.settle_ms());

        let actual = self
            .read_mode_code()
            .map_err(|e| e.in_step(Step::VerifyMode))?;
        if actual != mode.code() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Mode verification failed: wanted {}, read {=u8:#x}", mode, actual);
            return Err(Error::ModeVerification {
                requested: mode,
                actual,
            });
        }

        Ok(())
    }

    /// Read the current power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the
    /// register holds the undefined code 3.
    pub fn power_mode(&mut self) -> Result<PowerMode, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let code = self
            .read_power_code()
            .map_err(|e| e.in_step(Step::ReadPower))?;
        PowerMode::from_code(code).ok_or(invalid(registers::PWR_MODE, code))
    }

    /// Switch the power mode
    ///
    /// Power mode can only be written in CONFIG. The current operating mode is
    /// left for CONFIG and restored afterwards, with a 30 ms settle after each
    /// write. The restore is attempted even when the power write fails. The
    /// power mode is read back at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the power
    /// mode read back differs from `power`. After an error the device may be
    /// left in CONFIG or with the new power mode applied.
    pub fn set_power_mode<D>(
        &mut self,
        power: PowerMode,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.select_page(Page::Page0)?;

        let original = self
            .read_mode_code()
            .map_err(|e| e.in_step(Step::ReadMode))?;
        let was_config = original == OperationMode::Config.code();

        if !was_config {
            self.write_mode_code(OperationMode::Config.code())
                .map_err(|e| e.in_step(Step::EnterConfig))?;
            delay.delay_ms(POWER_SETTLE_MS);
        }

        let written = self
            .device
            .pwr_mode()
            .write(|w| {
                w.set_mode(power.code());
            })
            .map_err(io(registers::PWR_MODE))
            .map_err(|e| e.in_step(Step::WritePower));
        if written.is_ok() {
            delay.delay_ms(POWER_SETTLE_MS);
        }

        let restored = if was_config {
            Ok(())
        } else {
            let restored = self
                .write_mode_code(original)
                .map_err(|e| e.in_step(Step::RestoreMode));
            delay.delay_ms(POWER_SETTLE_MS);
            restored
        };

        written?;
        restored?;

        let actual = self
            .read_power_code()
            .map_err(|e| e.in_step(Step::VerifyPower))?;
        if actual != power.code() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Power verification failed: wanted {}, read {}", power, actual);
            return Err(Error::PowerVerification {
                requested: power,
                actual,
            });
        }

        Ok(())
    }

    /// Run `f` in CONFIG mode and restore the previous mode afterwards
    ///
    /// `entry_settle_ms` and `exit_settle_ms` are waited in addition to the
    /// mode transition settle times; zero skips the wait. The restore is
    /// attempted even when `f` fails, and the error of `f` wins.
    fn in_config_mode<T, D>(
        &mut self,
        delay: &mut D,
        entry_settle_ms: u32,
        exit_settle_ms: u32,
        f: impl FnOnce(&mut Self) -> Result<T, Error<I::Error>>,
    ) -> Result<T, Error<I::Error>>
    where
        D: DelayNs,
    {
        let original = self.operation_mode()?;

        self.set_operation_mode(OperationMode::Config, delay)?;
        if entry_settle_ms > 0 {
            delay.delay_ms(entry_settle_ms);
        }

        let result = f(self);

        let restored = self.set_operation_mode(original, delay);
        if exit_settle_ms > 0 {
            delay.delay_ms(exit_settle_ms);
        }

        let value = result?;
        restored?;
        Ok(value)
    }

    // ==================== CALIBRATION ====================

    /// Read the per-subsystem calibration levels
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn calibration_status(&mut self) -> Result<CalibrationStatus, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let reg = self
            .device
            .calib_stat()
            .read()
            .map_err(io(registers::CALIB_STAT))?;

        Ok(CalibrationStatus {
            system: reg.sys(),
            gyroscope: reg.gyr(),
            accelerometer: reg.acc(),
            magnetometer: reg.mag(),
        })
    }

    /// Read the sensor offsets and radii
    ///
    /// Offsets only update outside fusion modes, so the device is switched to
    /// CONFIG for the read and returned to its previous mode afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or a mode
    /// transition cannot be verified.
    pub fn calibration_offsets<D>(
        &mut self,
        delay: &mut D,
    ) -> Result<CalibrationOffsets, Error<I::Error>>
    where
        D: DelayNs,
    {
        let image = self.in_config_mode(delay, 0, 0, |d| {
            d.read_bytes::<OFFSETS_BYTECOUNT>(registers::ACC_OFFSET_X_LSB)
                .map_err(|e| e.in_step(Step::ReadOffsets))
        })?;
        Ok(CalibrationOffsets::from_bytes(&image))
    }

    /// Read the calibration block for persisting
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or a mode
    /// transition cannot be verified.
    pub fn save_calibration<D>(
        &mut self,
        delay: &mut D,
    ) -> Result<CalibrationBlob, Error<I::Error>>
    where
        D: DelayNs,
    {
        let bytes = self.in_config_mode(delay, 0, 0, |d| {
            d.read_bytes::<CALIB_BYTECOUNT>(registers::SIC_MATRIX_0_LSB)
                .map_err(|e| e.in_step(Step::ReadCalibration))
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Calibration block: {=[u8]:x}", &bytes[..]);

        Ok(CalibrationBlob::new(bytes))
    }

    /// Restore a calibration block from raw bytes
    ///
    /// The length is checked before any register access. See
    /// [`write_calibration`](Self::write_calibration) for the write sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBlobLength`] if `bytes` is not exactly
    /// [`CALIB_BYTECOUNT`] long, otherwise the errors of `write_calibration`.
    pub fn load_calibration<D>(
        &mut self,
        bytes: &[u8],
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        let blob = CalibrationBlob::try_from(bytes)
            .map_err(|BlobLengthError(len)| Error::InvalidBlobLength(len))?;
        self.write_calibration(&blob, delay)
    }

    /// Write a calibration block and verify it
    ///
    /// The device is held in CONFIG while the block is written and read back.
    /// Afterwards the previous mode is restored and the fusion engine gets
    /// 650 ms to pick up the new offsets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CalibrationVerification`] listing every byte that
    /// read back differently, or an error if communication with the device
    /// fails.
    pub fn write_calibration<D>(
        &mut self,
        blob: &CalibrationBlob,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        let base = registers::SIC_MATRIX_0_LSB;
        // A mismatch outranks a failed mode restore
        self.in_config_mode(delay, CALIBRATION_LOAD_SETTLE_MS, FUSION_RECONVERGE_MS, |d| {
            d.write_bytes(base, blob.as_bytes())
                .map_err(|e| e.in_step(Step::WriteCalibration))?;
            let readback = d
                .read_bytes::<CALIB_BYTECOUNT>(base)
                .map_err(|e| e.in_step(Step::VerifyCalibration))?;

            let mismatches = calibration::compare_blocks(base, blob.as_bytes(), &readback);
            if mismatches.is_empty() {
                return Ok(());
            }

            #[cfg(feature = "defmt")]
            for m in &mismatches {
                defmt::warn!(
                    "Calibration {=u8:#x}: wrote {=u8:#x}, read {=u8:#x}",
                    m.register,
                    m.expected,
                    m.actual
                );
            }
            Err(Error::CalibrationVerification(mismatches))
        })
    }

    // ==================== SENSOR DATA ====================

    fn read_vector<const N: usize, const B: usize>(
        &mut self,
        register: u8,
    ) -> Result<[i16; N], Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let bytes = self
            .read_bytes::<B>(register)
            .map_err(|e| e.in_step(Step::ReadData))?;
        Ok(decode_le_i16(&bytes))
    }

    /// Read raw accelerometer counts (x, y, z)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_raw(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        self.read_vector::<3, 6>(registers::ACC_DATA_X_LSB)
    }

    /// Read raw magnetometer counts (x, y, z)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_mag_raw(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        self.read_vector::<3, 6>(registers::MAG_DATA_X_LSB)
    }

    /// Read raw gyroscope counts (x, y, z)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro_raw(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        self.read_vector::<3, 6>(registers::GYR_DATA_X_LSB)
    }

    /// Read raw Euler counts (heading, roll, pitch)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_euler_raw(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        self.read_vector::<3, 6>(registers::EUL_HEADING_LSB)
    }

    /// Read raw quaternion counts (w, x, y, z)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_quaternion_raw(&mut self) -> Result<[i16; 4], Error<I::Error>> {
        self.read_vector::<4, 8>(registers::QUA_DATA_W_LSB)
    }

    /// Read raw gravity counts (x, y, z)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gravity_raw(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        self.read_vector::<3, 6>(registers::GRV_DATA_X_LSB)
    }

    /// Read raw linear acceleration counts (x, y, z)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_linear_accel_raw(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        self.read_vector::<3, 6>(registers::LIA_DATA_X_LSB)
    }

    /// Read the accelerometer output
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_acceleration(&mut self) -> Result<Acceleration, Error<I::Error>> {
        self.read_accel_raw().map(Acceleration::from_raw)
    }

    /// Read the magnetic field in microtesla
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_magnetic_field(&mut self) -> Result<MagneticField, Error<I::Error>> {
        self.read_mag_raw().map(MagneticField::from_raw)
    }

    /// Read the angular rate in degrees per second
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_angular_rate(&mut self) -> Result<AngularRate, Error<I::Error>> {
        self.read_gyro_raw().map(AngularRate::from_raw)
    }

    /// Read the fused orientation as Euler angles in degrees
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_euler(&mut self) -> Result<EulerAngles, Error<I::Error>> {
        self.read_euler_raw().map(EulerAngles::from_raw)
    }

    /// Read the fused orientation as a quaternion
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_quaternion(&mut self) -> Result<Quaternion, Error<I::Error>> {
        self.read_quaternion_raw().map(Quaternion::from_raw)
    }

    /// Read the gravity vector
    ///
    /// `UNIT_SEL` is read before every sample, so a unit change made by
    /// another bus master is picked up immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gravity(&mut self) -> Result<Gravity, Error<I::Error>> {
        let divisor = self.unit_selection()?.accel_divisor();
        self.read_gravity_raw()
            .map(|raw| Gravity::from_raw(raw, divisor))
    }

    /// Read the linear acceleration (gravity removed)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_linear_acceleration(&mut self) -> Result<LinearAcceleration, Error<I::Error>> {
        let divisor = self.unit_selection()?.accel_divisor();
        self.read_linear_accel_raw()
            .map(|raw| LinearAcceleration::from_raw(raw, divisor))
    }

    // ==================== DEVICE INFORMATION ====================

    /// Read the 7-byte identity block
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn identity(&mut self) -> Result<Identity, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let bytes = self
            .read_bytes::<{ Identity::LEN }>(registers::CHIP_ID)
            .map_err(|e| e.in_step(Step::Identity))?;
        Ok(Identity::from_bytes(&bytes))
    }

    /// Read the output unit selection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn unit_selection(&mut self) -> Result<UnitSelection, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let reg = self
            .device
            .unit_sel()
            .read()
            .map_err(io(registers::UNIT_SEL))
            .map_err(|e| e.in_step(Step::ReadUnits))?;

        Ok(UnitSelection {
            accel_mg: reg.acc_mg(),
            gyro_rps: reg.gyr_rps(),
            euler_radians: reg.eul_rad(),
            temperature_fahrenheit: reg.temp_fahrenheit(),
            orientation_android: reg.ori_android(),
        })
    }

    fn read_temperature(&mut self, fahrenheit: bool) -> Result<Temperature, Error<I::Error>> {
        let reg = self
            .device
            .temp()
            .read()
            .map_err(io(registers::TEMP))
            .map_err(|e| e.in_step(Step::Temperature))?;
        Ok(Temperature {
            raw: reg.value(),
            fahrenheit,
        })
    }

    /// Read the die temperature in the unit selected by `UNIT_SEL`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn temperature(&mut self) -> Result<Temperature, Error<I::Error>> {
        let units = self.unit_selection()?;
        self.read_temperature(units.temperature_fahrenheit)
    }

    /// Read one axis remap register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn axis_remap_raw(&mut self, register: AxisRemapRegister) -> Result<u8, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let step = match register {
            AxisRemapRegister::Config => Step::RemapConfig,
            AxisRemapRegister::Sign => Step::RemapSign,
        };
        let [value] = self
            .read_bytes::<1>(register.address())
            .map_err(|e| e.in_step(step))?;
        Ok(value)
    }

    /// Read the axis remap configuration and sign
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn axis_remap(&mut self) -> Result<AxisRemap, Error<I::Error>> {
        let config = self.axis_remap_raw(AxisRemapRegister::Config)?;
        let sign = self.axis_remap_raw(AxisRemapRegister::Sign)?;
        Ok(AxisRemap { config, sign })
    }

    fn read_system_status_code(&mut self) -> Result<u8, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let reg = self
            .device
            .sys_status()
            .read()
            .map_err(io(registers::SYS_STATUS))
            .map_err(|e| e.in_step(Step::SystemStatus))?;
        Ok(reg.status())
    }

    fn read_system_error_code(&mut self) -> Result<u8, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let reg = self
            .device
            .sys_err()
            .read()
            .map_err(io(registers::SYS_ERR))
            .map_err(|e| e.in_step(Step::SystemError))?;
        Ok(reg.error())
    }

    /// Read the system status
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the status
    /// code is undefined.
    pub fn system_status(&mut self) -> Result<SystemStatus, Error<I::Error>> {
        let code = self.read_system_status_code()?;
        SystemStatus::from_code(code).ok_or(invalid(registers::SYS_STATUS, code))
    }

    /// Read the system error code
    ///
    /// Only meaningful while [`system_status`](Self::system_status) reports
    /// [`SystemStatus::Error`].
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the error
    /// code is undefined.
    pub fn system_error(&mut self) -> Result<SystemError, Error<I::Error>> {
        let code = self.read_system_error_code()?;
        SystemError::from_code(code).ok_or(invalid(registers::SYS_ERR, code))
    }

    /// Read the power-on self-test result
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn self_test_result(&mut self) -> Result<SelfTestResult, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let reg = self
            .device
            .st_result()
            .read()
            .map_err(io(registers::ST_RESULT))
            .map_err(|e| e.in_step(Step::SelfTest))?;
        Ok(SelfTestResult(reg.result()))
    }

    /// Read the selected clock source
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn clock_source(&mut self) -> Result<ClockSource, Error<I::Error>> {
        self.select_page(Page::Page0)?;
        let reg = self
            .device
            .sys_trigger()
            .read()
            .map_err(io(registers::SYS_TRIGGER))?;
        Ok(if reg.clk_sel() {
            ClockSource::External
        } else {
            ClockSource::Internal
        })
    }

    /// Assemble a full device information snapshot
    ///
    /// Reads identity, modes, axis remap, status, self-test, error, units and
    /// temperature in that order. The first failing read aborts the snapshot
    /// and its error names the failing step.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the mode or
    /// power register holds an undefined code.
    pub fn device_info(&mut self) -> Result<DeviceInfo, Error<I::Error>> {
        let identity = self.identity()?;
        let operation_mode = self.operation_mode()?;
        let power_mode = self.power_mode()?;
        let axis_remap = self.axis_remap()?;
        let system_status = self.read_system_status_code()?;
        let self_test = self.self_test_result()?;
        let system_error = self.read_system_error_code()?;
        let units = self.unit_selection()?;
        let temperature = self.read_temperature(units.temperature_fahrenheit)?;

        Ok(DeviceInfo {
            identity,
            operation_mode,
            power_mode,
            axis_remap,
            system_status,
            self_test,
            system_error,
            units,
            temperature,
        })
    }

    // ==================== PAGE 1 CONFIGURATION ====================

    /// Read the accelerometer configuration from page 1
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or a field
    /// holds a reserved code.
    pub fn accel_config(&mut self) -> Result<AccelConfig, Error<I::Error>> {
        self.with_page1(|d| {
            let reg = d
                .device
                .acc_config()
                .read()
                .map_err(io(registers::ACC_CONFIG))
                .map_err(|e| e.in_step(Step::ReadConfig))?;

            Ok(AccelConfig {
                range: AccelRange::from_code(reg.range())
                    .ok_or(invalid(registers::ACC_CONFIG, reg.range()))?,
                bandwidth: AccelBandwidth::from_code(reg.bandwidth())
                    .ok_or(invalid(registers::ACC_CONFIG, reg.bandwidth()))?,
                power: AccelPowerMode::from_code(reg.power())
                    .ok_or(invalid(registers::ACC_CONFIG, reg.power()))?,
            })
        })
    }

    /// Read the accelerometer sleep configuration from page 1
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_sleep_config(&mut self) -> Result<AccelSleepConfig, Error<I::Error>> {
        self.with_page1(|d| {
            let reg = d
                .device
                .acc_sleep_config()
                .read()
                .map_err(io(registers::ACC_SLEEP_CONFIG))
                .map_err(|e| e.in_step(Step::ReadConfig))?;

            Ok(AccelSleepConfig {
                equidistant: reg.equidistant(),
                duration: AccelSleepDuration::from_code(reg.duration()),
            })
        })
    }

    /// Read the magnetometer configuration from page 1
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn mag_config(&mut self) -> Result<MagConfig, Error<I::Error>> {
        self.with_page1(|d| {
            let reg = d
                .device
                .mag_config()
                .read()
                .map_err(io(registers::MAG_CONFIG))
                .map_err(|e| e.in_step(Step::ReadConfig))?;

            Ok(MagConfig {
                rate: MagDataRate::from_code(reg.rate())
                    .ok_or(invalid(registers::MAG_CONFIG, reg.rate()))?,
                operation: MagOperationMode::from_code(reg.operation())
                    .ok_or(invalid(registers::MAG_CONFIG, reg.operation()))?,
                power: MagPowerMode::from_code(reg.power())
                    .ok_or(invalid(registers::MAG_CONFIG, reg.power()))?,
            })
        })
    }

    /// Read the gyroscope range and bandwidth from page 1
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or a field
    /// holds a reserved code.
    pub fn gyro_config(&mut self) -> Result<GyroConfig, Error<I::Error>> {
        self.with_page1(|d| {
            let reg = d
                .device
                .gyr_config()
                .read()
                .map_err(io(registers::GYR_CONFIG_0))
                .map_err(|e| e.in_step(Step::ReadConfig))?;

            Ok(GyroConfig {
                range: GyroRange::from_code(reg.range())
                    .ok_or(invalid(registers::GYR_CONFIG_0, reg.range()))?,
                bandwidth: GyroBandwidth::from_code(reg.bandwidth())
                    .ok_or(invalid(registers::GYR_CONFIG_0, reg.bandwidth()))?,
            })
        })
    }

    /// Read the gyroscope power mode from page 1
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the power
    /// field holds a reserved code.
    pub fn gyro_power_config(&mut self) -> Result<GyroPowerConfig, Error<I::Error>> {
        self.with_page1(|d| {
            let reg = d
                .device
                .gyr_power_config()
                .read()
                .map_err(io(registers::GYR_CONFIG_1))
                .map_err(|e| e.in_step(Step::ReadConfig))?;

            Ok(GyroPowerConfig {
                power: GyroPowerMode::from_code(reg.power())
                    .ok_or(invalid(registers::GYR_CONFIG_1, reg.power()))?,
            })
        })
    }

    // ==================== DIAGNOSTICS ====================

    fn read_dump_rows(&mut self, rows: &mut [[u8; 16]; 8]) -> Result<(), Error<I::Error>> {
        for (row, base) in rows.iter_mut().zip((0u8..).step_by(16)) {
            *row = self
                .read_bytes::<16>(base)
                .map_err(|e| e.in_step(Step::Dump))?;
        }
        Ok(())
    }

    /// Dump 0x00..=0x7F of both register pages
    ///
    /// Each page switch is followed by a 50 ms settle. The device is back on
    /// page 0 afterwards, also when a read fails.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn dump_registers<D>(&mut self, delay: &mut D) -> Result<RegisterDump, Error<I::Error>>
    where
        D: DelayNs,
    {
        let mut dump = RegisterDump {
            page0: [[0; 16]; 8],
            page1: [[0; 16]; 8],
        };

        self.select_page(Page::Page0)?;
        self.read_dump_rows(&mut dump.page0)?;

        let page1 = match self.select_page(Page::Page1) {
            Ok(()) => {
                delay.delay_ms(PAGE_SWITCH_SETTLE_MS);
                self.read_dump_rows(&mut dump.page1)
            }
            Err(e) => Err(e),
        };

        let restored = self.select_page(Page::Page0);
        delay.delay_ms(PAGE_SWITCH_SETTLE_MS);

        page1?;
        restored?;
        Ok(dump)
    }

    /// Reset the device and end the session
    ///
    /// Writes `RST_SYS` to `SYS_TRIGGER` and waits for the device to boot.
    /// The interface is handed back; build a new driver to talk to the device
    /// again.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset write fails. The interface is dropped in
    /// that case.
    pub fn reset<D>(mut self, delay: &mut D) -> Result<I, Error<I::Error>>
    where
        D: DelayNs,
    {
        self.select_page(Page::Page0)?;

        #[cfg(feature = "defmt")]
        defmt::info!("Resetting BNO055");

        self.device
            .sys_trigger()
            .write(|w| {
                w.set_rst_sys(true);
            })
            .map_err(io(registers::SYS_TRIGGER))
            .map_err(|e| e.in_step(Step::Reset))?;
        delay.delay_ms(BOOT_TIME_MS);

        Ok(self.release())
    }
}
