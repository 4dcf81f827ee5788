//! Opening a BNO055 on a Linux I2C character device
//!
//! Available with the `linux` feature.

use crate::{Bno055Driver, Error, I2C_ADDRESS_ALTERNATE, I2C_ADDRESS_PRIMARY, I2cInterface};
use linux_embedded_hal::{I2CError, I2cdev};
use std::path::Path;

/// Driver bound to a `/dev/i2c-N` bus
pub type LinuxDriver = Bno055Driver<I2cInterface<I2cdev>>;

/// Open `bus_path`, bind `address` and probe the device
///
/// # Errors
///
/// Returns an error if:
/// - `address` is neither 0x28 nor 0x29
/// - The bus device cannot be opened
/// - The probe read fails or finds a different chip
///
/// # Example
/// ```ignore
/// let mut imu = bno055::linux::open("/dev/i2c-1", bno055::I2C_ADDRESS_PRIMARY)?;
/// ```
pub fn open<P: AsRef<Path>>(bus_path: P, address: u8) -> Result<LinuxDriver, Error<I2CError>> {
    if address != I2C_ADDRESS_PRIMARY && address != I2C_ADDRESS_ALTERNATE {
        return Err(Error::InvalidAddress(address));
    }

    let bus = I2cdev::new(bus_path).map_err(I2CError::from)?;
    Bno055Driver::new(I2cInterface::new(bus, address))
}
