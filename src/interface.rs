//! Bus interface implementation for the BNO055
//!
//! This module provides the `device-driver` register interface over I2C.

use crate::{CALIB_BYTECOUNT, I2C_ADDRESS_ALTERNATE, I2C_ADDRESS_PRIMARY};
use device_driver::RegisterInterface;

/// I2C interface for the BNO055
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x28, COM3 pin LOW)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut imu = Bno055Driver::new(interface)?;
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_PRIMARY,
        }
    }

    /// Create a new I2C interface with the alternative address (0x29, COM3 pin HIGH)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_ALTERNATE,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// For standard BNO055 wiring, prefer [`default()`](Self::default)
    /// or [`alternative()`](Self::alternative).
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The bound 7-bit device address
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        // Address write and data read are separate transfers; no read without a pointer
        self.i2c.write(self.address, &[address])?;
        self.i2c.read(self.address, read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        // Largest burst is the calibration block
        debug_assert!(write_data.len() <= CALIB_BYTECOUNT);
        let mut buffer = [0u8; 1 + CALIB_BYTECOUNT];
        buffer[0] = address;
        let len = write_data.len().min(CALIB_BYTECOUNT);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}
