// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Register-addressed bus transport used by the driver.

use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};

/// Bus able to write and read register mailboxes of an I2C slave.
///
/// Implementations either complete the whole transaction or fail with
/// `Self::Error` (NACK, timeout, arbitration loss...).
pub trait RegisterBus {
    type Error: std::error::Error + 'static;

    /// Writes `bytes` to `register` of the slave at `address`.
    /// An empty `bytes` only addresses the register.
    fn write_register(&mut self, address: u8, register: u8, bytes: &[u8])
        -> Result<(), Self::Error>;

    /// Fills `buf` with `buf.len()` bytes read from `register` of the slave at `address`.
    fn read_register(&mut self, address: u8, register: u8, buf: &mut [u8])
        -> Result<(), Self::Error>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    type Error = B::Error;

    fn write_register(&mut self, address: u8, register: u8, bytes: &[u8]) -> Result<(), B::Error> {
        (**self).write_register(address, register, bytes)
    }

    fn read_register(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), B::Error> {
        (**self).read_register(address, register, buf)
    }
}

/// Linux `/dev/i2c-N` character device.
///
/// The slave address is bound per transaction, so one bus handle can be
/// moved between drivers talking to different addresses.
pub struct LinuxBus {
    pub i2cdev: LinuxI2CDevice,
    selected: u16,
}

impl LinuxBus {
    /// Opens the bus at `path` with `address` selected.
    pub fn open(path: &str, address: u8) -> Result<LinuxBus, LinuxI2CError> {
        let device = LinuxI2CDevice::new(path, u16::from(address))?;
        Ok(LinuxBus {
            i2cdev: device,
            selected: u16::from(address),
        })
    }

    fn select(&mut self, address: u8) -> Result<(), LinuxI2CError> {
        let address = u16::from(address);
        if self.selected != address {
            self.i2cdev.set_slave_address(address)?;
            self.selected = address;
        }
        Ok(())
    }
}

impl RegisterBus for LinuxBus {
    type Error = LinuxI2CError;

    fn write_register(
        &mut self,
        address: u8,
        register: u8,
        bytes: &[u8],
    ) -> Result<(), LinuxI2CError> {
        self.select(address)?;
        let mut buffer = Vec::with_capacity(bytes.len() + 1);
        buffer.push(register);
        buffer.extend_from_slice(bytes);
        self.i2cdev.write(&buffer)
    }

    fn read_register(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), LinuxI2CError> {
        self.select(address)?;
        // CCS811 latches the mailbox id, no repeated start needed
        self.i2cdev.write(&[register])?;
        self.i2cdev.read(buf)
    }
}
