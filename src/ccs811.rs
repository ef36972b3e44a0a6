// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::bus::{LinuxBus, RegisterBus};
use crate::registers::{
    ErrorFlags, Register, StatusFlags, HW_ID, HW_VERSION_MAJOR, HW_VERSION_MASK,
    SW_RESET_SEQUENCE, WAIT_AFTER_APP_START, WAIT_AFTER_RESET,
};
use i2cdev::linux::LinuxI2CError;
use log::{debug, info, warn};
use std::thread;
use thiserror::Error;

///
///CCS811 error enum. BusFault wraps the error of the
///underlying bus, the verification variants carry the
///byte the device answered during initialization
///
#[derive(Debug, Error)]
pub enum Ccs811Error<E> {
    /// Transport level failure, the whole sequence has to be retried
    #[error("bus fault: {0}")]
    BusFault(#[source] E),
    /// HW_ID is not 0x81
    #[error("wrong hardware id {0:#04x}")]
    WrongHardwareId(u8),
    /// HW_VERSION major nibble is not 0x1
    #[error("wrong hardware version {0:#04x}")]
    WrongHardwareVersion(u8),
    /// Status after reset is not boot mode with a valid application
    #[error("not in boot mode or no valid application, status {0:#04x}")]
    NotInBootModeOrNoApp(u8),
    /// Status after APP_START is not application mode
    #[error("application start failed, status {0:#04x}")]
    AppStartFailed(u8),
    /// `start`/`read` called before a successful `initialize`
    #[error("driver is {0:?}, operation needs application mode")]
    NotInAppMode(DriverState),
}

pub type Result<T, E> = std::result::Result<T, Ccs811Error<E>>;

/// Firmware state of the device as seen by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, or reset write failed
    Uninitialized,
    /// Reset done, application not (yet) started
    BootMode,
    /// Application firmware running, measurements available
    AppMode,
}

/// Drive mode written to MEAS_MODE bits 4-6.
///
/// Any `u8` converts without validation, the device reports
/// unsupported modes through ERROR_ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementMode(pub u8);

impl MeasurementMode {
    pub const IDLE: MeasurementMode = MeasurementMode(0);
    pub const EVERY_SECOND: MeasurementMode = MeasurementMode(1);
    pub const EVERY_10_SECONDS: MeasurementMode = MeasurementMode(2);
    pub const EVERY_60_SECONDS: MeasurementMode = MeasurementMode(3);
    /// Raw data only, every 250 ms
    pub const RAW_EVERY_250MS: MeasurementMode = MeasurementMode(4);

    /// MEAS_MODE register value. Interrupt and threshold bits stay clear.
    pub fn register_value(self) -> u8 {
        self.0.wrapping_shl(4)
    }
}

impl From<u8> for MeasurementMode {
    fn from(mode: u8) -> Self {
        MeasurementMode(mode)
    }
}

/// Last sample decoded from ALG_RESULT_DATA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurement {
    /// Equivalent CO2, ppm
    pub eco2: u16,
    /// Equivalent total VOC, ppb
    pub etvoc: u16,
    /// RAW_DATA word
    pub raw: u16,
}

impl Measurement {
    /// Decodes the 8 byte ALG_RESULT_DATA block.
    /// Bytes 4 and 5 (status, error id) are not part of the sample.
    pub fn from_result_data(data: &[u8; 8]) -> Measurement {
        Measurement {
            eco2: u16::from_be_bytes([data[0], data[1]]),
            etvoc: u16::from_be_bytes([data[2], data[3]]),
            raw: u16::from_be_bytes([data[6], data[7]]),
        }
    }

    /// Sensor current, upper 6 bits of the raw word, in uA.
    pub fn raw_current(&self) -> u8 {
        (self.raw >> 10) as u8
    }

    /// Sensor voltage ADC reading, lower 10 bits of the raw word.
    pub fn raw_voltage(&self) -> u16 {
        self.raw & 0x03FF
    }
}

/// CCS811 Struct, owns a register bus and
/// implements the boot handshake and
/// measurement polling
///
pub struct Ccs811<B> {
    bus: B,
    address: u8,
    state: DriverState,
    app_version: Option<u16>,
    measurement: Measurement,
    last_status: Option<StatusFlags>,
}

impl Ccs811<LinuxBus> {
    /// Create a new CCS811 Struct on a Linux I2C bus
    ///
    /// Opens `path` (usually [`crate::DEFAULT_BUS_PATH`]) with `address` selected.
    /// If fails, return an LinuxI2CError from i2cdev
    ///
    pub fn open(path: &str, address: u8) -> std::result::Result<Self, LinuxI2CError> {
        Ok(Ccs811::new(LinuxBus::open(path, address)?, address))
    }
}

impl<B: RegisterBus> Ccs811<B> {
    /// Wraps `bus` for the device at the 7-bit `address`. No bus traffic.
    pub fn new(bus: B, address: u8) -> Self {
        Ccs811 {
            bus,
            address,
            state: DriverState::Uninitialized,
            app_version: None,
            measurement: Measurement::default(),
            last_status: None,
        }
    }

    /// Gives the bus back.
    pub fn release(self) -> B {
        self.bus
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Application firmware version cached by `initialize`.
    pub fn app_version(&self) -> Option<u16> {
        self.app_version
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    pub fn eco2(&self) -> u16 {
        self.measurement.eco2
    }

    pub fn etvoc(&self) -> u16 {
        self.measurement.etvoc
    }

    pub fn raw(&self) -> u16 {
        self.measurement.raw
    }

    /// Status byte seen by the last `read`, whatever its value.
    pub fn last_status(&self) -> Option<StatusFlags> {
        self.last_status
    }

    fn write(&mut self, register: Register, bytes: &[u8]) -> Result<(), B::Error> {
        self.bus
            .write_register(self.address, register.address(), bytes)
            .map_err(Ccs811Error::BusFault)
    }

    fn read_byte(&mut self, register: Register) -> Result<u8, B::Error> {
        let mut data = [0u8; 1];
        self.bus
            .read_register(self.address, register.address(), &mut data)
            .map_err(Ccs811Error::BusFault)?;
        Ok(data[0])
    }

    fn read_word(&mut self, register: Register) -> Result<u16, B::Error> {
        let mut data = [0u8; 2];
        self.bus
            .read_register(self.address, register.address(), &mut data)
            .map_err(Ccs811Error::BusFault)?;
        Ok(u16::from_be_bytes(data))
    }

    /// Resets the device, checks its identity and switches it
    /// from boot mode to application mode.
    ///
    /// Stops at the first check that fails, the device is then
    /// in an unknown state and the whole sequence has to be run again.
    ///
    pub fn initialize(&mut self) -> Result<(), B::Error> {
        self.state = DriverState::Uninitialized;
        self.write(Register::SwReset, &SW_RESET_SEQUENCE)?;
        self.state = DriverState::BootMode;
        thread::sleep(WAIT_AFTER_RESET);

        let hw_id = self.read_byte(Register::HwId)?;
        if hw_id != HW_ID {
            warn!("ccs811: wrong HW_ID {:#04x}", hw_id);
            return Err(Ccs811Error::WrongHardwareId(hw_id));
        }
        debug!("ccs811: HW_ID {:#04x}", hw_id);

        let hw_version = self.read_byte(Register::HwVersion)?;
        if hw_version & HW_VERSION_MASK != HW_VERSION_MAJOR {
            warn!("ccs811: wrong HW_VERSION {:#04x}", hw_version);
            return Err(Ccs811Error::WrongHardwareVersion(hw_version));
        }
        debug!("ccs811: HW_VERSION {:#04x}", hw_version);

        let status = self.read_byte(Register::Status)?;
        if status != StatusFlags::BOOT_MODE_APP_VALID.bits() {
            warn!("ccs811: not in boot mode, or no valid app, status {:#04x}", status);
            return Err(Ccs811Error::NotInBootModeOrNoApp(status));
        }

        let app_version = self.read_word(Register::FwAppVersion)?;
        self.app_version = Some(app_version);
        debug!("ccs811: application version {:#x}", app_version);

        self.write(Register::AppStart, &[])?;
        thread::sleep(WAIT_AFTER_APP_START);

        let status = self.read_byte(Register::Status)?;
        if status != StatusFlags::OK_NO_DATA.bits() {
            warn!("ccs811: application did not start, status {:#04x}", status);
            return Err(Ccs811Error::AppStartFailed(status));
        }

        self.state = DriverState::AppMode;
        debug!("ccs811: application mode");
        Ok(())
    }

    fn ensure_app_mode(&self) -> Result<(), B::Error> {
        match self.state {
            DriverState::AppMode => Ok(()),
            state => Err(Ccs811Error::NotInAppMode(state)),
        }
    }

    /// Switches the device to `mode`, e.g. `MeasurementMode::EVERY_SECOND`
    /// or a plain `1`.
    ///
    pub fn start(&mut self, mode: impl Into<MeasurementMode>) -> Result<(), B::Error> {
        self.ensure_app_mode()?;
        let mode = mode.into();
        self.write(Register::MeasMode, &[mode.register_value()])
    }

    /// Polls the status register and, when a new sample is ready,
    /// updates eCO2, eTVOC and raw from ALG_RESULT_DATA.
    ///
    /// Any status other than data ready leaves the last sample untouched.
    /// It can be inspected through `last_status`.
    ///
    pub fn read(&mut self) -> Result<(), B::Error> {
        self.ensure_app_mode()?;
        let status = StatusFlags::from_bits_retain(self.read_byte(Register::Status)?);
        self.last_status = Some(status);

        if status == StatusFlags::OK {
            let mut data = [0u8; 8];
            self.bus
                .read_register(self.address, Register::AlgResultData.address(), &mut data)
                .map_err(Ccs811Error::BusFault)?;
            self.measurement = Measurement::from_result_data(&data);
        } else if status == StatusFlags::OK_NO_DATA {
            info!("ccs811: waiting for (new) data");
        }
        Ok(())
    }

    /// Reads HW_VERSION.
    pub fn hardware_version(&mut self) -> Result<u8, B::Error> {
        self.read_byte(Register::HwVersion)
    }

    /// Reads FW_BOOT_VERSION.
    pub fn bootloader_version(&mut self) -> Result<u16, B::Error> {
        self.read_word(Register::FwBootVersion)
    }

    /// Reads FW_APP_VERSION.
    pub fn application_version(&mut self) -> Result<u16, B::Error> {
        self.read_word(Register::FwAppVersion)
    }

    /// Reads ERROR_ID. The device clears the register on read,
    /// a second call returns 0 for the same error.
    ///
    pub fn error_id(&mut self) -> Result<u8, B::Error> {
        self.read_byte(Register::ErrorId)
    }

    /// `error_id` decoded, same clear-on-read caveat.
    pub fn error_flags(&mut self) -> Result<ErrorFlags, B::Error> {
        Ok(ErrorFlags::from_bits_retain(self.error_id()?))
    }
}
