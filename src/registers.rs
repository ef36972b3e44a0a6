// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! CCS811 register map and the bit layouts of its status and error registers.
//!
//! Addresses and widths from the CCS811 datasheet (DS000459), section 8.

use bitflags::bitflags;
use std::time::Duration;

/// Factory default slave address (ADDR pin low).
pub const DEFAULT_ADDRESS: u8 = 0x5A;
/// Slave address with the ADDR pin pulled high.
pub const ALTERNATE_ADDRESS: u8 = 0x5B;

/// Expected content of the HW_ID register.
pub const HW_ID: u8 = 0x81;
/// Expected upper nibble of the HW_VERSION register.
pub const HW_VERSION_MAJOR: u8 = 0x10;
/// Mask selecting the major version nibble of HW_VERSION.
pub const HW_VERSION_MASK: u8 = 0xF0;

/// Magic payload written to SW_RESET. Any other sequence is ignored by the device.
pub const SW_RESET_SEQUENCE: [u8; 4] = [0x11, 0xE5, 0x72, 0x8A];

/// Settle time after a software reset.
pub const WAIT_AFTER_RESET: Duration = Duration::from_micros(2000);
/// Settle time after APP_START.
pub const WAIT_AFTER_APP_START: Duration = Duration::from_micros(1000);

/// Registers (mailboxes) of the CCS811.
///
/// ```
/// use ccs811_i2c::registers::Register;
///
/// assert_eq!(Register::AlgResultData.address(), 0x02);
/// assert_eq!(Register::AlgResultData.width(), 8);
/// assert_eq!(Register::AppStart.width(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    Status = 0x00,
    MeasMode = 0x01,
    /// eCO2, eTVOC, status, error id and raw data
    AlgResultData = 0x02,
    RawData = 0x03,
    /// Humidity and temperature compensation
    EnvData = 0x05,
    Thresholds = 0x10,
    Baseline = 0x11,
    HwId = 0x20,
    HwVersion = 0x21,
    FwBootVersion = 0x23,
    FwAppVersion = 0x24,
    /// Self-clearing on read
    ErrorId = 0xE0,
    /// Trigger only, written with no payload
    AppStart = 0xF4,
    SwReset = 0xFF,
}

impl Register {
    /// One byte mailbox address.
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Number of bytes the mailbox holds, 0 for trigger registers.
    pub const fn width(self) -> usize {
        match self {
            Register::Status
            | Register::MeasMode
            | Register::HwId
            | Register::HwVersion
            | Register::ErrorId => 1,
            Register::AlgResultData => 8,
            Register::RawData
            | Register::Baseline
            | Register::FwBootVersion
            | Register::FwAppVersion => 2,
            Register::EnvData | Register::SwReset => 4,
            Register::Thresholds => 5,
            Register::AppStart => 0,
        }
    }
}

bitflags! {
    /// Bits of the STATUS register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u8 {
        /// ERROR_ID holds a pending error
        const ERROR = 0x01;
        /// A new sample is ready in ALG_RESULT_DATA
        const DATA_READY = 0x08;
        /// Valid application firmware loaded
        const APP_VALID = 0x10;
        /// Firmware is in application mode, not boot mode
        const FW_MODE = 0x80;
    }
}

impl StatusFlags {
    /// Application running and a fresh sample available.
    pub const OK: StatusFlags = StatusFlags::DATA_READY
        .union(StatusFlags::APP_VALID)
        .union(StatusFlags::FW_MODE);
    /// Application running, no sample yet.
    pub const OK_NO_DATA: StatusFlags = StatusFlags::APP_VALID.union(StatusFlags::FW_MODE);
    /// Right after reset: boot mode with a valid application image.
    pub const BOOT_MODE_APP_VALID: StatusFlags = StatusFlags::APP_VALID;
}

bitflags! {
    /// Bits of the ERROR_ID register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ErrorFlags: u8 {
        /// Write to an invalid register address
        const WRITE_REG_INVALID = 0x01;
        /// Read from an invalid mailbox
        const READ_REG_INVALID = 0x02;
        /// Unsupported mode written to MEAS_MODE
        const MEASMODE_INVALID = 0x04;
        /// Sensor resistance reached or exceeded the maximum range
        const MAX_RESISTANCE = 0x08;
        /// Heater current out of range
        const HEATER_FAULT = 0x10;
        /// Heater voltage not applied correctly
        const HEATER_SUPPLY = 0x20;
    }
}
