// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! CCS811 driver implementing the boot handshake and polled measurements
//! of the CCS811 I2C gas sensor
//!
//! Operations taken from the [datasheet](https://www.sciosense.com/wp-content/uploads/documents/SC-001232-DS-3-CCS811B-Datasheet-Revision-2.pdf)
//! **IMPORTANT**
//! Only the basic operations are implemented. Environment compensation,
//! baseline handling and interrupt thresholds are not.
//!
//! ## Basic Example
//!
//! Obtaining measurements, eCO2 and eTVOC
//!
//!
//!```no_run
//!use ccs811_i2c::ccs811::{Ccs811, MeasurementMode};
//!use ccs811_i2c::{DEFAULT_ADDRESS, DEFAULT_BUS_PATH};
//!use std::thread;
//!use std::time::Duration;
//!
//!fn main() {
//!    // Open the I2C device
//!    let mut ccs = Ccs811::open(DEFAULT_BUS_PATH, DEFAULT_ADDRESS).unwrap();
//!    if let Err(e) = ccs.initialize() {
//!        println!("Sensor not available: {}", e);
//!        return;
//!    }
//!    ccs.start(MeasurementMode::EVERY_SECOND).unwrap();
//!
//!    loop {
//!        match ccs.read() {
//!            Ok(()) => println!("CO2: {} ppm TVOC: {} ppb", ccs.eco2(), ccs.etvoc()),
//!            Err(e) => println!("Error obtaining measurements. More details: {}", e),
//!        }
//!        thread::sleep(Duration::from_secs(1));
//!    }
//!}
//!```
//!

/// Register map, status and error flags
pub mod registers;

/// Register-addressed bus transport and its Linux implementation
pub mod bus;

/// Driver implementing CCS811 device related operations
pub mod ccs811;

pub use bus::{LinuxBus, RegisterBus};
pub use ccs811::{Ccs811, Ccs811Error, DriverState, Measurement, MeasurementMode};
pub use registers::{ErrorFlags, Register, StatusFlags, ALTERNATE_ADDRESS, DEFAULT_ADDRESS};

/// I2C bus the sensor usually sits on (Raspberry Pi header pins 3 and 5)
pub const DEFAULT_BUS_PATH: &str = "/dev/i2c-1";
