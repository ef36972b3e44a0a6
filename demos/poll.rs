// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Resets the sensor, starts a measurement mode and prints eCO2/eTVOC
//! periodically.
//!
//! `RUST_LOG=debug cargo run --example poll -- --bus /dev/i2c-1 --mode 1`

use anyhow::Context;
use ccs811_i2c::{Ccs811, MeasurementMode, DEFAULT_ADDRESS, DEFAULT_BUS_PATH};
use clap::Parser;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Poll a CCS811 gas sensor")]
struct Args {
    /// I2C character device
    #[arg(long, default_value = DEFAULT_BUS_PATH)]
    bus: String,

    /// 7-bit slave address, 0x5A or 0x5B
    #[arg(long, default_value_t = DEFAULT_ADDRESS, value_parser = parse_address)]
    address: u8,

    /// Drive mode: 0 idle, 1 every second, 2 every 10 s, 3 every 60 s, 4 raw every 250 ms
    #[arg(long, default_value_t = 1)]
    mode: u8,

    /// Delay between two reads
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
}

fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address {}: {}", s, e))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut ccs = Ccs811::open(&args.bus, args.address)
        .with_context(|| format!("opening {}", args.bus))?;
    ccs.initialize().context("sensor not available")?;

    println!(
        "CCS811 hw {:#x} boot {:#x} app {:#x}",
        ccs.hardware_version()?,
        ccs.bootloader_version()?,
        ccs.application_version()?
    );

    ccs.start(MeasurementMode::from(args.mode))?;

    loop {
        ccs.read()?;
        println!(" CO2: {} ppm\n TVOC: {} ppb", ccs.eco2(), ccs.etvoc());
        thread::sleep(Duration::from_millis(args.interval_ms));
    }
}
