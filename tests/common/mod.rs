// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

#![allow(dead_code)]

use ccs811_i2c::RegisterBus;
use std::collections::VecDeque;
use std::io;

pub const ADDRESS: u8 = 0x5A;

/// One bus transaction, as expected or as observed.
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    Write(u8, Vec<u8>),
    Read(u8, Vec<u8>),
    /// Transaction on `register` fails with a bus error
    Fault(u8),
}

impl Transaction {
    fn register(&self) -> u8 {
        match self {
            Transaction::Write(r, _) | Transaction::Read(r, _) | Transaction::Fault(r) => *r,
        }
    }
}

/// Bus replaying a script of transactions and recording what the driver did.
#[derive(Debug, Default)]
pub struct ScriptedBus {
    script: VecDeque<Transaction>,
    pub log: Vec<Transaction>,
}

impl ScriptedBus {
    pub fn new(script: Vec<Transaction>) -> Self {
        ScriptedBus {
            script: script.into(),
            log: Vec::new(),
        }
    }

    pub fn push(&mut self, transaction: Transaction) {
        self.script.push_back(transaction);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Number of recorded transactions on `register`.
    pub fn count(&self, register: u8) -> usize {
        self.log.iter().filter(|t| t.register() == register).count()
    }

    fn next(&mut self, address: u8, register: u8) -> Transaction {
        assert_eq!(address, ADDRESS, "unexpected slave address");
        let expected = self
            .script
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected transaction on register {:#04x}", register));
        assert_eq!(expected.register(), register, "register mismatch");
        expected
    }
}

fn fault() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "nack")
}

impl RegisterBus for ScriptedBus {
    type Error = io::Error;

    fn write_register(&mut self, address: u8, register: u8, bytes: &[u8]) -> io::Result<()> {
        match self.next(address, register) {
            Transaction::Write(_, expected) => {
                assert_eq!(expected, bytes, "write payload on {:#04x}", register);
                self.log.push(Transaction::Write(register, bytes.to_vec()));
                Ok(())
            }
            Transaction::Fault(_) => {
                self.log.push(Transaction::Fault(register));
                Err(fault())
            }
            other => panic!("expected {:?}, got write on {:#04x}", other, register),
        }
    }

    fn read_register(&mut self, address: u8, register: u8, buf: &mut [u8]) -> io::Result<()> {
        match self.next(address, register) {
            Transaction::Read(_, reply) => {
                assert_eq!(reply.len(), buf.len(), "read length on {:#04x}", register);
                buf.copy_from_slice(&reply);
                self.log.push(Transaction::Read(register, reply));
                Ok(())
            }
            Transaction::Fault(_) => {
                self.log.push(Transaction::Fault(register));
                Err(fault())
            }
            other => panic!("expected {:?}, got read on {:#04x}", other, register),
        }
    }
}

/// Transactions of a handshake that succeeds with application version `app`.
pub fn boot_script(app: [u8; 2]) -> Vec<Transaction> {
    vec![
        Transaction::Write(0xFF, vec![0x11, 0xE5, 0x72, 0x8A]),
        Transaction::Read(0x20, vec![0x81]),
        Transaction::Read(0x21, vec![0x12]),
        Transaction::Read(0x00, vec![0x10]),
        Transaction::Read(0x24, app.to_vec()),
        Transaction::Write(0xF4, vec![]),
        Transaction::Read(0x00, vec![0x90]),
    ]
}
