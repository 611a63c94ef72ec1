// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! General Purpose Input/Output registers.
//!
//! The nanoFOX GPIO block is four 32-bit registers with one bit per pin:
//!
//! | Register | Address      | Meaning                                  |
//! |----------|--------------|------------------------------------------|
//! | `GPI`    | `0x00020000` | level sampled on each pin                |
//! | `GPO`    | `0x00020004` | level driven on each output pin          |
//! | `GPD`    | `0x00020008` | direction, a set bit makes the pin drive |
//! | `EN`     | `0x0002000C` | enable, gates the peripheral per pin     |
//!
//! Every access is a volatile load or store of the whole word. There are no
//! masked or bit-level helpers here; callers compose reads and writes.
//!
//! ```rust,ignore
//! use nanofox::gpio::{GpioRegister, GPIO};
//!
//! GPIO.set_gpd(0x0000_ffff);
//! GPIO.set_en(0x0000_ffff);
//! GPIO.write(GpioRegister::Gpo, 0x1);
//! let levels = GPIO.gpi();
//! ```

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

use crate::StaticRef;

pub const GPIO_BASE_ADDR: usize = 0x0002_0000;

pub const GPI_ADDR: usize = GPIO_BASE_ADDR + 0x0;
pub const GPO_ADDR: usize = GPIO_BASE_ADDR + 0x4;
pub const GPD_ADDR: usize = GPIO_BASE_ADDR + 0x8;
pub const EN_ADDR: usize = GPIO_BASE_ADDR + 0xC;

register_structs! {
    /// GPIO Registers.
    pub GpioRegisters {
        /// Input value
        (0x00 => pub gpi: ReadWrite<u32, pins::Register>),
        /// Output value
        (0x04 => pub gpo: ReadWrite<u32, pins::Register>),
        /// Pin direction
        (0x08 => pub gpd: ReadWrite<u32, pins::Register>),
        /// Pin enable
        (0x0C => pub en: ReadWrite<u32, pins::Register>),
        (0x10 => @END),
    }
}

register_bitfields![u32,
    pub pins [
        pin0 0,
        pin1 1,
        pin2 2,
        pin3 3,
        pin4 4,
        pin5 5,
        pin6 6,
        pin7 7,
        pin8 8,
        pin9 9,
        pin10 10,
        pin11 11,
        pin12 12,
        pin13 13,
        pin14 14,
        pin15 15,
        pin16 16,
        pin17 17,
        pin18 18,
        pin19 19,
        pin20 20,
        pin21 21,
        pin22 22,
        pin23 23,
        pin24 24,
        pin25 25,
        pin26 26,
        pin27 27,
        pin28 28,
        pin29 29,
        pin30 30,
        pin31 31
    ]
];

pub const GPIO_BASE: StaticRef<GpioRegisters> =
    unsafe { StaticRef::new(GPIO_BASE_ADDR as *const GpioRegisters) };

/// The GPIO block of the SoC.
pub const GPIO: Gpio = Gpio::new(GPIO_BASE);

/// Names one of the four GPIO registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GpioRegister {
    Gpi,
    Gpo,
    Gpd,
    En,
}

impl GpioRegister {
    /// All registers, in address order.
    pub const ALL: [GpioRegister; 4] = [
        GpioRegister::Gpi,
        GpioRegister::Gpo,
        GpioRegister::Gpd,
        GpioRegister::En,
    ];

    /// Byte offset from `GPIO_BASE_ADDR`.
    pub const fn offset(self) -> usize {
        match self {
            GpioRegister::Gpi => 0x0,
            GpioRegister::Gpo => 0x4,
            GpioRegister::Gpd => 0x8,
            GpioRegister::En => 0xC,
        }
    }

    /// Absolute bus address.
    pub const fn address(self) -> usize {
        GPIO_BASE_ADDR + self.offset()
    }

    pub const fn name(self) -> &'static str {
        match self {
            GpioRegister::Gpi => "GPI",
            GpioRegister::Gpo => "GPO",
            GpioRegister::Gpd => "GPD",
            GpioRegister::En => "EN",
        }
    }
}

/// Word access to a GPIO register block.
#[derive(Clone, Copy)]
pub struct Gpio {
    registers: StaticRef<GpioRegisters>,
}

impl Gpio {
    pub const fn new(base: StaticRef<GpioRegisters>) -> Gpio {
        Gpio { registers: base }
    }

    fn register(&self, register: GpioRegister) -> &ReadWrite<u32, pins::Register> {
        let regs = &*self.registers;

        match register {
            GpioRegister::Gpi => &regs.gpi,
            GpioRegister::Gpo => &regs.gpo,
            GpioRegister::Gpd => &regs.gpd,
            GpioRegister::En => &regs.en,
        }
    }

    /// Load `register` from the bus.
    ///
    /// The load always happens, even when the value is discarded.
    pub fn read(&self, register: GpioRegister) -> u32 {
        self.register(register).get()
    }

    /// Store `value` to `register`.
    pub fn write(&self, register: GpioRegister, value: u32) {
        self.register(register).set(value);
    }

    pub fn gpi(&self) -> u32 {
        self.registers.gpi.get()
    }

    /// Writes to the input register. The hardware decides what, if anything,
    /// this does.
    pub fn set_gpi(&self, value: u32) {
        self.registers.gpi.set(value);
    }

    pub fn gpo(&self) -> u32 {
        self.registers.gpo.get()
    }

    pub fn set_gpo(&self, value: u32) {
        self.registers.gpo.set(value);
    }

    pub fn gpd(&self) -> u32 {
        self.registers.gpd.get()
    }

    pub fn set_gpd(&self, value: u32) {
        self.registers.gpd.set(value);
    }

    pub fn en(&self) -> u32 {
        self.registers.en.get()
    }

    pub fn set_en(&self, value: u32) {
        self.registers.en.set(value);
    }
}
