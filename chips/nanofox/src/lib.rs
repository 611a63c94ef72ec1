// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Peripheral definitions for the nanoFOX RISC-V SoC.

#![no_std]
#![crate_name = "nanofox"]
#![crate_type = "rlib"]

pub mod gpio;

mod static_ref;
pub use static_ref::StaticRef;
