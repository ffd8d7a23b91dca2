//! Simulated PC hardware accounting for VoltBox.
//!
//! Every part model here is a synthetic counter, not a real resource: the CPU
//! accumulates cycles, the GPU/RAM/disk track `used` against a fixed capacity,
//! and the PSU is a stateless headroom check. [`Machine`] composes one of each
//! into the single rig that both front-ends (local shell, network server)
//! operate on.
//!
//! This crate is pure state + transitions: no I/O, no logging, no formatting
//! beyond [`units::fmt_gib`]. Capacity violations come back as values
//! ([`MachineError`], [`RenderOutcome::Overloaded`]) and a rejected operation
//! never leaves a partial mutation behind.

#![forbid(unsafe_code)]

mod cpu;
mod disk;
mod error;
mod gpu;
mod machine;
mod psu;
mod ram;
pub mod units;

pub use cpu::{Cpu, CpuConfig};
pub use disk::Disk;
pub use error::{MachineError, Result};
pub use gpu::{Gpu, GpuConfig, RenderOutcome};
pub use machine::{
    Machine, MachineConfig, MachineStatus, BOOT_DISK_BYTES, BOOT_INSTRUCTIONS, BOOT_RAM_BYTES,
    PC_MODEL,
};
pub use psu::Psu;
pub use ram::Ram;

#[cfg(test)]
mod proptests;
