use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cpu::{Cpu, CpuConfig};
use crate::disk::Disk;
use crate::error::Result;
use crate::gpu::{Gpu, GpuConfig, RenderOutcome};
use crate::psu::Psu;
use crate::ram::Ram;
use crate::units::{mib, tib};

/// Marketing name of the simulated rig, reported by `status`.
pub const PC_MODEL: &str = "Ragevolt SNC1";

/// Boot workload: instructions retired while "bringing up" the machine.
pub const BOOT_INSTRUCTIONS: u64 = 5_000_000;
/// RAM reserved by the boot sequence.
pub const BOOT_RAM_BYTES: u64 = mib(512);
/// Disk consumed by the boot sequence.
pub const BOOT_DISK_BYTES: u64 = mib(256);

/// Capacities and identities for every part of the rig.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    pub cpu: CpuConfig,
    pub gpu: GpuConfig,
    pub ram_bytes: u64,
    pub disk_bytes: u64,
    pub psu_max_watts: f64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            cpu: CpuConfig::default(),
            gpu: GpuConfig::default(),
            ram_bytes: mib(512 * 1024),
            disk_bytes: tib(50),
            psu_max_watts: 2000.0,
        }
    }
}

/// Read-only snapshot of every counter, for status formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineStatus {
    pub cpu_cycles: u64,
    pub vram_used: u64,
    pub vram_total: u64,
    pub ram_used: u64,
    pub ram_total: u64,
    pub disk_used: u64,
    pub disk_total: u64,
}

/// The whole simulated rig: one CPU, GPU, RAM bank, virtual disk and PSU.
///
/// The machine owns the rng that feeds the GPU's sampled draw amounts, so a
/// seeded machine ([`Machine::with_rng_seed`]) behaves deterministically.
/// Callers that share a machine across sessions wrap it in a mutex; every
/// method takes `&mut self` (or `&self` for reads) and completes its
/// check-then-mutate in one call.
#[derive(Debug)]
pub struct Machine {
    cpu: Cpu,
    gpu: Gpu,
    ram: Ram,
    disk: Disk,
    psu: Psu,
    rng: StdRng,
}

impl Machine {
    pub fn new(config: MachineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn with_rng_seed(config: MachineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: MachineConfig, rng: StdRng) -> Self {
        Self {
            cpu: Cpu::new(config.cpu),
            gpu: Gpu::new(config.gpu),
            ram: Ram::new(config.ram_bytes),
            disk: Disk::new(config.disk_bytes),
            psu: Psu::new(config.psu_max_watts),
            rng,
        }
    }

    /// Runs the boot workload: retire [`BOOT_INSTRUCTIONS`], reserve
    /// [`BOOT_RAM_BYTES`] and write [`BOOT_DISK_BYTES`]. Fails only when a
    /// configured capacity cannot even hold the boot footprint.
    pub fn boot(&mut self) -> Result<()> {
        self.cpu.execute(BOOT_INSTRUCTIONS);
        self.ram.alloc(BOOT_RAM_BYTES)?;
        self.disk.write(BOOT_DISK_BYTES)?;
        Ok(())
    }

    /// Renders one frame on the GPU, drawing the sampled amount from the
    /// machine's rng.
    pub fn render(&mut self, raytracing: bool) -> RenderOutcome {
        self.gpu.render(&mut self.rng, raytracing)
    }

    /// Clears a sampled amount of VRAM; returns the bytes actually freed.
    pub fn clear_vram(&mut self) -> u64 {
        self.gpu.clear(&mut self.rng)
    }

    pub fn status(&self) -> MachineStatus {
        MachineStatus {
            cpu_cycles: self.cpu.cycles(),
            vram_used: self.gpu.used(),
            vram_total: self.gpu.vram_bytes(),
            ram_used: self.ram.used(),
            ram_total: self.ram.total(),
            disk_used: self.disk.used(),
            disk_total: self.disk.capacity(),
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }

    pub fn disk(&self) -> &Disk {
        &self.disk
    }

    pub fn disk_mut(&mut self) -> &mut Disk {
        &mut self.disk
    }

    pub fn psu(&self) -> &Psu {
        &self.psu
    }
}
