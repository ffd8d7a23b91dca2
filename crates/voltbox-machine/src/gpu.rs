use std::ops::RangeInclusive;

use rand::Rng;

use crate::units::mib;

/// Identity and draw characteristics of the simulated GPU.
///
/// `render_draw` and `clear_draw` are the byte ranges a single render call may
/// consume and a clear call may release. They scale with the card tier; the
/// exact amount drawn from the range is sampled from the caller's rng.
#[derive(Debug, Clone)]
pub struct GpuConfig {
    pub model: String,
    pub vram_bytes: u64,
    pub render_draw: RangeInclusive<u64>,
    pub clear_draw: RangeInclusive<u64>,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            model: "NVIDIA Tesla T4".to_string(),
            vram_bytes: mib(16 * 1024),
            render_draw: mib(256)..=mib(512),
            clear_draw: mib(128)..=mib(256),
        }
    }
}

/// Outcome of a render attempt. An overloaded render is a signal, not an
/// error: VRAM stays exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { used: u64 },
    Overloaded,
}

#[derive(Debug)]
pub struct Gpu {
    config: GpuConfig,
    used: u64,
}

impl Gpu {
    pub fn new(config: GpuConfig) -> Self {
        Self { config, used: 0 }
    }

    /// Renders one frame, consuming a sampled amount of VRAM.
    ///
    /// If the sampled amount would push `used` past capacity the frame is
    /// dropped and nothing changes. `raytracing` only affects how callers
    /// describe the frame.
    pub fn render<R: Rng + ?Sized>(&mut self, rng: &mut R, _raytracing: bool) -> RenderOutcome {
        let usage = rng.gen_range(self.config.render_draw.clone());
        match self.used.checked_add(usage) {
            Some(next) if next <= self.config.vram_bytes => {
                self.used = next;
                RenderOutcome::Rendered { used: next }
            }
            _ => RenderOutcome::Overloaded,
        }
    }

    /// Releases a sampled amount of VRAM, clamped at zero. Returns the bytes
    /// actually freed.
    pub fn clear<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u64 {
        let freed = rng.gen_range(self.config.clear_draw.clone());
        let before = self.used;
        self.used = self.used.saturating_sub(freed);
        before - self.used
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn vram_bytes(&self) -> u64 {
        self.config.vram_bytes
    }

    pub fn config(&self) -> &GpuConfig {
        &self.config
    }
}
