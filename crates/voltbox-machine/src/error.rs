use thiserror::Error;

pub type Result<T> = std::result::Result<T, MachineError>;

/// Capacity violations reported by the part models.
///
/// These are expected business outcomes, not faults: the command layer renders
/// them into a reply line and the session carries on. Each variant carries the
/// quantities involved so the rendered message can say exactly what did not
/// fit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    #[error("out of memory: {requested} bytes requested, {used} of {total} in use")]
    OutOfMemory { requested: u64, used: u64, total: u64 },

    #[error("disk full: {requested} bytes requested, {used} of {capacity} in use")]
    DiskFull {
        requested: u64,
        used: u64,
        capacity: u64,
    },

    #[error("power overload: drawing {draw_watts:.0} W against a {max_watts:.0} W supply")]
    PowerOverload { draw_watts: f64, max_watts: f64 },
}
