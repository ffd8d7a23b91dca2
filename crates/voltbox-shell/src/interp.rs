use voltbox_machine::units::{fmt_gib, gib, mib};
use voltbox_machine::{Machine, RenderOutcome, PC_MODEL};

use crate::command::{Command, Profile};

/// Greeting sent to every client before its first command.
pub const WELCOME: &str = "Welcome to VoltBox. Type 'help' for commands.";
/// Reply for anything that does not parse into an allowed command.
pub const UNKNOWN_COMMAND: &str = "unknown command";
/// Final reply to a `shutdown` command.
pub const FAREWELL: &str = "shutting down";

// Fixed amounts moved per command. These are configuration, not user input:
// no command accepts arguments.
const RAM_QUANTUM: u64 = gib(1);
const DISK_WRITE_QUANTUM: u64 = gib(10);
const DISK_DELETE_QUANTUM: u64 = gib(5);

// The `play` workload: one game session.
const PLAY_INSTRUCTIONS: u64 = 120_000_000;
const PLAY_RAM_BYTES: u64 = mib(8192);
const PLAY_GPU_WATTS: f64 = 70.0;

// The `benchmark` workload pushes the CPU and assumes a GPU under load.
const BENCH_INSTRUCTIONS: u64 = 2_000_000_000;
const BENCH_GPU_WATTS: f64 = 250.0;

/// What the caller's read loop should do after sending the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Shutdown,
}

/// Reply text plus the loop control signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub control: Control,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            control: Control::Continue,
        }
    }
}

/// Executes command lines against a machine on behalf of one front-end.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter {
    profile: Profile,
}

impl Interpreter {
    pub const fn new(profile: Profile) -> Self {
        Self { profile }
    }

    /// Runs one input line. Unknown or out-of-profile input gets the fixed
    /// [`UNKNOWN_COMMAND`] reply; capacity failures become reply text. The
    /// only non-`Continue` signal is a recognized `shutdown`.
    pub fn execute(&self, machine: &mut Machine, line: &str) -> Reply {
        let command = match Command::parse(line) {
            Some(command) if self.profile.allows(command) => command,
            _ => return Reply::line(UNKNOWN_COMMAND),
        };

        match command {
            Command::Help => Reply::line(format!("commands: {}", self.profile.command_list())),
            Command::Status => Reply::line(status_text(machine)),
            Command::RamAlloc => Reply::line(ram_alloc(machine)),
            Command::RamFree => Reply::line(ram_free(machine)),
            Command::DiskWrite => Reply::line(disk_write(machine)),
            Command::DiskDelete => Reply::line(disk_delete(machine)),
            Command::Play => Reply::line(play(machine)),
            Command::Vram => Reply::line(vram_text(machine)),
            Command::GpuInfo => Reply::line(gpu_info(machine)),
            Command::Benchmark => Reply::line(benchmark(machine)),
            Command::Shutdown => Reply {
                text: FAREWELL.to_string(),
                control: Control::Shutdown,
            },
        }
    }
}

fn status_text(machine: &Machine) -> String {
    let status = machine.status();
    format!(
        "CPU cycles: {}\n\
         VRAM used: {} / {}\n\
         RAM used: {} / {}\n\
         Disk used: {} / {}\n\
         PC model: {}",
        status.cpu_cycles,
        fmt_gib(status.vram_used),
        fmt_gib(status.vram_total),
        fmt_gib(status.ram_used),
        fmt_gib(status.ram_total),
        fmt_gib(status.disk_used),
        fmt_gib(status.disk_total),
        PC_MODEL,
    )
}

fn ram_alloc(machine: &mut Machine) -> String {
    match machine.ram_mut().alloc(RAM_QUANTUM) {
        Ok(()) => format!(
            "allocated {} RAM ({} / {} used)",
            fmt_gib(RAM_QUANTUM),
            fmt_gib(machine.ram().used()),
            fmt_gib(machine.ram().total()),
        ),
        Err(err) => err.to_string(),
    }
}

fn ram_free(machine: &mut Machine) -> String {
    machine.ram_mut().free(RAM_QUANTUM);
    format!(
        "freed {} RAM ({} / {} used)",
        fmt_gib(RAM_QUANTUM),
        fmt_gib(machine.ram().used()),
        fmt_gib(machine.ram().total()),
    )
}

fn disk_write(machine: &mut Machine) -> String {
    match machine.disk_mut().write(DISK_WRITE_QUANTUM) {
        Ok(()) => format!(
            "wrote {} to disk ({} / {} used)",
            fmt_gib(DISK_WRITE_QUANTUM),
            fmt_gib(machine.disk().used()),
            fmt_gib(machine.disk().capacity()),
        ),
        Err(err) => err.to_string(),
    }
}

fn disk_delete(machine: &mut Machine) -> String {
    machine.disk_mut().delete(DISK_DELETE_QUANTUM);
    format!(
        "deleted {} from disk ({} / {} used)",
        fmt_gib(DISK_DELETE_QUANTUM),
        fmt_gib(machine.disk().used()),
        fmt_gib(machine.disk().capacity()),
    )
}

fn play(machine: &mut Machine) -> String {
    let cpu_watts = machine.cpu_mut().execute(PLAY_INSTRUCTIONS);
    if let Err(err) = machine.ram_mut().alloc(PLAY_RAM_BYTES) {
        return err.to_string();
    }
    let frame = match machine.render(true) {
        RenderOutcome::Rendered { used } => format!(
            "frame rendered with raytracing ({} / {} VRAM)",
            fmt_gib(used),
            fmt_gib(machine.gpu().vram_bytes()),
        ),
        RenderOutcome::Overloaded => "VRAM overloaded, frame dropped".to_string(),
    };
    if let Err(err) = machine.psu().draw(cpu_watts, PLAY_GPU_WATTS) {
        return err.to_string();
    }
    format!(
        "game session running: {} RAM reserved, {frame}",
        fmt_gib(PLAY_RAM_BYTES),
    )
}

fn vram_text(machine: &Machine) -> String {
    format!(
        "VRAM used: {} / {}",
        fmt_gib(machine.gpu().used()),
        fmt_gib(machine.gpu().vram_bytes()),
    )
}

fn gpu_info(machine: &Machine) -> String {
    let gpu = machine.gpu();
    format!(
        "GPU: {} ({} VRAM, {} used)",
        gpu.config().model,
        fmt_gib(gpu.vram_bytes()),
        fmt_gib(gpu.used()),
    )
}

fn benchmark(machine: &mut Machine) -> String {
    let before = machine.cpu().cycles();
    let cpu_watts = machine.cpu_mut().execute(BENCH_INSTRUCTIONS);
    let retired = machine.cpu().cycles() - before;
    // Headroom check assumes the CPU at full TDP alongside a loaded GPU.
    match machine
        .psu()
        .draw(machine.cpu().config().tdp_watts, BENCH_GPU_WATTS)
    {
        Ok(()) => format!(
            "benchmark complete: {retired} cycles retired, estimated draw {cpu_watts:.2} W"
        ),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltbox_machine::MachineConfig;

    fn machine() -> Machine {
        Machine::with_rng_seed(MachineConfig::default(), 0)
    }

    fn small_ram_machine() -> Machine {
        let config = MachineConfig {
            ram_bytes: gib(2),
            ..MachineConfig::default()
        };
        Machine::with_rng_seed(config, 0)
    }

    #[test]
    fn unknown_input_gets_the_fixed_reply() {
        let interp = Interpreter::new(Profile::Network);
        let mut machine = machine();
        for line in ["foobar", "", "help me", "ramalloc 4"] {
            let reply = interp.execute(&mut machine, line);
            assert_eq!(reply.text, UNKNOWN_COMMAND);
            assert_eq!(reply.control, Control::Continue);
        }
    }

    #[test]
    fn workstation_commands_are_unknown_over_the_network() {
        let mut machine = machine();
        let network = Interpreter::new(Profile::Network);
        assert_eq!(network.execute(&mut machine, "play").text, UNKNOWN_COMMAND);
        assert_eq!(network.execute(&mut machine, "vram").text, UNKNOWN_COMMAND);

        let local = Interpreter::new(Profile::Local);
        assert_ne!(local.execute(&mut machine, "vram").text, UNKNOWN_COMMAND);
    }

    #[test]
    fn input_is_trimmed_and_case_insensitive() {
        let interp = Interpreter::new(Profile::Network);
        let mut machine = machine();
        let reply = interp.execute(&mut machine, "  STATUS \r");
        assert!(reply.text.starts_with("CPU cycles:"));
    }

    #[test]
    fn status_reflects_the_boot_footprint() {
        let interp = Interpreter::new(Profile::Network);
        let mut machine = machine();
        machine.boot().unwrap();
        let reply = interp.execute(&mut machine, "status");
        assert_eq!(
            reply.text,
            "CPU cycles: 1\n\
             VRAM used: 0.00 GiB / 16.00 GiB\n\
             RAM used: 0.50 GiB / 512.00 GiB\n\
             Disk used: 0.25 GiB / 51200.00 GiB\n\
             PC model: Ragevolt SNC1"
        );
    }

    #[test]
    fn ram_commands_move_one_quantum() {
        let interp = Interpreter::new(Profile::Network);
        let mut machine = machine();
        let reply = interp.execute(&mut machine, "ramalloc");
        assert_eq!(reply.text, "allocated 1.00 GiB RAM (1.00 GiB / 512.00 GiB used)");
        assert_eq!(machine.ram().used(), gib(1));

        let reply = interp.execute(&mut machine, "ramfree");
        assert_eq!(reply.text, "freed 1.00 GiB RAM (0.00 GiB / 512.00 GiB used)");
        assert_eq!(machine.ram().used(), 0);
    }

    #[test]
    fn ramfree_on_an_empty_machine_still_succeeds() {
        let interp = Interpreter::new(Profile::Network);
        let mut machine = machine();
        let reply = interp.execute(&mut machine, "ramfree");
        assert!(reply.text.starts_with("freed"));
        assert_eq!(machine.ram().used(), 0);
    }

    #[test]
    fn out_of_memory_becomes_reply_text_not_a_fault() {
        let interp = Interpreter::new(Profile::Network);
        let mut machine = small_ram_machine();
        assert!(interp.execute(&mut machine, "ramalloc").text.starts_with("allocated"));
        assert!(interp.execute(&mut machine, "ramalloc").text.starts_with("allocated"));

        let reply = interp.execute(&mut machine, "ramalloc");
        assert!(reply.text.starts_with("out of memory"));
        assert_eq!(reply.control, Control::Continue);
        assert_eq!(machine.ram().used(), gib(2));
    }

    #[test]
    fn disk_commands_move_their_quanta() {
        let interp = Interpreter::new(Profile::Network);
        let mut machine = machine();
        interp.execute(&mut machine, "diskwrite");
        assert_eq!(machine.disk().used(), gib(10));
        interp.execute(&mut machine, "diskdel");
        assert_eq!(machine.disk().used(), gib(5));
        interp.execute(&mut machine, "diskdelete");
        assert_eq!(machine.disk().used(), 0);
    }

    #[test]
    fn disk_full_becomes_reply_text() {
        let config = MachineConfig {
            disk_bytes: gib(10),
            ..MachineConfig::default()
        };
        let interp = Interpreter::new(Profile::Network);
        let mut machine = Machine::with_rng_seed(config, 0);
        assert!(interp.execute(&mut machine, "diskwrite").text.starts_with("wrote"));
        let reply = interp.execute(&mut machine, "diskwrite");
        assert!(reply.text.starts_with("disk full"));
        assert_eq!(machine.disk().used(), gib(10));
    }

    #[test]
    fn shutdown_signals_the_caller_after_the_farewell() {
        let interp = Interpreter::new(Profile::Network);
        let mut machine = machine();
        let reply = interp.execute(&mut machine, "shutdown");
        assert_eq!(reply.text, FAREWELL);
        assert_eq!(reply.control, Control::Shutdown);
    }

    #[test]
    fn play_reserves_ram_and_renders() {
        let interp = Interpreter::new(Profile::Local);
        let mut machine = machine();
        let reply = interp.execute(&mut machine, "play");
        assert!(reply.text.starts_with("game session running"));
        assert_eq!(machine.ram().used(), mib(8192));
        assert!(machine.gpu().used() > 0);
    }

    #[test]
    fn benchmark_reports_retired_cycles() {
        let interp = Interpreter::new(Profile::Local);
        let mut machine = machine();
        let reply = interp.execute(&mut machine, "benchmark");
        // 2e9 / 3.2e6 = 625 cycles.
        assert!(reply.text.starts_with("benchmark complete: 625 cycles retired"));
        assert_eq!(machine.cpu().cycles(), 625);
    }

    #[test]
    fn help_lists_the_profile_command_set() {
        let mut machine = machine();
        let network = Interpreter::new(Profile::Network).execute(&mut machine, "help");
        assert!(!network.text.contains("benchmark"));
        let local = Interpreter::new(Profile::Local).execute(&mut machine, "help");
        assert!(local.text.contains("benchmark"));
    }
}
