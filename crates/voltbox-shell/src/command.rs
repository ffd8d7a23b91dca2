/// One recognized command token. Commands take no arguments; every quantity
/// they move is a fixed constant in the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    RamAlloc,
    RamFree,
    DiskWrite,
    DiskDelete,
    Shutdown,
    Play,
    Vram,
    GpuInfo,
    Benchmark,
}

impl Command {
    /// Parses a raw input line: whitespace-trimmed, case-insensitive, exact
    /// token match. `diskdel` and `diskdelete` are synonyms.
    pub fn parse(line: &str) -> Option<Command> {
        match line.trim().to_lowercase().as_str() {
            "help" => Some(Command::Help),
            "status" => Some(Command::Status),
            "ramalloc" => Some(Command::RamAlloc),
            "ramfree" => Some(Command::RamFree),
            "diskwrite" => Some(Command::DiskWrite),
            "diskdel" | "diskdelete" => Some(Command::DiskDelete),
            "shutdown" => Some(Command::Shutdown),
            "play" => Some(Command::Play),
            "vram" => Some(Command::Vram),
            "gpuinfo" => Some(Command::GpuInfo),
            "benchmark" => Some(Command::Benchmark),
            _ => None,
        }
    }
}

/// Which command set a front-end exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// The TCP server's set: accounting commands plus `shutdown`.
    Network,
    /// The interactive shell's set: everything.
    Local,
}

impl Profile {
    pub fn allows(self, command: Command) -> bool {
        match command {
            Command::Play | Command::Vram | Command::GpuInfo | Command::Benchmark => {
                self == Profile::Local
            }
            _ => true,
        }
    }

    /// Comma-separated command list for `help` output.
    pub fn command_list(self) -> &'static str {
        match self {
            Profile::Network => {
                "help, status, ramalloc, ramfree, diskwrite, diskdelete, shutdown"
            }
            Profile::Local => {
                "help, status, ramalloc, ramfree, diskwrite, diskdelete, play, vram, gpuinfo, benchmark, shutdown"
            }
        }
    }
}
