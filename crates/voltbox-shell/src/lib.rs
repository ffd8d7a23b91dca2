//! Command layer for VoltBox: maps newline-delimited text commands onto
//! machine operations and renders the outcome as reply text.
//!
//! Both front-ends go through [`Interpreter::execute`]: the TCP server with
//! [`Profile::Network`], the interactive shell with [`Profile::Local`] (which
//! unlocks the richer workstation commands: `play`, `vram`, `gpuinfo`,
//! `benchmark`). Capacity failures never escape this layer; they come back as
//! reply text with [`Control::Continue`].

#![forbid(unsafe_code)]

mod command;
mod interp;

pub use command::{Command, Profile};
pub use interp::{Control, Interpreter, Reply, FAREWELL, UNKNOWN_COMMAND, WELCOME};
