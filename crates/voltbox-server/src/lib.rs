//! Multi-client TCP front-end for the VoltBox machine.
//!
//! One machine is booted at server start and shared by every session behind a
//! mutex; the protocol is newline-delimited text commands, one reply per
//! command. `shutdown` is global: it stops the accept loop and closes the open
//! sessions (see DESIGN.md for the policy discussion).

pub mod config;
mod server;
mod session;

pub use config::Config;
pub use server::{start, RunningServer, ServerConfig};
