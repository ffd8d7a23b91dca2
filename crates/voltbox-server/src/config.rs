use std::net::SocketAddr;

use clap::Parser;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9999";

#[derive(Debug, Clone, Parser)]
#[command(name = "voltbox-server", version, about)]
struct Args {
    /// Address the command server listens on.
    ///
    /// Environment variable: `VOLTBOX_LISTEN_ADDR`.
    #[arg(long, env = "VOLTBOX_LISTEN_ADDR")]
    listen_addr: Option<SocketAddr>,

    /// Log filter (tracing-subscriber EnvFilter syntax).
    ///
    /// Environment variable: `VOLTBOX_LOG`.
    #[arg(long, env = "VOLTBOX_LOG")]
    log_level: Option<String>,
}

/// Process configuration for the server binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Self {
        let args = Args::parse();

        Self {
            listen_addr: args
                .listen_addr
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.parse().expect("default listen addr")),
            log_level: args.log_level.unwrap_or_else(|| "info".to_string()),
        }
    }
}
