use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use voltbox_machine::{Machine, MachineConfig};

use crate::session;

/// Server-level configuration. Tests shrink `machine` capacities and bind
/// port 0; the binary uses the defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub machine: MachineConfig,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            machine: MachineConfig::default(),
        }
    }
}

/// Handle to a running server.
///
/// The accept loop stops when a session issues `shutdown` or when
/// [`RunningServer::shutdown`] is called; [`RunningServer::stopped`] resolves
/// only after every open session has also closed. Dropping the handle cancels
/// and aborts outright.
pub struct RunningServer {
    addr: SocketAddr,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RunningServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn stopped(&mut self) {
        if let Some(task) = self.task.as_mut() {
            let _ = task.await;
            self.task = None;
        }
    }

    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        self.stopped().await;
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Boots a machine, binds the listener and spawns the accept loop.
pub async fn start(config: ServerConfig) -> anyhow::Result<RunningServer> {
    let mut machine = Machine::new(config.machine);
    machine.boot().context("boot machine")?;
    let status = machine.status();
    tracing::info!(
        cycles = status.cpu_cycles,
        ram_used = status.ram_used,
        disk_used = status.disk_used,
        "machine booted"
    );

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    let addr = listener.local_addr().context("read bound address")?;
    tracing::info!(%addr, "voltbox-server listening");

    let machine = Arc::new(Mutex::new(machine));
    let cancel = CancellationToken::new();
    let task = tokio::spawn(accept_loop(listener, machine, cancel.clone()));

    Ok(RunningServer {
        addr,
        cancel,
        task: Some(task),
    })
}

async fn accept_loop(
    listener: TcpListener,
    machine: Arc<Mutex<Machine>>,
    cancel: CancellationToken,
) {
    let mut sessions = JoinSet::new();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    sessions.spawn(session::run(stream, peer, Arc::clone(&machine), cancel.clone()));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "accept failed");
                }
            },
        }
    }

    drop(listener);
    while sessions.join_next().await.is_some() {}
    tracing::info!("server stopped");
}
