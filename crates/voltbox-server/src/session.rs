use std::io;
use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

use voltbox_machine::Machine;
use voltbox_shell::{Control, Interpreter, Profile, Reply, WELCOME};

const INTERP: Interpreter = Interpreter::new(Profile::Network);
const INTERNAL_ERROR: &str = "error: command failed";

/// One client's lifetime: welcome, read/dispatch loop, unconditional close.
///
/// Connection faults end this session only; they are logged and never bubble
/// past here.
pub(crate) async fn run(
    stream: TcpStream,
    peer: SocketAddr,
    machine: Arc<Mutex<Machine>>,
    cancel: CancellationToken,
) {
    tracing::info!(%peer, "client connected");
    match drive(stream, &machine, &cancel).await {
        Ok(()) => tracing::info!(%peer, "client disconnected"),
        Err(err) => tracing::debug!(%peer, error = %err, "client connection lost"),
    }
}

async fn drive(
    stream: TcpStream,
    machine: &Arc<Mutex<Machine>>,
    cancel: &CancellationToken,
) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    write_half.write_all(WELCOME.as_bytes()).await?;
    write_half.write_all(b"\n").await?;

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else { break };

        tracing::debug!(command = %line.trim(), "dispatch");
        let reply = dispatch(machine, &line);
        write_half.write_all(reply.text.as_bytes()).await?;
        write_half.write_all(b"\n").await?;

        if reply.control == Control::Shutdown {
            cancel.cancel();
            break;
        }
    }

    Ok(())
}

/// Runs one command under the shared machine lock.
///
/// A dispatch that panics answers with a generic error line and the session
/// continues; the next dispatch reclaims a poisoned lock.
fn dispatch(machine: &Arc<Mutex<Machine>>, line: &str) -> Reply {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let mut guard = match machine.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        INTERP.execute(&mut guard, line)
    }))
    .unwrap_or_else(|_| Reply {
        text: INTERNAL_ERROR.to_string(),
        control: Control::Continue,
    })
}
