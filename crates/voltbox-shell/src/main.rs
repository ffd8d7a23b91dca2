//! Interactive local shell: a synchronous read-eval-print loop over one
//! private machine. Nothing is persisted and there are no flags; the richer
//! workstation command set is available here only.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use voltbox_machine::{Machine, MachineConfig, PC_MODEL};
use voltbox_shell::{Control, Interpreter, Profile};

fn main() -> anyhow::Result<()> {
    let mut machine = Machine::new(MachineConfig::default());
    machine.boot().context("boot machine")?;

    println!("VoltBox local shell on a {PC_MODEL}. Type 'help' for commands.");

    let interp = Interpreter::new(Profile::Local);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        stdout.write_all(b"> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let reply = interp.execute(&mut machine, &line);
        println!("{}", reply.text);
        if reply.control == Control::Shutdown {
            break;
        }
    }

    Ok(())
}
