use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::RodioTransport;
use crate::error::Result;

use super::console::{Console, Flow};

/// Read stdin lines on their own thread so the loop can keep pumping
/// transport events while waiting for input.
fn spawn_stdin_reader() -> io::Result<Receiver<String>> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
            debug!("stdin closed");
        })?;
    Ok(rx)
}

fn pump_events(console: &mut Console<RodioTransport>) {
    for event in console.controller.transport().drain_events() {
        console.controller.handle_event(event);
    }
}

/// Main console loop. Returns when the user quits or stdin closes.
pub fn run(console: &mut Console<RodioTransport>, tick: Duration) -> Result<()> {
    let lines = spawn_stdin_reader()?;
    let mut stdout = io::stdout();

    writeln!(stdout, "Type `help` for commands.")?;
    console.handle_line("list", &mut stdout)?;

    loop {
        pump_events(console);
        console.flush_notices(&mut stdout)?;
        stdout.flush()?;

        match lines.recv_timeout(tick) {
            Ok(line) => {
                pump_events(console);
                let flow = console.handle_line(&line, &mut stdout)?;
                stdout.flush()?;
                if flow == Flow::Quit {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    console.controller.transport_mut().quit_softly();
    Ok(())
}
