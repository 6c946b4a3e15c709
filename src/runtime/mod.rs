use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

mod command;
mod console;
mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let settings = settings::load_settings();

    let dir = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut console = startup::build_console(&settings, &dir)?;
    event_loop::run(
        &mut console,
        Duration::from_millis(settings.audio.tick_ms.max(1)),
    )
}

#[cfg(test)]
mod tests;
