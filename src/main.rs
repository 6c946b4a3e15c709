use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod audio;
mod catalog;
mod config;
mod error;
mod history;
mod persist;
mod player;
mod playlist;
mod runtime;
mod session;
mod ui;

#[cfg(test)]
mod test_support;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout belongs to the console.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    runtime::run()?;
    Ok(())
}
