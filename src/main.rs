/// mpmeta: mini-program metadata extraction CLI
///
/// Logs go to stderr (`RUST_LOG`, default `mpmeta=warn`) so stdout carries
/// only JSON.
use anyhow::Result;
use clap::Parser;
use mpmeta::cli::{run, Cli};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("mpmeta=warn"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(false),
        )
        .init();

    let cli = Cli::parse();
    run(cli)
}
