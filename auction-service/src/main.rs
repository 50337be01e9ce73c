use {
    anyhow::Result,
    auction_service::{
        config,
        server::start_server,
    },
    clap::Parser,
    std::io::IsTerminal,
    tracing_subscriber::{
        filter::LevelFilter,
        EnvFilter,
    },
};

fn init_tracing() -> Result<()> {
    let interactive = std::io::stderr().is_terminal();
    let subscriber = tracing_subscriber::fmt()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(interactive);

    // Log collectors get JSON lines; terminals get the compact format.
    if interactive {
        tracing::subscriber::set_global_default(subscriber.compact().finish())?;
    } else {
        tracing::subscriber::set_global_default(subscriber.json().finish())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    match config::Options::parse() {
        config::Options::Run(run_options) => start_server(run_options).await,
    }
}
