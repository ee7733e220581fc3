use std::io;

use clap::Parser;
use spark::bootstrap;
use spark::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let args = Cli::parse();

    if let Err(err) = bootstrap::tracing::init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let app = bootstrap::wiring::build_app(args.config.as_deref())?;

    let mut stdout = io::stdout().lock();
    let result = cli::run(args.command, &app, &mut stdout).await;
    app.shutdown();
    result
}
