// File: giftlink-admin/src/main.rs

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod context;

use commands::Command;
use context::AdminContext;

#[derive(Parser, Debug)]
#[command(name = "giftlink-admin")]
#[command(author, version, about = "GiftLink admin console - campaigns, orders and duplicate review")]
struct Args {
    /// Postgres connection URL.
    #[arg(long, default_value = "postgres://giftlink@localhost:5432/giftlink")]
    db_url: String,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("giftlink=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let ctx = AdminContext::connect(&args.db_url).await?;
    if let Err(e) = commands::run(&ctx, args.command).await {
        error!("Command failed: {e}");
        std::process::exit(1);
    }
    Ok(())
}
