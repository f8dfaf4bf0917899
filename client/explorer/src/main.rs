use clap::Parser;
use explorer::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    explorer::run(args).await?;

    Ok(())
}
