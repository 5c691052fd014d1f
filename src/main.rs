use clap::Parser;
use order_board::{Cli, run, setup_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv_override().ok();
    let cli = Cli::parse();
    setup_tracing(cli.env.log_level);

    run(cli).await?;
    Ok(())
}
