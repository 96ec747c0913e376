use anyhow::{bail, Result};

use swipefile_import::{cli, config, import, store};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let Some(opts) = cli::parse(std::env::args().skip(1)) else {
        println!("{}", cli::usage());
        std::process::exit(1);
    };

    let cfg = config::from_env()?;
    let store = store::RestStore::from_config(&cfg);
    let report = import::run(&opts, &store).await?;

    if report.failed_batches > 0 {
        bail!(
            "{} of {} batches failed; {} records inserted",
            report.failed_batches,
            report.total_batches,
            report.inserted
        );
    }
    Ok(())
}
