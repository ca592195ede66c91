use anyhow::Context;
use availability_checker::utils::{logger, validation::Validate};
use availability_checker::{
    CheckSettings, Checker, CheckerError, CliConfig, FileStateStore, HttpPageFetcher,
    RunOutcome, SmtpSender,
};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match run(&cli).await {
        Ok(outcome) => {
            tracing::debug!("Run finished: {:?}", outcome);
        }
        Err(e) => {
            let exit_code = match e.downcast_ref::<CheckerError>() {
                Some(err) => {
                    tracing::error!(
                        "❌ Run failed: {} (Category: {:?})",
                        err,
                        err.category()
                    );
                    tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());
                    println!("❌ {}", err.user_friendly_message());
                    err.exit_code()
                }
                None => {
                    tracing::error!("❌ Run failed: {:#}", e);
                    println!("❌ {:#}", e);
                    1
                }
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> anyhow::Result<RunOutcome> {
    let config = cli.resolve()?;
    config.validate()?;
    if cli.verbose {
        tracing::debug!("Checker config: {:?}", config);
    }

    let fetcher = HttpPageFetcher::new(&config.target).context("building HTTP client")?;
    let sender = SmtpSender::new(&config.smtp).context("configuring SMTP transport")?;
    let state = FileStateStore::new(&config.state_file);

    let checker = Checker::new(fetcher, sender, state, CheckSettings::from(&config));

    let outcome = if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no email, no state change");
        checker.dry_run().await?
    } else {
        checker.run().await?
    };
    Ok(outcome)
}
