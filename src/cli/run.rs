use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::error;

use crate::cli::RunArgs;
use crate::config::Config;
use crate::notify::{LogNotifier, Notifier, SmtpNotifier};
use crate::partition::MySqlPartitionRepository;
use crate::runner::{MaintenanceRunner, SystemClock};

pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("Cannot load config '{}'", args.config.display()))?;

    let repository = Arc::new(
        MySqlPartitionRepository::connect(&config.database, &config.maintenance.overflow_partition)
            .await?,
    );

    let notifier: Arc<dyn Notifier> = match config.mail.clone() {
        Some(mail) => Arc::new(SmtpNotifier::new(mail)),
        None => Arc::new(LogNotifier),
    };

    let runner = MaintenanceRunner::new(
        repository,
        notifier,
        Arc::new(SystemClock),
        config.maintenance,
    );

    let report = match runner.run().await {
        Ok(report) => report,
        Err(e) => {
            error!("Maintenance run aborted: {}", e);
            return Err(e.into());
        }
    };

    if report.is_empty() {
        println!("Nothing to do: all tables already cover the horizon.");
    } else {
        for line in report.lines() {
            println!("{}", line);
        }
        println!("\n✅ Maintenance completed: {} partition(s) added.", report.len());
    }

    Ok(())
}
