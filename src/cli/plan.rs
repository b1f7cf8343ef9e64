use anyhow::{bail, Context, Result};
use std::sync::Arc;

use crate::cli::PlanArgs;
use crate::config::Config;
use crate::notify::LogNotifier;
use crate::partition::MySqlPartitionRepository;
use crate::runner::{MaintenanceRunner, SystemClock};

pub async fn execute(args: &PlanArgs) -> Result<()> {
    let mut config = Config::load(&args.config)
        .with_context(|| format!("Cannot load config '{}'", args.config.display()))?;

    if let Some(table) = &args.table {
        if !config.maintenance.tables.contains(table) {
            bail!("Table '{}' is not configured for maintenance", table);
        }
        config.maintenance.tables = vec![table.clone()];
    }

    let repository = Arc::new(
        MySqlPartitionRepository::connect(&config.database, &config.maintenance.overflow_partition)
            .await?,
    );

    let runner = MaintenanceRunner::new(
        repository,
        Arc::new(LogNotifier),
        Arc::new(SystemClock),
        config.maintenance.clone(),
    );

    let plans = runner.preview().await?;

    let mut total = 0usize;
    for table_plan in &plans {
        println!(
            "{}.{} (current boundary {}):",
            config.maintenance.schema, table_plan.table, table_plan.current_boundary
        );
        if table_plan.plan.is_empty() {
            println!("  up to date");
            continue;
        }
        for entry in table_plan.plan.entries() {
            println!("  {}  VALUES LESS THAN {}", entry.name, entry.boundary);
            total += 1;
        }
    }

    println!("\n{} partition(s) would be added.", total);

    Ok(())
}
