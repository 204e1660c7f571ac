//! Backtest command implementation.

use anyhow::{Context, Result};
use tracing::info;
use trading_backtest::BacktestEngine;
use trading_config::AppConfig;
use trading_core::traits::Broker;
use trading_data::CsvBarFeed;
use trading_monitor::LogJournal;

use crate::cli::{BacktestArgs, OutputFormat};

pub fn run(args: BacktestArgs, mut config: AppConfig) -> Result<()> {
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let feed = CsvBarFeed::from_path(&args.data)
        .with_context(|| format!("Failed to open data file {:?}", args.data))?;
    let engine = BacktestEngine::trend(config.backtest_config(), feed)?;

    println!("Starting Portfolio Value: {:.2}", engine.broker().value());

    let mut journal = LogJournal::new().quiet_status(config.logging.quiet_status);
    let report = engine
        .run(&mut journal)
        .with_context(|| format!("Backtest aborted reading {:?}", args.data))?;

    println!("Final Portfolio Value: {:.2}", report.final_value);

    if journal.refusals() > 0 {
        info!("{} orders were refused by the broker", journal.refusals());
    }

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, report.to_json()?)
            .with_context(|| format!("Failed to write {:?}", save_path))?;
        info!("Results saved to {:?}", save_path);
    }

    if let Some(csv_path) = &args.equity_csv {
        std::fs::write(csv_path, report.equity_to_csv())
            .with_context(|| format!("Failed to write {:?}", csv_path))?;
        info!("Equity curve saved to {:?}", csv_path);
    }

    Ok(())
}
