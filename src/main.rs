use anyhow::Result;
use clap::Parser;

use weekly_backup::cli::args::{Cli, OutputFormat};
use weekly_backup::cli::output;
use weekly_backup::common::config::Config;
use weekly_backup::common::logging;
use weekly_backup::notify::EmailNotifier;
use weekly_backup::routine::Routine;
use weekly_backup::storage::DiskProbe;

fn main() -> Result<()> {
    // A missing .env is fine, the variables may already be exported
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::from_cli(&cli);
    let _log_guard = logging::init(&config.log_file, cli.verbose)?;

    let today = config.today();
    tracing::debug!(?config, %today, "starting");

    let routine = Routine::new(&config, DiskProbe, EmailNotifier::new(config.email.clone()));
    let summary = routine.run(today);

    match cli.format {
        OutputFormat::Human => output::print_summary(&summary),
        OutputFormat::Json => output::print_summary_json(&summary),
    }

    Ok(())
}
