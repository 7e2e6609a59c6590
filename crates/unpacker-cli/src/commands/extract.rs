//! Extract command implementation.

use crate::cli::Cli;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use log::debug;
use unpacker_core::extract_archive;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = cli.extract_config();
    debug!("extract config: {config:?}");

    let report = add_archive_context(
        extract_archive(&cli.archive, &cli.destination, &config),
        &cli.archive,
    )?;

    formatter.format_extraction_result(&cli.archive, &cli.destination, &report)?;

    Ok(())
}
