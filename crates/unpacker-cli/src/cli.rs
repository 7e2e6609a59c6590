//! CLI argument parsing using clap.

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use unpacker_core::ExtractConfig;

#[derive(Parser)]
#[command(name = "unpacker")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Supported formats: .zip, .tar.gz, .tgz, .rar, .7z")]
pub struct Cli {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Destination directory (created if missing)
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Password for encrypted zip archives
    #[arg(short, long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Never fall back to the system unzip utility
    #[arg(long)]
    pub no_system_unzip: bool,

    /// Write files with mode 0644 instead of the stored permissions
    #[arg(long)]
    pub no_preserve_permissions: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

impl Cli {
    /// Builds the extraction settings passed to the core.
    pub fn extract_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::default()
            .with_system_unzip(!self.no_system_unzip)
            .with_preserve_permissions(!self.no_preserve_permissions);
        if let Some(password) = &self.password {
            config = config.with_password(password.as_str());
        }
        config
    }

    /// Default log level; `RUST_LOG` takes precedence.
    pub const fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Warn
        }
    }
}
