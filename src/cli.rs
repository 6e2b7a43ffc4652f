use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fix-emails")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract charge notices from a batch of email files")]
#[command(
    long_about = "Reads an index file (1.txt by default) listing one email file per line, \
                  pulls the charge notice out of each email and writes it next to the \
                  source as <file>.edited. The name of every file written is printed \
                  on standard output."
)]
#[command(after_help = "EXAMPLES:\n  \
    fix-emails\n  \
    fix-emails --index batch.txt --base-dir ~/mail/export\n  \
    fix-emails --dry-run -v\n  \
    fix-emails --generate-config --config fix-emails.toml")]
pub struct Cli {
    /// Index file listing one email filename per line
    #[arg(short, long, help = "Index file to read (default: 1.txt)")]
    pub index: Option<PathBuf>,

    /// Directory that email filenames are relative to
    #[arg(short = 'd', long, help = "Resolve email filenames against this directory")]
    pub base_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Ignore blank lines in the index instead of failing on them
    #[arg(long)]
    pub skip_blank_lines: bool,

    /// Output format for status messages and results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress everything but results and errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (report matches without writing .edited files)
    #[arg(long, help = "Scan and report matches without writing any file")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        // The flag can only switch skipping on; the config decides otherwise.
        let skip_blank_lines = self.skip_blank_lines.then_some(true);

        CliOverrides::new()
            .with_index_file(self.index.clone())
            .with_base_directory(self.base_dir.clone())
            .with_skip_blank_lines(skip_blank_lines)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
