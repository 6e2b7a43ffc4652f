pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, InputConfig, OutputConfig};
pub use error::{FixEmailsError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    edited_path, extract_block, extract_from_file, BlockContext, Extraction, ResultWriter,
    RunSummary,
};
pub use scanner::{IndexReader, LineScanner};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use bstr::ByteSlice;
use std::path::Path;

/// Main library interface: one pass over the index, one extraction per
/// listed email, one result file per non-empty block.
pub struct FixEmails {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
    dry_run: bool,
}

impl FixEmails {
    /// Create a new instance with the provided configuration. Installs the
    /// Ctrl+C handler.
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let shutdown = GracefulShutdown::new()?;
        Ok(Self::with_shutdown(config, output_mode, verbose, quiet, shutdown))
    }

    /// Create an instance that leaves process signal handling alone.
    pub fn detached(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self::with_shutdown(config, output_mode, verbose, quiet, GracefulShutdown::detached())
    }

    fn with_shutdown(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
            dry_run: false,
        }
    }

    /// Create an instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)?
            .with_dry_run(cli_args.dry_run))
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every email named in the index. The first failure ends the
    /// run; files already written stay on disk.
    pub fn run(&self) -> Result<RunSummary> {
        let index_path = &self.config.input.index_file;

        self.output_formatter
            .start_operation(&format!("Reading index {}", index_path.display()));
        if self.dry_run {
            self.output_formatter
                .warning("Dry run: matches are reported but no .edited file is written");
        }

        let index = IndexReader::open(index_path)?
            .with_skip_blank_lines(self.config.input.skip_blank_lines);
        let writer = ResultWriter::new().with_dry_run(self.dry_run);

        let spinner = self.progress_manager.create_scan_spinner();
        let mut summary = RunSummary::new(self.dry_run);

        for entry in index {
            self.shutdown.check_shutdown()?;

            let filename = entry?;
            ui::progress::update_scan_progress(&spinner, &filename);

            let email_path = self.config.resolve_email_path(&filename);
            let extraction = self.process_email(&filename, &email_path, &writer)?;
            summary.record(&filename, &extraction);
        }

        summary.finish();
        ui::progress::finish_scan_progress(&spinner, &summary);

        if self.config.output.show_summary {
            self.output_formatter.print_run_summary(&summary);
        }

        Ok(summary)
    }

    fn process_email(
        &self,
        filename: &[u8],
        email_path: &Path,
        writer: &ResultWriter,
    ) -> Result<Extraction> {
        // A blank index line would otherwise resolve to the base directory.
        if filename.is_empty() {
            return Err(FixEmailsError::EmailOpen {
                path: email_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "empty filename in index",
                ),
            });
        }

        let extraction = extract_from_file(email_path)?;

        match extraction {
            Extraction::Block(ref block) => {
                let output_path = writer.write(email_path, block)?;
                self.progress_manager
                    .suspend(|| self.output_formatter.report_written(filename, &output_path))?;
            }
            Extraction::Empty => {
                self.output_formatter
                    .debug(&format!("{}: block empty after trimming, nothing written", filename.as_bstr()));
            }
            Extraction::Unterminated => {
                self.output_formatter
                    .debug(&format!("{}: no terminator found, nothing written", filename.as_bstr()));
            }
        }

        Ok(extraction)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &FixEmailsError) {
        self.progress_manager
            .suspend(|| self.output_formatter.print_user_friendly_error(error));
    }
}
