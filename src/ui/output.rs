use crate::error::{FixEmailsError, UserFriendlyError};
use crate::extractor::RunSummary;
use bstr::ByteSlice;
use console::{style, Emoji, Term};
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

/// Status, diagnostics and results for one run.
///
/// Stdout carries results only (one written filename per line in human and
/// plain modes), so every status message goes to stderr. JSON mode is the
/// exception: everything is a JSON object on stdout, one per line.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stderr().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => eprintln!("WARNING: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!("  {}", style(message).dim());
                    } else {
                        eprintln!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => eprintln!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        eprintln!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => eprintln!("STARTING: {}", operation),
            }
        }
    }

    /// Reports a result file. Printed even in quiet mode: this line is the
    /// program's output, not a status message.
    pub fn report_written(&self, filename: &[u8], output_path: &Path) -> io::Result<()> {
        match self.mode {
            OutputMode::Human | OutputMode::Plain => {
                write_filename_line(&mut io::stdout().lock(), filename)
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "written",
                    "file": filename.to_str_lossy(),
                    "output": output_path.display().to_string(),
                }));
                Ok(())
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &FixEmailsError) {
        let user_message = error.user_message();
        self.error(&user_message);

        self.debug(&format!("Cause: {}", error));

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    // Summary and reporting
    pub fn print_run_summary(&self, summary: &RunSummary) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_summary(summary),
            OutputMode::Json => self.print_json_summary(summary),
            OutputMode::Plain => self.print_plain_summary(summary),
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    eprintln!("{}", style("─".repeat(60)).dim());
                } else {
                    eprintln!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                eprintln!("{}", "-".repeat(60));
            }
            OutputMode::Json => {} // No separator in JSON mode
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
            };

        if self.use_colors {
            eprintln!("{}{}", emoji, color_fn(message));
        } else {
            let prefix = match msg_type {
                MessageType::Error => "✗",
                MessageType::Warning => "!",
            };
            eprintln!("{} {}", prefix, message);
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, summary: &RunSummary) {
        if !self.should_show_message(1) {
            return;
        }

        self.print_separator();

        let headline = if summary.dry_run {
            "Dry run completed, no files were written"
        } else {
            "Extraction completed"
        };
        if self.use_colors {
            eprintln!("{}{}", CHECKMARK, style(headline).green().bold());
        } else {
            eprintln!("✓ {}", headline);
        }

        let value = |n: usize| {
            if self.use_colors {
                style(n).cyan().bold().to_string()
            } else {
                n.to_string()
            }
        };

        eprintln!("  Files scanned:   {}", value(summary.files_scanned));
        eprintln!("  Blocks written:  {}", value(summary.blocks_written));
        eprintln!("  Empty blocks:    {}", value(summary.empty_blocks));
        eprintln!("  No terminator:   {}", value(summary.unterminated));
        eprintln!("  Time taken:      {}", format_duration(summary.duration));

        self.print_separator();
    }

    fn print_json_summary(&self, summary: &RunSummary) {
        let mut value = serde_json::to_value(summary).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert("type".to_string(), serde_json::json!("summary"));
            obj.insert(
                "duration_ms".to_string(),
                serde_json::json!(summary.duration.as_millis() as u64),
            );
        }
        self.print_json_object(&value);
    }

    fn print_plain_summary(&self, summary: &RunSummary) {
        if !self.should_show_message(1) {
            return;
        }

        eprintln!("COMPLETED: {}", if summary.dry_run { "dry run" } else { "extraction" });
        eprintln!("Files scanned: {}", summary.files_scanned);
        eprintln!("Blocks written: {}", summary.blocks_written);
        eprintln!("Skipped: {}", summary.skipped());
        eprintln!("Duration: {:?}", summary.duration);
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
}

/// The filename exactly as the index spelled it, bytes and all.
fn write_filename_line<W: Write>(out: &mut W, filename: &[u8]) -> io::Result<()> {
    out.write_all(filename)?;
    out.write_all(b"\n")?;
    out.flush()
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
