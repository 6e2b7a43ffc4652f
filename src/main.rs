use clap::Parser;
use fix_emails::{Cli, FixEmails, FixEmailsError, OutputFormatter, OutputMode, UserFriendlyError};
use std::path::PathBuf;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match FixEmails::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&cli, &e);
            return e.exit_code();
        }
    };

    match app.run() {
        Ok(_) => 0,
        Err(e) => {
            app.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("fix-emails.toml"));

    match FixEmails::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path.display());
            println!("\nTo use this configuration:");
            println!("  fix-emails --config {}", config_path.display());
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(cli: &Cli, error: &FixEmailsError) {
    let mode = match cli.output_format {
        fix_emails::OutputFormat::Json => OutputMode::Json,
        fix_emails::OutputFormat::Plain => OutputMode::Plain,
        fix_emails::OutputFormat::Human => OutputMode::Human,
    };
    let formatter = OutputFormatter::new(mode, cli.verbosity_level(), false);
    formatter.print_user_friendly_error(error);
}
