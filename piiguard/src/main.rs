// piiguard/src/main.rs
//! PiiGuard entry point.
//!
//! Parses arguments, sets up logging, and runs the redact command.

use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;
use std::io;
use std::process::ExitCode;

use piiguard::cli::Cli;
use piiguard::logger;
use piiguard::run_redact;
use piiguard::ui::output_format;
use piiguard::ui::summary;
use piiguard::ui::theme::{build_theme_map, ThemeMap, ThemeStyle};

fn error_msg(msg: &str, theme_map: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg, theme_map, supports_color);
}

fn warn_msg(msg: &str, theme_map: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg, theme_map, supports_color);
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    let theme_map = match build_theme_map(args.theme.as_ref()) {
        Ok(map) => map,
        Err(e) => {
            let fallback = ThemeStyle::default_theme_map();
            error_msg(&format!("Error: {:#}", e), &fallback);
            return ExitCode::FAILURE;
        }
    };

    match run_redact(&args.redact_options()) {
        Ok(report) => {
            let stdout = io::stdout();
            let _ = output_format::print_success_message(
                &mut stdout.lock(),
                &format!(
                    "Processed {} records. Output: {}",
                    report.summary.total,
                    report.output_path.display()
                ),
                &theme_map,
                stdout.is_terminal(),
            );
            if report.summary.unparsed > 0 && !args.quiet {
                warn_msg(
                    &format!(
                        "Warning: {} record(s) had an unparseable payload and were passed through unchanged.",
                        report.summary.unparsed
                    ),
                    &theme_map,
                );
            }
            if args.summary {
                let supports_color = io::stderr().is_terminal();
                let _ = summary::print_summary(&report.summary, &mut io::stderr(), &theme_map, supports_color);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error_msg(&format!("Error: {:#}", e), &theme_map);
            ExitCode::FAILURE
        }
    }
}
