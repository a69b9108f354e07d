//! colscope CLI - column-level lineage extractor

use colscope_cli::cli::{Args, OutputFormat};
use colscope_cli::connection::ConnectionConfig;
use colscope_cli::logging;
use colscope_cli::output::{format_json, format_table};

use anyhow::{Context, Result};
use clap::Parser;
use colscope_core::{run_extraction, DocumentConnector};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

/// Run completed but some definitions could not be parsed (with `--strict`).
const EXIT_FAILURE: u8 = 1;
/// Configuration error (unreadable document, unreachable database, ...).
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);

    let result = if args.template {
        run_template(&args).map(|()| false)
    } else {
        run(&args)
    };

    match result {
        Ok(has_warnings) => {
            if has_warnings && args.strict {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("colscope: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

/// Extract lineage and write the report. Returns whether any definition failed
/// to parse.
fn run(args: &Args) -> Result<bool> {
    let config = ConnectionConfig::from_args(args);
    warn_on_credentials(&config, args.quiet);

    let options = args.extraction_options();
    let connector = config.connect(options.dialect)?;
    let database = connector.label();

    tracing::debug!(source = %database, "extracting lineage");
    let result = run_extraction(connector.as_ref(), &options)?;
    let has_warnings = result.has_warnings();
    let warnings = result.warning_messages();

    let report = result.into_report(database);
    let output_str = match args.format {
        OutputFormat::Json => format_json(&report, args.compact),
        OutputFormat::Table => format_table(&report, args.quiet, args.output.is_none()),
    };

    write_output(&args.output, &output_str)?;

    // The table already lists warnings when it goes to stdout
    let table_on_stdout = args.format == OutputFormat::Table && args.output.is_none();
    if !args.quiet && !table_on_stdout {
        print_warnings_to_stderr(&warnings);
    }

    Ok(has_warnings)
}

/// Emit a fill-in metadata document for the configured catalog.
fn run_template(args: &Args) -> Result<()> {
    let config = ConnectionConfig::from_args(args);
    warn_on_credentials(&config, args.quiet);

    let connector = config.connect(args.dialect.into())?;
    connector.test_connection()?;
    let catalog = connector.get_all_objects()?;
    let document = DocumentConnector::template(&catalog, connector.label());

    let output_str = if args.compact {
        serde_json::to_string(&document)
    } else {
        serde_json::to_string_pretty(&document)
    }
    .context("Failed to serialize metadata template")?;

    write_output(&args.output, &output_str)
}

fn warn_on_credentials(config: &ConnectionConfig, quiet: bool) {
    if config.exposes_credentials() && !quiet {
        eprintln!(
            "colscope: warning: Database credentials in --metadata-url may be logged in shell history. \
             Consider using environment variables or a .pgpass file instead."
        );
    }
}

fn print_warnings_to_stderr(warnings: &[String]) {
    for warning in warnings {
        eprintln!("colscope: warning: {warning}");
    }
}

fn write_output(path: &Option<std::path::PathBuf>, content: &str) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{content}").context("Failed to write to stdout")?;
    }
    Ok(())
}
