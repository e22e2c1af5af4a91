//! # lsofa
//!
//! A CLI tool for summarizing `lsof` output.
//!
//! ## Overview
//!
//! lsofa is built on top of lsofalib. It reads an lsof listing from a file
//! or standard input, splits every fixed-width row into its columns and
//! either prints the rows as a table or counts them by any combination of
//! columns, busiest first.
//!
//! ## Usage
//!
//! ```bash
//! # Which processes hold the most open files?
//! lsof | lsofa -g COMMAND -t 10
//!
//! # Group by several fields, from a saved listing
//! lsofa lsof_output.txt -g COMMAND,TASCMD,NAME -t 10
//!
//! # Raw rows as JSON
//! lsof | lsofa -t 20 --output json
//! ```

use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::debug;
use lsofalib::data::available_fields;
use lsofalib::{analyze, Grouping, HeaderMode, InputSource, ParseOptions, QueryOptions};

mod render;

use render::OutputMode;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("lsofa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse lsof output and show top results")
        .after_help(
            "Examples:\n  lsof | lsofa -g COMMAND,TASCMD,NAME -t 10\n  lsofa lsof_output.txt -g COMMAND,TASCMD,NAME -t 10",
        )
        .arg(
            Arg::new("file")
                .value_name("LSOF_OUTPUT_FILE")
                .help("File containing lsof output (defaults to standard input)"),
        )
        .arg(
            Arg::new("groupings")
                .short('g')
                .long("groupings")
                .value_name("FIELDS")
                .help(format!(
                    "Fields to group by, separated by commas\navailable fields: {}",
                    available_fields()
                )),
        )
        .arg(
            Arg::new("top")
                .short('t')
                .long("top")
                .value_name("N")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Number of top results to show"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("lenient-header")
                .long("lenient-header")
                .action(ArgAction::SetTrue)
                .help("Keep going when header columns are missing instead of failing"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log parsing details to stderr"),
        )
}

/// Set up stderr logging. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Build query options from matches, validating groupings before any input
/// is read
fn build_query(matches: &ArgMatches) -> Result<QueryOptions, anyhow::Error> {
    let mut options = QueryOptions::new();
    if let Some(spec) = matches.get_one::<String>("groupings") {
        options = options.grouping(Grouping::parse(spec)?);
    }
    if let Some(&top) = matches.get_one::<i64>("top") {
        options = options.top(top);
    }
    Ok(options)
}

fn build_parse_options(matches: &ArgMatches) -> ParseOptions {
    let mode = if matches.get_flag("lenient-header") {
        HeaderMode::Lenient
    } else {
        HeaderMode::Strict
    };
    ParseOptions::new().header_mode(mode)
}

fn run(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let query = build_query(matches)?;
    let parse = build_parse_options(matches);
    let output_mode = matches
        .get_one::<String>("output")
        .map(|s| OutputMode::from_arg(s))
        .unwrap_or_default();

    let source = InputSource::from_arg(matches.get_one::<String>("file").map(|s| s.as_str()));
    let reader = source.open()?;
    debug!("input: {}", source);

    let result = analyze(reader, &parse, &query)?;
    render::render(&result, output_mode)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
