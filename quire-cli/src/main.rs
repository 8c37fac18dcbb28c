// Command-line interface for quire
//
// This binary exposes the Markdown transformers of quire-markdown: reading Markdown into the
// editor document tree, writing the tree back out, and the list indentation normalizer.
//
// The import command is mostly a development aid: it shows the tree a Markdown file turns into,
// which is the quickest way to see which rule claimed which line.
//
// Usage:
//  quire import <input> [--format treeviz|json] [-o <file>]   - Markdown → document tree dump
//  quire export <input> [-o <file>]                           - Markdown → tree → Markdown
//  quire convert <input> [-o <file>]                          - Same as export
//  quire normalize <input> [-o <file>]                        - Rewrite list indentation only
//  quire rules [--json]                                       - List the registry in precedence order
//
// Extra Parameters:
//
// Configuration keys can be overridden per run with --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and applies the value on top of the loaded config.
// Example:
//  quire export notes.md --extra-preserve-new-lines --extra-normalize-export true

mod commands;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use quire_config::{InspectFormatConfig, Loader, QuireConfig};
use quire_markdown::inspect::InspectFormat;
use quire_markdown::ConversionOptions;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                // No value, treat as boolean flag
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Markdown file to read ('-' for stdin)")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to and from the quire document tree")
        .long_about(
            "quire reads Markdown into the rich-text document tree used by the editor and\n\
            writes it back out, using the same ordered transformer rules as the editor.\n\n\
            Commands:\n  \
            - import:    Show the document tree a Markdown file turns into\n  \
            - export:    Round-trip Markdown through the tree (alias: convert)\n  \
            - normalize: Rewrite two-space list nesting to four spaces\n  \
            - rules:     List the transformer rules in precedence order\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration for one run.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            quire import notes.md                         # Tree visualization\n  \
            quire import notes.md --format json           # Tree as JSON\n  \
            quire export notes.md -o clean.md             # Canonical Markdown\n  \
            quire normalize notes.md                      # Fix list indentation only\n  \
            quire export notes.md --extra-preserve-new-lines",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a quire.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log rule matches on stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("import")
                .about("Show the document tree for a Markdown file")
                .long_about(
                    "Import Markdown with the playground rules and dump the resulting tree.\n\n\
                    Formats:\n  \
                    - treeviz: one line per node with icons (default)\n  \
                    - json:    serialized node snapshots\n\n\
                    Extra Parameters:\n  \
                    --extra-preserve-new-lines   Keep blank lines as empty paragraphs\n  \
                    --extra-normalize-import     Rewrite list indentation first (default: true)\n  \
                    --extra-image-max-width <N>  Width recorded on images",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Tree dump format (defaults to the configured one)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            commands::INSPECT_FORMATS,
                        ))
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("export")
                .visible_alias("convert")
                .about("Round-trip Markdown through the document tree")
                .long_about(
                    "Import Markdown, then export the tree again.\n\n\
                    The output is the Markdown the editor would write for the same input:\n\
                    horizontal rules become '***', tables get a regenerated divider, lists\n\
                    are indented with four spaces per level.\n\n\
                    Examples:\n  \
                    quire export notes.md                 # To stdout\n  \
                    quire convert notes.md -o clean.md    # To a file",
                )
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("normalize")
                .about("Rewrite list indentation without parsing")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("rules")
                .about("List the transformer rules in precedence order")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the listing as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn init_logging(verbose: bool) {
    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let matches = build_cli().get_matches_from(&cleaned_args);
    init_logging(matches.get_flag("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        warn!("Ignoring unknown parameter --extra-{key}");
    }

    match matches.subcommand() {
        Some(("import", sub_matches)) => handle_import_command(sub_matches, &config),
        Some(("export", sub_matches)) => handle_export_command(sub_matches, &config),
        Some(("normalize", sub_matches)) => handle_normalize_command(sub_matches),
        Some(("rules", sub_matches)) => handle_rules_command(sub_matches.get_flag("json"), &config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the import command
fn handle_import_command(matches: &ArgMatches, config: &QuireConfig) {
    let source = read_input(input_path(matches));
    let format: InspectFormat = match matches.get_one::<String>("format") {
        Some(name) => name.parse().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }),
        None => config.inspect.format.into(),
    };

    let registry = config.registry();
    let output = commands::import_tree(&source, &registry, ConversionOptions::from(config), format)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
    write_output(output_path(matches), &output);
}

/// Handle the export (convert) command
fn handle_export_command(matches: &ArgMatches, config: &QuireConfig) {
    let source = read_input(input_path(matches));
    let registry = config.registry();
    let output = commands::export_markdown(&source, &registry, ConversionOptions::from(config));
    write_output(output_path(matches), &output);
}

/// Handle the normalize command
fn handle_normalize_command(matches: &ArgMatches) {
    let source = read_input(input_path(matches));
    let output = quire_markdown::normalize_list_indentation(&source);
    write_output(output_path(matches), &output);
}

/// Handle the rules command
fn handle_rules_command(json: bool, config: &QuireConfig) {
    let registry = config.registry();
    let output = commands::list_rules(&registry, json).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    print!("{output}");
}

fn input_path(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-")
}

fn output_path(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("output").map(|s| s.as_str())
}

fn read_input(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        });
        return source;
    }

    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(path: Option<&str>, content: &str) {
    match path {
        Some(path) => {
            fs::write(path, content).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
            debug!(path, bytes = content.len(), "wrote output");
        }
        None => print!("{content}"),
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> QuireConfig {
    let loader = Loader::new().with_optional_file("quire.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut QuireConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["preserve-new-lines", "preserve"]) {
        config.import.preserve_new_lines = parse_bool_arg("preserve-new-lines", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["normalize-import", "normalize-on-import"]) {
        config.import.normalize_list_indentation = parse_bool_arg("normalize-import", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["normalize-export", "normalize-on-export"]) {
        config.export.normalize_list_indentation = parse_bool_arg("normalize-export", &raw);
    }

    if let Some(raw) = take_override(extra_params, &["image-max-width", "max-width"]) {
        config.rules.image.max_width = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid width '{raw}' for --extra-image-max-width");
            std::process::exit(1);
        });
    }

    if let Some(raw) = take_override(extra_params, &["format"]) {
        config.inspect.format = match raw.to_lowercase().as_str() {
            "treeviz" | "tree" => InspectFormatConfig::Treeviz,
            "json" => InspectFormatConfig::Json,
            other => {
                eprintln!("Unknown format '{other}' for --extra-format");
                std::process::exit(1);
            }
        };
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
