use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs
// Build scripts can't access src/ modules, so the shape is repeated here
const INSPECT_FORMATS: &[&str] = &["treeviz", "json"];

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

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to and from the quire document tree")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("import")
                .arg(input_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_FORMATS)),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("export")
                .visible_alias("convert")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("normalize")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("rules").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue),
            ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "quire", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "quire", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "quire", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
