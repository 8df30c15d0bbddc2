//! LogicPy CLI entry point.

use logicpy_cli::{describe, init_logging, locate};
use logicpy_codegen::{CodegenConfig, Compiler};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    output: Option<PathBuf>,
    root_alias: Option<String>,
    check: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    init_logging();
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--check" => config.check = true,
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err(format!("{} requires a path", args[i - 1]).into());
                }
                config.output = Some(PathBuf::from(&args[i]));
            }
            "--root-alias" => {
                i += 1;
                if i >= args.len() {
                    return Err("--root-alias requires a name".into());
                }
                config.root_alias = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("logicpy {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if config.files.is_empty() {
        return Err("no input files (see --help)".into());
    }

    let mut codegen = CodegenConfig::default();
    if let Some(alias) = &config.root_alias {
        codegen = codegen.with_root_alias(alias);
    }
    let compiler = Compiler::new(codegen);

    // Everything is compiled before anything is written. All files share
    // one translation unit, so a type may only be declared once.
    let mut unit = compiler.unit();
    for file in &config.files {
        let source = fs::read_to_string(file)
            .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
        debug!(file = %file.display(), bytes = source.len(), "compiling");

        let advisories = unit
            .add(&source)
            .map_err(|e| describe(&locate(e, file)))?;
        info!(file = %file.display(), advisories = advisories.len(), "schema ok");
    }

    if config.check {
        return Ok(());
    }

    let output = unit.finish();
    match &config.output {
        Some(path) => fs::write(path, output)
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?,
        None => io::stdout().lock().write_all(output.as_bytes())?,
    }
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mLogicPy\x1b[0m - Compile puzzle schemas to C harness declarations

\x1b[1mUSAGE:\x1b[0m
    logicpy [OPTIONS] FILES...

\x1b[1mARGUMENTS:\x1b[0m
    FILES...    LogicPy sources, compiled in order into one C unit;
                a type may be declared in only one of them

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -o, --output PATH      Write C to PATH instead of stdout
    --root-alias NAME      Emit the outermost entity type as NAME
    --check                Analyze only; write no output

\x1b[1mENVIRONMENT:\x1b[0m
    RUST_LOG               Log filter for stderr (default: warn)

\x1b[1mEXAMPLES:\x1b[0m
    logicpy puzzle.py                          Print declarations
    logicpy -o harness.c puzzle.py             Write declarations to a file
    logicpy --root-alias PuzzleSolution p.py   Rename the outermost type
    RUST_LOG=debug logicpy --check p.py        Show pass summaries"
    );
}
