// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::*;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use log::{debug, LevelFilter};
use operation_codegen::host::FsEnvironment;
use operation_codegen::{generate_all, ClassGenerator, GeneratorOptions};
use simplelog::{Config, SimpleLogger, TermLogger, TerminalMode};

use generators::{LoaderGenerator, OperatorGenerator};
use manifest::Manifest;

mod generators;
mod manifest;

#[derive(Parser)]
#[clap(
    name = env!("CARGO_BIN_NAME"),
    about = "Generates loader and operator classes for annotated operation types described in a manifest",
    rename_all = "kebab-case",
    author,
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Args {
    /// Path to the toml manifest listing the operation types
    #[clap(long = "manifest", short = 'm')]
    pub manifest: PathBuf,

    /// Directory to write generated sources to, overriding the config
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,

    /// Generator options in toml format
    #[clap(long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[clap(long = "verbose", short = 'v')]
    pub verbose: bool,
}

fn main() {
    let args = Args::parse();

    match execute(args) {
        Ok(true) => (),
        Ok(false) => std::process::exit(1),
        Err(err) => {
            let err = format!("{:?}", err);
            println!("{}", err.bold().red());
            std::process::exit(1);
        }
    }
}

fn load_options(args: &Args) -> anyhow::Result<GeneratorOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            GeneratorOptions::from_toml_str(&source)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => GeneratorOptions::default(),
    };
    if let Some(output) = &args.output {
        options.output_path = output.to_string_lossy().to_string();
    }
    if args.verbose {
        options.verbosity_level = LevelFilter::Debug;
    }
    Ok(options)
}

fn init_logging(level: LevelFilter) {
    let result = TermLogger::init(level, Config::default(), TerminalMode::Stderr)
        .or_else(|_| SimpleLogger::init(level, Config::default()));
    if let Err(err) = result {
        eprintln!("{}", format!("logging disabled: {err}").yellow());
    }
}

/// Runs one generation batch. Returns whether every class was generated.
fn execute(args: Args) -> anyhow::Result<bool> {
    let options = load_options(&args)?;
    init_logging(options.verbosity_level);
    debug!("opgen version: {}", env!("CARGO_PKG_VERSION"));

    let manifest = Manifest::load(&args.manifest)?;
    let env = FsEnvironment::new(&options.output_path);

    let loaders: Vec<_> = manifest.types.iter().map(LoaderGenerator::new).collect();
    let operators: Vec<_> = manifest.types.iter().map(OperatorGenerator::new).collect();
    let generators: Vec<&dyn ClassGenerator> = loaders
        .iter()
        .zip(&operators)
        .flat_map(|(loader, operator)| {
            [loader as &dyn ClassGenerator, operator as &dyn ClassGenerator]
        })
        .collect();

    let report = generate_all(&env, &generators, &options);

    let color = if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(color);
    env.report_diag(&mut stderr)?;

    for fqcn in &report.generated {
        println!("✅ {fqcn}");
    }
    for fqcn in &report.failed {
        println!("❌ {fqcn}");
    }

    Ok(!report.has_failures())
}
