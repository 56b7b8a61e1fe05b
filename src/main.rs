// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI converting Cucumber JSON reports into JUnit XML reports.

use std::{
    fs,
    io::{self, Read as _, Write as _},
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use cucumber_junit::{convert_into, Config, Declaration, Indent, Result};
use tracing_subscriber::EnvFilter;

/// Converts a Cucumber JSON report into a JUnit XML report.
#[derive(Debug, Parser)]
#[command(name = "cucumber-junit", about, version)]
struct Cli {
    /// Path of the Cucumber JSON report to read (`-` or nothing reads
    /// stdin).
    #[arg(value_name = "REPORT")]
    input: Option<PathBuf>,

    /// Path of the JUnit XML report to write (stdout if omitted).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Prefix to prepend, verbatim, to every test-suite and test-case name.
    #[arg(short, long, value_name = "STRING")]
    prefix: Option<String>,

    /// Report pending and undefined steps as failures.
    #[arg(short, long)]
    strict: bool,

    /// Number of spaces each nesting level of the XML is indented with.
    #[arg(
        long,
        value_name = "SPACES",
        default_value_t = 4,
        conflicts_with = "compact"
    )]
    indent: usize,

    /// Produce single-line XML without any indentation.
    #[arg(long)]
    compact: bool,

    /// Omit the leading XML declaration.
    #[arg(long)]
    no_declaration: bool,
}

impl Cli {
    /// Assembles a conversion [`Config`] out of the parsed CLI arguments.
    fn config(&self) -> Config {
        Config {
            prefix: self.prefix.clone(),
            strict: self.strict,
            indent: if self.compact {
                Indent::None
            } else {
                Indent::Spaces(self.indent)
            },
            declaration: (!self.no_declaration).then(Declaration::default),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let report = read_report(cli.input.as_deref())?;
    let config = cli.config();

    // Flush explicitly: a flush on drop would swallow late write errors.
    match &cli.output {
        Some(path) => {
            let mut out = io::BufWriter::new(fs::File::create(path)?);
            convert_into(&report, &mut out, &config)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            convert_into(&report, &mut out, &config)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Reads the report from the given path, or from stdin if the path is
/// absent or `-`.
fn read_report(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            Ok(fs::read_to_string(path)?)
        }
        _ => {
            let mut buf = String::new();
            let _ = io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
