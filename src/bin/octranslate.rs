// Copyright 2026 octranslate authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command-line front end: resolve telemetry for a standardized path
//! from a hardware target which does not natively support the
//! standardized namespace.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use octranslate::TranslationEngine;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "octranslate",
    version,
    about = "Translate classic telemetry (SNMP OIDs) into standardized paths"
)]
struct Cli {
    /// Path mappings document
    #[arg(long, value_name = "FILE", default_value = "config/mappings.json")]
    mappings: PathBuf,

    /// Rules document
    #[arg(long, value_name = "FILE", default_value = "config/rules.json")]
    rules: PathBuf,

    /// Vendor identifier document
    #[arg(long, value_name = "FILE", default_value = "config/vendor_oids.json")]
    vendors: PathBuf,

    /// Write log output to standard error
    #[arg(long, global = true)]
    log_stderr: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a standardized path for a hardware target
    Get {
        /// The standardized path to resolve
        #[arg(long)]
        path: String,

        /// The hardware target to resolve the path for
        #[arg(long)]
        target: String,

        /// The vendor of the hardware target
        #[arg(long)]
        vendor: String,
    },

    /// Print the tree of standardized paths this instance can resolve
    Print {
        /// Print the subtree rooted at the given node
        #[arg(long, default_value = "root")]
        root: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.log_stderr {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let engine = TranslationEngine::from_files(&cli.mappings, &cli.rules, &cli.vendors)
        .context("could not build translation engine")?;

    match cli.command {
        Commands::Get {
            path,
            target,
            vendor,
        } => {
            let value = engine.evaluate(&path, &target, &vendor)?;
            println!("{value}");
        }
        Commands::Print { root } => {
            print!("{}", engine.render_paths(&root)?);
        }
    }
    Ok(())
}
