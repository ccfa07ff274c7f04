//! Demo binary: runs a handful of canned calls through the subtyping/
//! dispatch kernel and prints what each one resolves to.

mod args;
mod fixture;
mod report;

use anyhow::Result;
use args::{CliArgs, Command};
use clap::Parser;
use rbtc_common::KernelOptions;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = CliArgs::parse();
    match cli.command {
        Command::Check { json, report_untyped } => run_check(json, report_untyped),
    }
}

fn run_check(json: bool, report_untyped: bool) -> Result<()> {
    let options = KernelOptions {
        report_untyped_propagation: report_untyped,
        ..KernelOptions::default()
    };
    let mut program = fixture::build(options);
    let scenarios = fixture::scenarios(&mut program);

    let results: Vec<report::ScenarioResult> = scenarios
        .into_iter()
        .map(|scenario| report::run(&mut program, &options, scenario))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        report::print_human(&results);
    }
    Ok(())
}
