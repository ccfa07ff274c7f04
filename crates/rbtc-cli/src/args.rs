//! Command-line surface for the `rbtc` demo binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rbtc", version, about = "Subtyping/dispatch kernel demo")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dispatch a handful of canned calls against an embedded fixture and
    /// print the resulting type and diagnostics for each.
    Check {
        /// Emit the scenario results as JSON instead of colored text.
        #[arg(long)]
        json: bool,

        /// Post an informational diagnostic whenever `Untyped` propagation
        /// suppresses a check, instead of staying silent.
        #[arg(long = "report-untyped")]
        report_untyped: bool,
    },
}
