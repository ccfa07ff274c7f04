//! Rendering one scenario's dispatch result, either as colored text or as
//! JSON for scripting.

use colored::Colorize;
use rbtc_common::{Diagnostic, KernelOptions, Loc, NoopMetrics, TypeId, VecErrorSink};
use rbtc_kernel::{dispatch_call, DispatchContext};
use rbtc_types::show;
use serde::Serialize;

use crate::fixture::{Program, Scenario};

#[derive(Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub result_type: String,
    pub diagnostics: Vec<Diagnostic>,
}

fn loc() -> Loc {
    Loc::new(rbtc_common::FileId(1), 0, 1)
}

pub fn run(program: &mut Program, options: &KernelOptions, scenario: Scenario) -> ScenarioResult {
    let metrics = NoopMetrics;
    let mut sink = VecErrorSink::new();
    let result_ty = {
        let mut ctx = DispatchContext {
            gs: &program.gs,
            options,
            metrics: &metrics,
            sink: &mut sink,
        };
        dispatch_call(
            &mut ctx,
            &mut program.arena,
            scenario.receiver,
            scenario.method,
            &scenario.args,
            None,
            loc(),
        )
    };
    ScenarioResult {
        name: scenario.name.to_string(),
        result_type: render_type(program, result_ty),
        diagnostics: sink.diagnostics,
    }
}

fn render_type(program: &Program, ty: TypeId) -> String {
    show(&program.arena, ty, program.gs.names(), &program.gs)
}

pub fn print_human(results: &[ScenarioResult]) {
    for result in results {
        println!("{}", result.name.bold());
        println!("  => {}", result.result_type.cyan());
        for diagnostic in &result.diagnostics {
            println!(
                "  {} {:?}: {}",
                "error:".red().bold(),
                diagnostic.error_class,
                diagnostic.header
            );
        }
        if result.diagnostics.is_empty() {
            println!("  {}", "no diagnostics".green());
        }
        println!();
    }
}
