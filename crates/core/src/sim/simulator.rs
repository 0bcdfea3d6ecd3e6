//! Top-level `run`: owns nothing beyond the call stack. Parses the input,
//! hands the instruction stream to a fresh [`crate::scheduler::Scheduler`],
//! and writes the result.
//!
//! Grounded on the teacher's `Simulator` (owning the CPU and pipeline
//! side-by-side and driving `tick` to completion); this system has no
//! persistent simulator object to construct since a `Scheduler` is built
//! fresh, run once, and consumed per invocation.

use std::io::{BufRead, Write};

use tracing::info;

use crate::common::error::SimError;
use crate::io::{parser, writer};
use crate::scheduler::Scheduler;
use crate::stats::RunStats;

/// Parses `input`, runs the scheduler to completion (or until stuck), and
/// writes the resulting schedule to `output`.
///
/// # Errors
///
/// Returns [`SimError::Parse`] if the input is malformed, or
/// [`SimError::Io`] if writing the output fails.
pub fn run(input: impl BufRead, output: impl Write) -> Result<RunStats, SimError> {
    let (config, raw_instructions) = parser::parse(input)?;
    info!(
        phys_regs = config.phys_regs,
        issue_width = config.issue_width,
        instructions = raw_instructions.len(),
        "starting schedule"
    );

    let scheduler = Scheduler::new(config);
    let outcome = scheduler.run(raw_instructions.into_iter());

    if outcome.stuck {
        info!(cycle = outcome.cycles, "pipeline stuck; emitting empty output");
    } else {
        info!(
            cycles = outcome.cycles,
            committed = outcome.instructions.len(),
            "schedule finished"
        );
    }

    writer::write_schedule(output, &outcome.instructions, outcome.stuck)?;

    Ok(RunStats::new(
        outcome.cycles,
        outcome.instructions.len() as u64,
        outcome.stuck,
    ))
}
