//! Run statistics: cycles elapsed, instructions committed, and IPC.
//!
//! Grounded on the teacher's `SimStats` (cycle/instruction counters with a
//! `print`/`print_sections` human-readable report), trimmed to the handful
//! of numbers this scheduler's single fetch-to-commit pipeline actually
//! produces — there is no cache hierarchy, branch predictor, or privilege
//! mode to report on here.

use serde::Serialize;

/// Summary of one scheduler run, reported by the CLI's `--stats` and
/// `--stats-json` options.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RunStats {
    /// Number of cycles the scheduler ran for.
    pub cycles: u64,
    /// Number of instructions that reached commit.
    pub instructions_committed: u64,
    /// Whether the run ended with the pipeline stuck (instructions still
    /// in flight, no stage making progress).
    pub stuck: bool,
}

impl RunStats {
    /// Builds a run summary from the scheduler's outcome.
    #[must_use]
    pub fn new(cycles: u64, instructions_committed: u64, stuck: bool) -> Self {
        Self {
            cycles,
            instructions_committed,
            stuck,
        }
    }

    /// Instructions committed per cycle. `0.0` for a zero-cycle run.
    #[must_use]
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_committed as f64 / self.cycles as f64
        }
    }

    /// Renders the one-line human-readable summary printed by `--stats`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        if self.stuck {
            format!(
                "cycles={} committed={} ipc={:.4} (pipeline stuck)",
                self.cycles,
                self.instructions_committed,
                self.ipc()
            )
        } else {
            format!(
                "cycles={} committed={} ipc={:.4}",
                self.cycles,
                self.instructions_committed,
                self.ipc()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipc_divides_committed_by_cycles() {
        let stats = RunStats::new(8, 4, false);
        assert!((stats.ipc() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn ipc_is_zero_for_a_zero_cycle_run() {
        let stats = RunStats::new(0, 0, false);
        assert_eq!(stats.ipc(), 0.0);
    }

    #[test]
    fn summary_line_flags_a_stuck_run() {
        let stats = RunStats::new(3, 0, true);
        assert!(stats.summary_line().contains("stuck"));
    }
}
