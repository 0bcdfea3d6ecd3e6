//! Unordered collection of dispatched, not-yet-issued instructions.
//!
//! Grounded on the teacher's in-order backend issue scan
//! (`core/pipeline/backend/inorder/issue.rs`): walk a list of waiting
//! instructions, testing operand readiness, issuing up to the machine's
//! width per cycle. This queue additionally consults the load-store queue
//! for memory instructions, since here there is no separate cache stage to
//! arbitrate memory access.

use crate::isa::instruction::Instruction;
use crate::pipeline::lsq::Lsq;
use crate::regfile::ready_table::ReadyTable;

/// Dispatched instructions awaiting issue, identified by their index into
/// the scheduler's instruction log. Scanned in insertion (program) order,
/// though issue itself is out-of-order: an entry further back may issue
/// before one ahead of it if its operands become ready first.
#[derive(Debug, Default)]
pub struct IssueQueue {
    entries: Vec<usize>,
}

impl IssueQueue {
    /// Creates an empty issue queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any instruction is waiting to issue.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of instructions waiting to issue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Appends a newly dispatched instruction.
    pub fn push(&mut self, index: usize) {
        self.entries.push(index);
    }

    /// Scans the queue in program order, issuing up to `width` ready
    /// instructions: stamps their `issue_cycle`, removes them from the
    /// queue, and returns their indices (callers add them to the executing
    /// set). A memory instruction is skipped unless the load-store queue
    /// says it is the head of program-order memory ops.
    pub fn scan_issue(
        &mut self,
        width: u32,
        instructions: &mut [Instruction],
        ready: &ReadyTable,
        lsq: &Lsq,
        cycle: u64,
    ) -> Vec<usize> {
        let mut issued = Vec::new();
        for &index in &self.entries {
            if issued.len() as u32 >= width {
                break;
            }
            let inst = &instructions[index];
            let src0_ready = inst.src_reg_0.is_none_or(|r| ready.is_ready(r));
            let src1_ready = inst.src_reg_1.is_none_or(|r| ready.is_ready(r));
            if !src0_ready || !src1_ready {
                continue;
            }
            if inst.kind.is_memory() && !lsq.can_execute(index) {
                continue;
            }
            issued.push(index);
        }
        for &index in &issued {
            instructions[index].stamps.issue = Some(cycle);
        }
        if !issued.is_empty() {
            self.entries.retain(|index| !issued.contains(index));
        }
        issued
    }
}
