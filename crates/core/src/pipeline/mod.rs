//! Pipeline structures: the bounded latches between stages, the issue
//! queue, the reorder buffer, and the load-store queue.
//!
//! None of these own an [`crate::isa::instruction::Instruction`] directly;
//! they hold its `index` into the scheduler's single `instructions` log and
//! look it up there, per the ownership model in the design notes.

/// Bounded inter-stage FIFO with head re-insertion for rename stalls.
pub mod latches;
/// Unordered, program-order-scanned issue queue.
pub mod issue_queue;
/// Load-store queue enforcing in-order memory execution.
pub mod lsq;
/// Reorder buffer driving in-order commit.
pub mod rob;

pub use issue_queue::IssueQueue;
pub use latches::Latch;
pub use lsq::Lsq;
pub use rob::Rob;
