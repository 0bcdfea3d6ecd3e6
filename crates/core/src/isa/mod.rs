//! Instruction set: the record kind every pipeline stage operates on.

/// Instruction kinds, the raw parsed form, renamed in-flight form, and
/// per-stage cycle stamps.
pub mod instruction;

pub use instruction::{ArchReg, CycleStamps, Instruction, Kind, PhysReg, RawInstruction};
