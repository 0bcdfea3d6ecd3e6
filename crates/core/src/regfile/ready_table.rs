//! Per-physical-register ready bit.
//!
//! Grounded on the teacher's tag-based scoreboard (`Scoreboard`), which maps
//! each architectural register to the ROB tag of its pending producer. This
//! scheduler instead indexes by physical register directly and tracks a
//! plain boolean, since renaming already resolves "who produces this value"
//! at rename time — issue only needs to know "has it been produced yet".

use crate::isa::instruction::PhysReg;

/// Tracks, for every physical register, whether its value has been produced.
#[derive(Debug)]
pub struct ReadyTable {
    ready: Vec<bool>,
}

impl ReadyTable {
    /// Creates a ready table for `phys_regs` registers. The initial
    /// architectural registers `[0, arch_regs)` start ready (their values
    /// exist before simulation begins); the rest start not-ready.
    #[must_use]
    pub fn new(arch_regs: u32, phys_regs: u32) -> Self {
        Self {
            ready: (0..phys_regs).map(|r| r < arch_regs).collect(),
        }
    }

    /// Whether `reg`'s value has been produced.
    #[must_use]
    pub fn is_ready(&self, reg: PhysReg) -> bool {
        self.ready[reg.0 as usize]
    }

    /// Marks `reg` as not yet produced. Called when rename allocates it.
    pub fn clear(&mut self, reg: PhysReg) {
        self.ready[reg.0 as usize] = false;
    }

    /// Marks `reg` as produced. Called when its instruction writes back.
    pub fn set_ready(&mut self, reg: PhysReg) {
        self.ready[reg.0 as usize] = true;
    }
}
