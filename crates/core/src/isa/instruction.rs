//! Instruction representation: raw parsed form, the renamed in-flight form,
//! and the per-stage cycle stamps attached to it.

use serde::{Deserialize, Serialize};

/// Architectural register name, in `[0, ARCH_REGS)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchReg(pub u32);

/// Physical register name, in `[0, phys_regs)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhysReg(pub u32);

/// Instruction kind, fixing how its three raw operand fields are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// ALU, register-register.
    R,
    /// ALU, register-immediate.
    I,
    /// Load.
    L,
    /// Store.
    S,
}

impl Kind {
    /// Whether this kind goes through the load-store queue.
    #[must_use]
    pub fn is_memory(self) -> bool {
        matches!(self, Kind::L | Kind::S)
    }
}

/// One instruction exactly as it appeared in the input file, before rename.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawInstruction {
    /// Instruction kind.
    pub kind: Kind,
    /// First raw operand field.
    pub a: u32,
    /// Second raw operand field.
    pub b: u32,
    /// Third raw operand field (offset/immediate; never read by the scheduler).
    pub c: u32,
}

/// The cycle at which an instruction entered each of the seven pipeline
/// stages. A field is `None` until that stage has processed the instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStamps {
    /// Cycle of fetch.
    pub fetch: Option<u64>,
    /// Cycle of decode.
    pub decode: Option<u64>,
    /// Cycle of rename.
    pub rename: Option<u64>,
    /// Cycle of dispatch.
    pub dispatch: Option<u64>,
    /// Cycle of issue.
    pub issue: Option<u64>,
    /// Cycle of writeback.
    pub writeback: Option<u64>,
    /// Cycle of commit.
    pub commit: Option<u64>,
}

/// An instruction's lifetime state in the scheduler.
///
/// Lives in the single, append-only `instructions` log owned by the
/// scheduler; every other structure (latches, issue queue, ROB, LSQ) refers
/// to it by `index` rather than holding it directly.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Position in program (fetch) order; also this instruction's index in
    /// the owning log.
    pub index: usize,
    /// Instruction kind.
    pub kind: Kind,

    /// Architectural destination, if any (kinds R, I, L).
    pub dst_arch: Option<ArchReg>,
    /// Architectural first source, if any.
    pub src_arch_0: Option<ArchReg>,
    /// Architectural second source, if any.
    pub src_arch_1: Option<ArchReg>,

    /// Renamed destination. Set by rename; `None` before rename or for kinds
    /// without a destination.
    pub dst_reg: Option<PhysReg>,
    /// Renamed first source. Set by rename.
    pub src_reg_0: Option<PhysReg>,
    /// Renamed second source. Set by rename.
    pub src_reg_1: Option<PhysReg>,

    /// Per-stage cycle stamps.
    pub stamps: CycleStamps,
}

impl Instruction {
    /// Builds a fresh in-flight instruction from its raw form, stamping fetch.
    #[must_use]
    pub fn fetch(index: usize, raw: RawInstruction, cycle: u64) -> Self {
        let (dst_arch, src_arch_0, src_arch_1) = operand_arch_regs(raw);
        Self {
            index,
            kind: raw.kind,
            dst_arch,
            src_arch_0,
            src_arch_1,
            dst_reg: None,
            src_reg_0: None,
            src_reg_1: None,
            stamps: CycleStamps {
                fetch: Some(cycle),
                ..CycleStamps::default()
            },
        }
    }
}

/// Maps a raw instruction's `(a, b, c)` fields to architectural
/// destination/source registers, per kind.
fn operand_arch_regs(raw: RawInstruction) -> (Option<ArchReg>, Option<ArchReg>, Option<ArchReg>) {
    match raw.kind {
        Kind::R => (
            Some(ArchReg(raw.a)),
            Some(ArchReg(raw.b)),
            Some(ArchReg(raw.c)),
        ),
        Kind::I => (Some(ArchReg(raw.a)), Some(ArchReg(raw.b)), None),
        Kind::L => (Some(ArchReg(raw.a)), Some(ArchReg(raw.b)), None),
        // a = value source, b = base source; c (offset) is not a register.
        Kind::S => (None, Some(ArchReg(raw.a)), Some(ArchReg(raw.b))),
    }
}
