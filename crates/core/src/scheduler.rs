//! The seven-stage cycle loop: fetch, decode, rename, dispatch, issue,
//! writeback, commit, plus the progress/termination logic that drives them.
//!
//! Grounded on the teacher's `Pipeline::tick` (`core/pipeline/engine.rs`),
//! which runs its backend before its frontend so later stages observe the
//! prior cycle's state of earlier ones, and on `rename_stage`
//! (`core/pipeline/frontend/rename.rs`) for the stall/re-insert-at-head
//! pattern. Every stage here is a plain method taking `&mut self`; there is
//! no trait boundary between stages since nothing outside this module ever
//! needs to substitute one.

use tracing::{debug, trace};

use crate::config::{ARCH_REGS, MachineConfig};
use crate::isa::instruction::{Instruction, Kind, RawInstruction};
use crate::pipeline::{IssueQueue, Latch, Lsq, Rob};
use crate::regfile::{FreeList, MapTable, ReadyTable};

/// Result of running a schedule to completion (or to a detected stuck
/// state): the final instruction log, in program order, and whether the
/// pipeline got stuck before every instruction committed.
#[derive(Debug)]
pub struct Outcome {
    /// Every fetched instruction, in program order, with whatever cycle
    /// stamps it reached before the run ended.
    pub instructions: Vec<Instruction>,
    /// Whether the loop exited with instructions still in flight.
    pub stuck: bool,
    /// Number of cycles the loop ran for.
    pub cycles: u64,
}

/// Owns every pipeline structure and the instruction log, and drives the
/// cycle loop to completion or to a detected stuck state.
#[derive(Debug)]
pub struct Scheduler {
    config: MachineConfig,
    cycle: u64,
    still_fetching: bool,
    stuck: bool,

    /// Every fetched instruction, indexed by program order. Single owner;
    /// every other structure below holds indices into this log.
    instructions: Vec<Instruction>,

    decode_latch: Latch<usize>,
    rename_latch: Latch<usize>,
    dispatch_latch: Latch<usize>,

    issue_queue: IssueQueue,
    /// Issued, not-yet-written-back instructions of any kind.
    executing: Vec<usize>,
    rob: Rob,
    lsq: Lsq,

    map_table: MapTable,
    free_list: FreeList,
    ready_table: ReadyTable,
}

impl Scheduler {
    /// Creates a scheduler for the given machine configuration. No
    /// instructions are fetched until [`Scheduler::run`] is called.
    #[must_use]
    pub fn new(config: MachineConfig) -> Self {
        let width = config.issue_width as usize;
        Self {
            config,
            cycle: 0,
            still_fetching: true,
            stuck: false,
            instructions: Vec::new(),
            decode_latch: Latch::new(width),
            rename_latch: Latch::new(width),
            dispatch_latch: Latch::new(width),
            issue_queue: IssueQueue::new(),
            executing: Vec::new(),
            rob: Rob::new(),
            lsq: Lsq::new(),
            map_table: MapTable::new(ARCH_REGS),
            free_list: FreeList::new(ARCH_REGS, config.phys_regs),
            ready_table: ReadyTable::new(ARCH_REGS, config.phys_regs),
        }
    }

    /// Runs every instruction in `stream` to completion (or to a detected
    /// stuck pipeline), returning the final instruction log in program
    /// order plus whether the pipeline got stuck.
    pub fn run(mut self, mut stream: impl Iterator<Item = RawInstruction>) -> Outcome {
        loop {
            let still_in_flight = self.instructions.iter().any(|i| i.stamps.commit.is_none());
            if !self.still_fetching && !still_in_flight {
                break;
            }
            let progress = self.run_cycle(&mut stream);
            if !progress {
                // A no-progress cycle only means "stuck" if scheduling was
                // still in progress; it may instead coincide with the run
                // naturally finishing (e.g. an empty instruction stream).
                let instructions_remain = self.instructions.iter().any(|i| i.stamps.commit.is_none());
                if self.still_fetching || instructions_remain {
                    debug!(cycle = self.cycle, "pipeline made no progress; stuck");
                    self.stuck = true;
                }
                break;
            }
        }
        Outcome {
            instructions: self.instructions,
            stuck: self.stuck,
            cycles: self.cycle,
        }
    }

    /// Runs every stage once, back-to-front, then advances the cycle
    /// counter and flushes deferred register frees. Returns whether any
    /// stage did observable work.
    fn run_cycle(&mut self, stream: &mut impl Iterator<Item = RawInstruction>) -> bool {
        let cycle = self.cycle;
        trace!(cycle, "cycle begin");

        let committed = self.commit(cycle);
        let wrote_back = self.writeback(cycle);
        let issued = self.issue(cycle);
        let dispatched = self.dispatch(cycle);
        let renamed = self.rename(cycle);
        let decoded = self.decode(cycle);
        let fetched = self.fetch(stream, cycle);

        self.free_list.flush_pending();
        self.cycle += 1;

        committed || wrote_back || issued || dispatched || renamed || decoded || fetched
    }

    /// Fetch: pulls up to `W` new instructions from the stream.
    fn fetch(&mut self, stream: &mut impl Iterator<Item = RawInstruction>, cycle: u64) -> bool {
        if !self.still_fetching {
            return false;
        }
        let mut fetched = false;
        for _ in 0..self.config.issue_width {
            let Some(raw) = stream.next() else {
                self.still_fetching = false;
                break;
            };
            let index = self.instructions.len();
            let inst = Instruction::fetch(index, raw, cycle);
            trace!(cycle, index, kind = ?inst.kind, "fetch");
            self.instructions.push(inst);
            self.decode_latch.push_back(index);
            fetched = true;
        }
        fetched
    }

    /// Decode: drains the decode latch into the rename latch, uncapped.
    fn decode(&mut self, cycle: u64) -> bool {
        let mut any = false;
        let drained: Vec<usize> = self.decode_latch.drain_all().collect();
        for index in drained {
            self.instructions[index].stamps.decode = Some(cycle);
            trace!(cycle, index, "decode");
            self.rename_latch.push_back(index);
            any = true;
        }
        any
    }

    /// Rename: renames sources and allocates a destination for each
    /// instruction in the rename latch, in program order, stalling on
    /// free-list exhaustion.
    fn rename(&mut self, cycle: u64) -> bool {
        let mut any = false;
        while let Some(index) = self.rename_latch.pop_front() {
            let needs_dst = self.instructions[index].dst_arch.is_some();
            if needs_dst && self.free_list.is_empty() {
                trace!(cycle, index, "rename stall: free list empty");
                self.rename_latch.push_front(index);
                break;
            }

            let inst = &mut self.instructions[index];
            if let Some(src0) = inst.src_arch_0 {
                inst.src_reg_0 = Some(self.map_table.get(src0));
            }
            if let Some(src1) = inst.src_arch_1 {
                inst.src_reg_1 = Some(self.map_table.get(src1));
            }
            if let Some(dst) = inst.dst_arch {
                // `needs_dst` checked the free list was non-empty above.
                if let Some(phys) = self.free_list.allocate() {
                    self.map_table.set(dst, phys);
                    self.ready_table.clear(phys);
                    inst.dst_reg = Some(phys);
                }
            }
            inst.stamps.rename = Some(cycle);
            trace!(cycle, index, "rename");
            self.dispatch_latch.push_back(index);
            any = true;
        }
        any
    }

    /// Dispatch: drains the dispatch latch into the issue queue, the ROB,
    /// and (for memory ops) the LSQ.
    fn dispatch(&mut self, cycle: u64) -> bool {
        let mut any = false;
        let drained: Vec<usize> = self.dispatch_latch.drain_all().collect();
        for index in drained {
            self.instructions[index].stamps.dispatch = Some(cycle);
            trace!(cycle, index, "dispatch");
            self.issue_queue.push(index);
            self.rob.push(index);
            if self.instructions[index].kind.is_memory() {
                self.lsq.push(index);
            }
            any = true;
        }
        any
    }

    /// Issue: scans the issue queue in program order, issuing up to `W`
    /// ready instructions into the executing set.
    fn issue(&mut self, cycle: u64) -> bool {
        let issued = self.issue_queue.scan_issue(
            self.config.issue_width,
            &mut self.instructions,
            &self.ready_table,
            &self.lsq,
            cycle,
        );
        for &index in &issued {
            trace!(cycle, index, "issue");
        }
        let any = !issued.is_empty();
        self.executing.extend(issued);
        any
    }

    /// Writeback: non-memory instructions writeback unconditionally once
    /// issued; memory instructions writeback only at the LSQ head.
    fn writeback(&mut self, cycle: u64) -> bool {
        let mut any = false;

        let ready_non_memory: Vec<usize> = self
            .executing
            .iter()
            .copied()
            .filter(|&index| {
                let inst = &self.instructions[index];
                matches!(inst.kind, Kind::R | Kind::I)
                    && inst.stamps.issue.is_some()
                    && inst.stamps.writeback.is_none()
            })
            .collect();
        for index in ready_non_memory {
            let dst = self.instructions[index].dst_reg;
            self.instructions[index].stamps.writeback = Some(cycle);
            if let Some(reg) = dst {
                self.ready_table.set_ready(reg);
            }
            trace!(cycle, index, "writeback (non-memory)");
            any = true;
        }

        if let Some(index) = self.lsq.get_executable(&self.instructions) {
            let kind = self.instructions[index].kind;
            let dst = self.instructions[index].dst_reg;
            if kind == Kind::L {
                if let Some(reg) = dst {
                    self.ready_table.set_ready(reg);
                }
            }
            self.instructions[index].stamps.writeback = Some(cycle);
            self.lsq.pop_front();
            trace!(cycle, index, "writeback (memory)");
            any = true;
        }

        self.executing
            .retain(|&index| self.instructions[index].stamps.writeback.is_none());
        any
    }

    /// Commit: walks the ROB head, retiring every consecutive written-back
    /// instruction and staging its `dst_reg` for release at cycle boundary.
    fn commit(&mut self, cycle: u64) -> bool {
        let freed = self.rob.commit_ready(&mut self.instructions, cycle);
        let any = !freed.is_empty();
        for reg in freed {
            self.free_list.stage_free(reg);
        }
        any
    }
}
