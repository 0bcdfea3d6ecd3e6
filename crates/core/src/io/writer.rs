//! Emits the per-instruction seven-stage cycle table, or an empty file if
//! the schedule never finished.

use std::io::Write;

use crate::isa::instruction::Instruction;

/// Writes one `fetch,decode,rename,dispatch,issue,writeback,commit` line
/// per instruction, in program order. If `stuck` is true, writes nothing at
/// all: an empty output file is this system's signal for a stuck pipeline.
///
/// # Errors
///
/// Returns any I/O error encountered writing to `writer`.
pub fn write_schedule(
    mut writer: impl Write,
    instructions: &[Instruction],
    stuck: bool,
) -> std::io::Result<()> {
    if stuck {
        return Ok(());
    }
    for inst in instructions {
        let s = inst.stamps;
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            stamp(s.fetch),
            stamp(s.decode),
            stamp(s.rename),
            stamp(s.dispatch),
            stamp(s.issue),
            stamp(s.writeback),
            stamp(s.commit),
        )?;
    }
    Ok(())
}

/// Renders a cycle stamp for output; an unset stamp should never reach
/// `write_schedule` in a non-stuck run, but prints as empty rather than
/// panicking if it does.
fn stamp(cycle: Option<u64>) -> String {
    cycle.map_or_else(String::new, |c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::instruction::{Kind, RawInstruction};

    fn committed(index: usize) -> Instruction {
        let mut inst = Instruction::fetch(
            index,
            RawInstruction {
                kind: Kind::R,
                a: 1,
                b: 2,
                c: 3,
            },
            0,
        );
        inst.stamps.decode = Some(1);
        inst.stamps.rename = Some(2);
        inst.stamps.dispatch = Some(3);
        inst.stamps.issue = Some(4);
        inst.stamps.writeback = Some(5);
        inst.stamps.commit = Some(6);
        inst
    }

    #[test]
    fn writes_one_line_per_instruction() {
        let instructions = vec![committed(0)];
        let mut out = Vec::new();
        write_schedule(&mut out, &instructions, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0,1,2,3,4,5,6\n");
    }

    #[test]
    fn stuck_pipeline_writes_an_empty_file() {
        let instructions = vec![committed(0)];
        let mut out = Vec::new();
        write_schedule(&mut out, &instructions, true).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn empty_instruction_log_writes_an_empty_file() {
        let mut out = Vec::new();
        write_schedule(&mut out, &[], false).unwrap();
        assert!(out.is_empty());
    }
}
