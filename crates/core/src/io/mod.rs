//! Line-based input parsing and output table emission.
//!
//! Grounded on the teacher's `sim/loader.rs` for module placement (glue
//! that turns an external file into the in-memory shapes the simulator
//! core consumes) even though the formats themselves are unrelated to
//! binary loading: a `P,W` header plus `K,a,b,c` instruction records in,
//! a seven-column cycle table out.

/// Parses the header line and instruction records.
pub mod parser;
/// Emits the per-instruction seven-stage cycle table.
pub mod writer;

pub use parser::parse;
pub use writer::write_schedule;
