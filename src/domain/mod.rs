// Core trace synthesis: pure functions of the snippet text, no I/O.

pub mod callstack;
pub mod classifier;
pub mod data_structure;
pub mod flowgraph;
pub mod inference;
pub mod language;
pub mod memory;
pub mod trace;
pub mod value;
