//! TetJeweled (workspace facade crate).
//!
//! Re-exports the member crates under one roof so the binary, integration
//! tests, and benches can use `tetjeweled::{core,input,term,types}`.

pub use tetjeweled_core as core;
pub use tetjeweled_input as input;
pub use tetjeweled_term as term;
pub use tetjeweled_types as types;
