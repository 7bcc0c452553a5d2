//! Gravitris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches can use `gravitris::{core, input, term, types}`.

pub use gravitris_core as core;
pub use gravitris_input as input;
pub use gravitris_term as term;
pub use gravitris_types as types;
