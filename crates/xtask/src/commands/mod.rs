//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod catalog;
mod simulate;
mod verify;

pub use catalog::Catalog;
pub use simulate::Simulate;
pub use verify::Verify;
