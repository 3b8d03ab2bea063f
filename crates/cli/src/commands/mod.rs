//! Command implementations.

mod assemble;
mod run;

pub use assemble::assemble_blueprint;
pub use run::run_bridge;
