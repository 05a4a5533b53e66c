//! sb-link command line support: argument model, the `decode` command and
//! tracing setup. The binary in `main.rs` only wires these together.

pub mod cli;
pub mod tracing_init;
