//! Revisa — assignment submission validation.
//!
//! Compile the submission, verify the structural contract, run the test
//! suite, return one verdict with diagnostics.

pub mod audit;
pub mod cli;
pub mod core;
pub mod exec;
pub mod fsys;
