//! Core validation pipeline and its data model.

pub mod buildlog;
pub mod contract;
pub mod descriptor;
pub mod parser;
pub mod pipeline;
pub mod testlog;
pub mod types;
