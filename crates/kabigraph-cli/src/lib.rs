//! CLI plumbing for the `kabi-parser` and `kabi-lookup` binaries.

pub mod cli;
pub mod commands;
