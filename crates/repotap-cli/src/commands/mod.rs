//! CLI commands

pub mod apply;
pub mod provision;
