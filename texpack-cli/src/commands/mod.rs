//! CLI subcommands.

pub mod analyze;
pub mod check;
pub mod common;
pub mod encode;
pub mod pack;
