//! External process execution.
//!
//! Encoders never spawn processes directly. They build a [`CommandLine`]
//! and hand it to a [`ProcessRunner`], which lets tests substitute a fake
//! runner that returns scripted statuses and writes the files a real tool
//! would have produced.

mod command;
mod runner;

pub use command::{CommandLine, ProcessStatus, StreamPolicy};
pub use runner::{ProcessRunner, SystemRunner};
