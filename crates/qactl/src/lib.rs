//! qactl - command-line front end for the qa-matcher corpus matcher
//!
//! The binary is a thin shell over these modules so the command surface can
//! be exercised without spawning a process.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
pub mod repl;
