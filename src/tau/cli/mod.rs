//! # CLI Layer
//!
//! This module is **one possible UI client** for tau, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, prompts)
//! - Initializes logging
//! - Picks the concrete collaborators (files, HTTP clients, dialoguer)
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup.rs`: the root clap command, global flags and top-level commands
//! - `commands.rs`: `run()`, session wiring and dispatch
//! - `prompt.rs`: the dialoguer-backed `Prompter`
//! - `render.rs`: `CmdResult` to terminal text

mod commands;
mod prompt;
mod render;
mod setup;

pub use commands::run;
