//! # Tau Architecture
//!
//! Tau is the core of a command-line client for a multi-resource cloud
//! platform. Like most of its kind it is a library that happens to have a CLI
//! client: everything below `main.rs` and `cli/` is UI agnostic.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, owns the terminal     │
//! │  - Builds the Session of concrete collaborators             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Composition (verbs.rs, compose.rs, alias.rs, resources/)   │
//! │  - Fixed verb table, per-resource capability descriptors    │
//! │  - Builds the `tau <verb> <resource>` tree once at startup  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, select.rs)                   │
//! │  - Login and network resolution, profile commands          │
//! │  - Every "pick one value" goes through SelectionRequest     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage + Remote (store/, remote/)                         │
//! │  - ProfileStore: FileProfileStore, InMemoryProfileStore     │
//! │  - Ephemeral cloud, FQDN validation, runtime session        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! Commands take a [`commands::Session`] and return a [`commands::CmdResult`].
//! They never print and never exit; prompting goes through the
//! [`select::Prompter`] trait, so tests script answers instead of typing them.
//!
//! ## Testing Strategy
//!
//! - Command logic is unit tested against [`store::memory::InMemoryProfileStore`]
//!   and the fakes in `test_utils`.
//! - The file-backed store and session are tested against temp directories.
//! - `tests/` drives the binary end to end with `TAU_HOME` pointing at a temp dir.

pub mod alias;
pub mod commands;
pub mod compose;
pub mod config;
pub mod error;
pub mod model;
pub mod remote;
pub mod resources;
pub mod select;
pub mod store;
pub mod verbs;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
