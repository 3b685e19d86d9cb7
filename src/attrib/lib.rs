//! # Attrib Architecture
//!
//! Attrib manages the **typed attributes** attached to a managed entity: where a
//! device is, what hardware it has, which HA partners a service has, which
//! credentials a registry needs. Each attribute kind is a concrete Rust type; the
//! library decides how (and whether) one attribute can be merged into another.
//!
//! Like any library with a CLI client, the core knows nothing about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets the exit code     │
//! │  - Installs the tracing subscriber                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: paths in, CmdResult out                     │
//! │  - Loads and saves attribute documents and config           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - show, apply, check, config                               │
//! │  - Operates on AttributeSet, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (attributes/, set.rs, meta.rs)                       │
//! │  - The closed set of attribute kinds and their merge rules  │
//! │  - Plain owned values, no I/O                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O in the Model
//!
//! Everything under `attributes/`, `set.rs` and `meta.rs` is pure data and
//! logic. Files are touched only by [`document`] and [`config`], and only at
//! the API's request. Logging goes through `tracing`; the library never
//! installs a subscriber.
//!
//! ## Testing Strategy
//!
//! 1. **Model** (`attributes/`, `set.rs`, `meta.rs`): merge semantics,
//!    projections and serialization. Most tests live here.
//! 2. **Commands** (`commands/*.rs`): messages and results for each command.
//! 3. **API** (`api.rs`): documents are read and written in the right place.
//! 4. **CLI** (`tests/cli.rs`): end-to-end runs of the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`attributes`]: Attribute kinds, the kind registry, projections and filters
//! - [`meta`]: Metadata shared by every attribute
//! - [`set`]: Collections of attributes keyed by id
//! - [`commands`]: Business logic for each command
//! - [`document`]: Reading and writing attribute documents
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod attributes;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod meta;
pub mod set;
