//! # Promptdeck Architecture
//!
//! Promptdeck is a **UI-agnostic prompt gallery library**: a read-only deck of
//! prompt cards that can be searched, filtered by category, model and tags,
//! sorted, paged through, expanded, copied and starred. The bundled CLI is one
//! client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, writes clipboard    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the session state        │
//! │  - Normalizes inputs (positions / ids → CardSelector)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per user operation, returns CmdResult       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Gallery Core                                               │
//! │  - controller: event handling, visible set, pager           │
//! │  - predicate / sort / pagination: pure functions            │
//! │  - store: card sources + read-only CardStore                │
//! │  - favorites: flags persisted in a KeyValueStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Visible Set
//!
//! The visible set is a pure function of the store, the filter state and the
//! sort key. The controller recomputes it synchronously on every filter, search
//! or sort event and resets the pager to page 1; page navigation only moves
//! the window over it. Cards themselves are never mutated after load.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward code takes Rust values and returns Rust values. Loading
//! a card source and reading/writing the favorites file are the only I/O, and
//! both sit behind traits ([`store::CardSource`], [`store::kv::KeyValueStore`])
//! with in-memory implementations for tests.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`controller`]: Gallery session state and event handling
//! - [`predicate`]: Card/filter matching
//! - [`sort`]: Sort keys and ordering
//! - [`pagination`]: Page windows and pager state
//! - [`debounce`]: Quiet-period coalescing for search input
//! - [`store`]: Card sources, the card store, key-value storage
//! - [`favorites`]: Persistent favorite flags
//! - [`model`]: `Card` and the input document
//! - [`config`]: Configuration and data directory
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`error`]: Error types

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod favorites;
pub mod model;
pub mod pagination;
pub mod predicate;
pub mod sort;
pub mod store;
