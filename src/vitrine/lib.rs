//! # Vitrine Architecture
//!
//! Vitrine is a **UI-agnostic faceted browsing engine** for e-commerce
//! catalogs. This is not a CLI application that happens to have some
//! library code—it's a library that happens to have a CLI client.
//!
//! The engine takes an in-memory catalog snapshot and provides everything
//! a listing surface needs: the facet catalog (what can be filtered), the
//! filter state (what is selected), a shareable address serialization of
//! that state, and a debounced filter → sort → paginate pipeline.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, main.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (session.rs)                                 │
//! │  - Composes facets, state, address sync, and the pipeline   │
//! │  - Owns the debounce scheduler and the page cursor          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine Layer (facets, state, params, pipeline, listing)    │
//! │  - Pure functions over plain values                         │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Catalog Layer (store/)                                     │
//! │  - Abstract CatalogSource trait                             │
//! │  - JsonCatalog (production), InMemoryCatalog (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `session.rs` inward, code takes regular Rust arguments, returns
//! regular Rust types, never writes to stdout/stderr, and never assumes a
//! navigation runtime. The address is an injected [`params::AddressPort`];
//! the debounce timer is clock-injected and poll-driven. The same core
//! could sit behind a web frontend, a TUI, or these CLI commands.
//!
//! ## State Discipline
//!
//! All selection changes flow through the pure
//! [`state::reduce`]`(state, event) → (state, effect)` transition. The
//! returned effect tells the session whether the address must be rewritten
//! and the pipeline re-armed; cosmetic changes (expand/collapse, view
//! more) produce no effect. This keeps the synchronizer and the pipeline
//! testable without any UI in the loop.
//!
//! ## Module Overview
//!
//! - [`session`]: The facade—entry point for a composed filter+listing view
//! - [`facets`]: Facet catalog derivation from the snapshot and scope
//! - [`state`]: Filter state, events, and the pure reducer
//! - [`params`]: Address (query string) serialization and the address port
//! - [`pipeline`]: The filter → sort transformation
//! - [`listing`]: Page slicing and summary presentation
//! - [`debounce`]: Trailing-edge cancelable trigger
//! - [`store`]: Catalog abstraction and implementations
//! - [`model`]: Core data types (`Item`, `Scope`, `SortOption`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod config;
pub mod debounce;
pub mod error;
pub mod facets;
pub mod listing;
pub mod model;
pub mod params;
pub mod pipeline;
pub mod session;
pub mod state;
pub mod store;
