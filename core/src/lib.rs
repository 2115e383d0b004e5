//! adspend-core — the interactive ad-spend scenario engine.
//!
//! DATA FLOW (one user session):
//!   1. loader reshapes the wide historical table into long-form views
//!      (cached by the session).
//!   2. The session maps slider input into one remote scoring call
//!      (predictor) and a relative-change metric.
//!   3. merger fuses the live scenario into the history — the one artifact
//!      the rendering layer consumes.
//!   4. committer promotes an accepted scenario into the next historical
//!      period, after which the cached views are invalidated.
//!
//! The store (SQLite) and the scoring service are the only remote
//! boundaries; both are injected, never ambient.

pub mod committer;
pub mod config;
pub mod error;
pub mod loader;
pub mod merger;
pub mod predictor;
pub mod scoring;
pub mod session;
pub mod store;
pub mod types;
