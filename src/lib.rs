//! # Planning Rust Backend
//!
//! Scheduling core for a newsroom planning calendar.
//!
//! This crate implements the event-side planning logic of a newsroom
//! calendar. Events carry a schedule that is edited through pure transforms
//! and a recurrence rule that expands into a concrete series of
//! occurrences. When one occurrence of a series is edited, the update-scope
//! services resolve how far the change reaches into the rest of the series
//! and its planning items. Persistence sits behind async repository traits
//! with an in-memory implementation.
//!
//! ## Features
//!
//! - **Schedule Editing**: Pure transforms over an event's start, end,
//!   all-day and to-be-confirmed state, with timezone-aware nudging
//! - **Recurring Series**: Expand daily, weekly, monthly and yearly
//!   recurrence rules into persisted event series
//! - **Update Scoping**: Resolve which series events and planning items an
//!   edit reaches, and which confirmation prompts it needs
//! - **Editing Sessions**: A lock-to-save editing flow over a repository
//! - **Repository Pattern**: Pluggable persistence behind async traits
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifiers, update methods, and the public type surface
//! - [`config`]: TOML configuration for the editor and the repository
//! - [`models`]: Events, planning items, recurrence rules, time helpers
//! - [`db`]: Repository traits, factory, and the in-memory backend
//! - [`services`]: Schedule transforms, series expansion, editing sessions

// Allow large error types - RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;

pub mod db;
pub mod models;

pub mod services;
