//! # greenhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API consumed by the presentation layer
//!   (`/api/greenhouses`, `/api/logs`, …)
//! - Map HTTP requests into timer service calls (driving adapter)
//! - Map timer errors into HTTP responses with appropriate status codes
//!
//! The presentation layer itself (cards, modal, countdown display) lives
//! outside this repository; this crate only exposes the actions it can
//! trigger (start, cancel, acknowledge) and the snapshots it renders.
//!
//! ## Dependency rule
//! Depends on `greenhub-app` (for port traits and the timer service) and
//! `greenhub-domain` (for types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
