//! # greenhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports):
//!   - `StateStore` — durable persistence for the registry and watering log
//!   - `Clock` — the injectable time source driving the countdown
//!   - `EventPublisher` — fan-out of watering events
//! - Provide the **timer controller** use-case (`TimerService`): start,
//!   tick, cancel, and acknowledge transitions, plus read-only snapshots
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `greenhub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
