//! # greenhub-domain
//!
//! Pure domain model for the greenhub watering timer system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Greenhouses** (independently timed watering plots and their
//!   countdown state)
//! - Define the **Registry** (the fixed, ordered set of greenhouses plus the
//!   active-timer pointer)
//! - Define the **Watering Log** (bounded, newest-first history of completed
//!   and canceled runs)
//! - Contain all invariant enforcement and timer state logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod duration;
pub mod greenhouse;
pub mod log;
pub mod registry;
