//! # ventlink-domain
//!
//! Pure domain model for talking to a heat-recovery ventilation unit.
//!
//! ## Responsibilities
//! - Foundational types: device addresses, error taxonomy, device time
//! - Define the operating [`Mode`](mode::Mode) and the named switches, fans and
//!   temperature sensors a unit exposes
//! - Define the [`AirUnitState`](state::AirUnitState) snapshot and its
//!   incremental updates
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod address;
pub mod error;
pub mod mode;
pub mod property;
pub mod state;
pub mod time;
