//! A continuous double-auction matching core: price-time priority,
//! limit/market matching, O(log n) cancellation, and per-symbol
//! snapshotting.
//!
//! The core is synchronous and lock-based, designed to be driven from
//! multiple request-handling threads at once; it never touches a wall
//! clock or a source of randomness directly, instead taking a
//! [`time::Clock`] and an [`ids::IdGenerator`] as collaborators at the
//! boundary that calls into it. See [`prelude`] for the common imports.

pub mod domain;
pub mod engine;
pub mod error;
pub mod ids;
pub mod orderbook;
pub mod prelude;
pub mod time;
