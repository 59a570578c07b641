//! Error types, split per component the way the failures are surfaced:
//! catalog errors are configuration mistakes and are returned synchronously,
//! delivery errors cover the scheduler's synchronous contract (transient
//! transfer failures travel through the attempt state machine instead), and
//! data errors belong to the aggregator queries.
pub mod catalog;
pub mod data;
pub mod delivery;
