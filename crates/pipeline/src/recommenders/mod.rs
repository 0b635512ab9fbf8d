//! `Recommender` implementations.
//!
//! Each strategy lives in its own crate; this module only adapts it to the
//! shared trait so the driver can run them side by side.

pub mod graph;
pub mod remote;

/// Strategy names used in logs and reports
pub const GRAPH_STRATEGY: &str = "graph";
pub const REMOTE_STRATEGY: &str = "remote";
