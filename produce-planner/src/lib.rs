//! Produce shipment planner.
//!
//! Answers: "Starting from this location with this much vehicle capacity,
//! which goods should I ship to which destinations to make the most money
//! before they spoil?"

pub mod config;
pub mod domain;
pub mod graph;
pub mod ingest;
pub mod optimizer;
pub mod report;
pub mod web;
