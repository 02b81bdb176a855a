//! agentd: Property Agent Registry
//!
//! An HTTP service managing property agent records in memory. Every create
//! and update passes through a declarative validation pipeline that reports
//! all field violations at once.

pub mod agent;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod types;
