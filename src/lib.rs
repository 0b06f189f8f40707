//! Welp - a cache-tiered restaurant review and reservation deployment
//!
//! A bounded cache with five eviction policies, latency-emulating and
//! file-backed storage, the cache-aside protocol run by each data service,
//! and the replica routing used by the gateway.

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod routing;
pub mod rpc;
pub mod services;
pub mod storage;

pub use config::{Config, Role};
pub use coordinator::CacheAside;
pub use error::{Result, WelpError};
