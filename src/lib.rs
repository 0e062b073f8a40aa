pub mod api;
pub mod chart;
pub mod clean;
pub mod conf;
pub mod core;
pub mod export;
pub mod ingest;
pub mod service;
pub mod session;
pub mod summary;
pub mod table;

#[cfg(feature = "testutil")]
pub mod testutil;
