//! Quiz engine used by the `quickmath` binary, the integration tests and the
//! criterion benchmarks. Terminal rendering and input live in the binary.

pub mod config;
pub mod engine;
pub mod generator;
pub mod session;
pub mod store;
