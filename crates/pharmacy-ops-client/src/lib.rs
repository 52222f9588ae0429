//! Pharmacy Ops Client
//!
//! Async HTTP client for the pharmacy backend API. [`DashboardClient`]
//! implements [`pharmacy_ops_core::billing::BillingBackend`], so the core's
//! checkout and stock-entry flows run against the real backend through it.
//!
//! # Modules
//!
//! - [`config`]: Client configuration (file + `PHARMACY_OPS__*` environment)
//! - [`client`]: The HTTP client and its error mapping
//! - [`endpoints`]: Backend paths
//! - [`telemetry`]: `tracing` subscriber setup for binaries and tests

pub mod client;
pub mod config;
pub mod endpoints;
pub mod telemetry;

mod error;

pub use client::DashboardClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
