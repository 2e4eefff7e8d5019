//! Control process and management API for StrataDB cluster networking.
//!
//! The operator is a long-running process that reconciles Kubernetes
//! `Service` objects for StrataDB database clusters and exposes an HTTP
//! management API for doing so.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Management clients                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    stratadb-operator                         │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐   │
//! │  │  Supervisor │ │   Router    │ │    Config           │   │
//! │  │  (signals)  │ │  + Handlers │ │    Loader           │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┴──────────────┐
//!               ▼                             ▼
//!        ┌─────────────┐               ┌─────────────┐
//!        │ Reconciler  │               │   Store     │
//!        │ (kube API)  │               │ (RocksDB)   │
//!        └─────────────┘               └─────────────┘
//! ```
//!
//! The supervisor starts the API server as a background task and then
//! waits for exactly one termination signal; SIGTERM exits cleanly,
//! every other recognized signal exits non-zero. See [`supervisor`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod supervisor;

pub use config::{ConfigError, OperatorConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::OperatorState;
pub use supervisor::ShutdownSignal;
