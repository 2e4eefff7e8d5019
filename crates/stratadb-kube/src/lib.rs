//! Kubernetes Service reconciliation for StrataDB clusters.
//!
//! This crate owns the operator's one cluster capability: creating and
//! deleting `Service` objects within a single namespace. It provides:
//!
//! - [`ServiceClient`]: the capability seam over the Kubernetes API
//! - [`KubeServiceClient`]: the kube-backed implementation
//! - [`ServiceReconciler`]: the create/delete operations with the
//!   operator's logging and failure policy
//!
//! Every control-plane call is a single round trip. There are no retries,
//! no caching and no local locking; conflicting operations on the same
//! Service name are resolved by the control plane's own conflict
//! detection.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use stratadb_kube::{KubeServiceClient, ServiceReconciler};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = kube::Client::try_default().await?;
//! let services = Arc::new(KubeServiceClient::new(client, "strata-clusters"));
//! let reconciler = ServiceReconciler::new(services);
//!
//! let manifest = br#"{"metadata": {"name": "strata-db"}}"#;
//! let created = reconciler.create_service_from_json(manifest).await?;
//! println!("created {:?}", created.metadata.name);
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! Enable the `test-utils` feature for `MockServiceClient`, an in-memory
//! stand-in for the control plane that enforces name uniqueness the way
//! the API server would.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod reconciler;

pub use client::{KubeServiceClient, ServiceClient};
pub use error::{Result, ServiceError};
pub use reconciler::ServiceReconciler;

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock::MockServiceClient;
