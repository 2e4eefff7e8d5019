//! Shared state for the management API.
//!
//! This module defines the state available to all request handlers.

use std::sync::Arc;

use stratadb_kube::{ServiceClient, ServiceReconciler};
use stratadb_store::Store;

use crate::config::OperatorConfig;

/// Shared application state for the management API.
///
/// This struct holds references to the services the HTTP handlers need.
pub struct OperatorState<C, S>
where
    C: ServiceClient,
    S: Store,
{
    /// The Service reconciler.
    pub reconciler: Arc<ServiceReconciler<C>>,
    /// Bookkeeping store for reconciled Services.
    pub store: Arc<S>,
    /// Operator configuration.
    pub config: OperatorConfig,
}

impl<C, S> OperatorState<C, S>
where
    C: ServiceClient,
    S: Store,
{
    /// Create a new operator state.
    #[must_use]
    pub fn new(
        reconciler: Arc<ServiceReconciler<C>>,
        store: Arc<S>,
        config: OperatorConfig,
    ) -> Self {
        Self {
            reconciler,
            store,
            config,
        }
    }
}

impl<C, S> Clone for OperatorState<C, S>
where
    C: ServiceClient,
    S: Store,
{
    fn clone(&self) -> Self {
        Self {
            reconciler: Arc::clone(&self.reconciler),
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}
