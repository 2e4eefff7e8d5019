//! Kubernetes client for Service resources.
//!
//! This module provides the [`ServiceClient`] capability seam and its
//! kube-backed implementation. The client is deliberately narrow: create
//! and delete, one namespace, one round trip per call.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, DeleteParams, PostParams};
use kube::Client;

use crate::error::{Result, ServiceError};

/// The `ServiceClient` trait defines the single capability the operator
/// needs from the cluster: Create and Delete on Service resources within
/// the configured namespace.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Create a Service in the configured namespace.
    ///
    /// Returns the control plane's authoritative view of the created
    /// Service, including server-populated fields.
    ///
    /// # Errors
    ///
    /// Returns an error wrapping the control plane's rejection (name
    /// conflict, invalid spec, missing namespace, transport failure).
    async fn create(&self, service: &Service) -> Result<Service>;

    /// Delete a Service by name in the configured namespace.
    ///
    /// # Errors
    ///
    /// Returns an error wrapping the control plane's rejection.
    async fn delete(&self, name: &str) -> Result<()>;

    /// The namespace all operations are scoped to.
    fn namespace(&self) -> &str;
}

/// Kubernetes-backed implementation of [`ServiceClient`].
///
/// Every call is a single synchronous round trip to the API server;
/// there are no retries and no caching. Name-uniqueness conflicts are
/// the control plane's to detect and surface, not validated locally.
pub struct KubeServiceClient {
    client: Client,
    namespace: String,
}

impl KubeServiceClient {
    /// Create a new client scoped to `namespace`.
    ///
    /// The kube client is injected so tests can point it at a fake API
    /// server.
    #[must_use]
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    /// Get the Services API for the configured namespace.
    fn services_api(&self) -> Api<Service> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }
}

#[async_trait]
impl ServiceClient for KubeServiceClient {
    async fn create(&self, service: &Service) -> Result<Service> {
        let name = service.metadata.name.clone().unwrap_or_default();
        self.services_api()
            .create(&PostParams::default(), service)
            .await
            .map_err(|source| ServiceError::Create { name, source })
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.services_api()
            .delete(name, &DeleteParams::default())
            .await
            .map(|_| ())
            .map_err(|source| ServiceError::Delete {
                name: name.to_string(),
                source,
            })
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// A mock Service client for testing without a real cluster.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::collections::BTreeMap;

    use k8s_openapi::api::core::v1::ServiceSpec;
    use kube::core::ErrorResponse;
    use parking_lot::Mutex;

    use super::{async_trait, Result, Service, ServiceClient, ServiceError};

    /// A mock client that stores Services in memory.
    ///
    /// Uniqueness is enforced the way the API server would enforce it: a
    /// second create for the same name fails with a 409 `AlreadyExists`
    /// error, and deleting an unknown name fails with a 404. Calls are
    /// recorded in order so tests can assert on them.
    #[derive(Default)]
    pub struct MockServiceClient {
        namespace: String,
        services: Mutex<BTreeMap<String, Service>>,
        creates: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
    }

    impl MockServiceClient {
        /// Create a mock client scoped to `namespace`.
        #[must_use]
        pub fn new(namespace: impl Into<String>) -> Self {
            Self {
                namespace: namespace.into(),
                ..Self::default()
            }
        }

        /// Names passed to `create`, in call order.
        #[must_use]
        pub fn create_calls(&self) -> Vec<String> {
            self.creates.lock().clone()
        }

        /// Names passed to `delete`, in call order.
        #[must_use]
        pub fn delete_calls(&self) -> Vec<String> {
            self.deletes.lock().clone()
        }

        /// Number of Services currently stored.
        #[must_use]
        pub fn service_count(&self) -> usize {
            self.services.lock().len()
        }

        fn api_error(reason: &str, message: String, code: u16) -> kube::Error {
            kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message,
                reason: reason.to_string(),
                code,
            })
        }
    }

    #[async_trait]
    impl ServiceClient for MockServiceClient {
        async fn create(&self, service: &Service) -> Result<Service> {
            let name = service.metadata.name.clone().unwrap_or_default();
            self.creates.lock().push(name.clone());

            let mut services = self.services.lock();
            if services.contains_key(&name) {
                return Err(ServiceError::Create {
                    source: Self::api_error(
                        "AlreadyExists",
                        format!("services {name:?} already exists"),
                        409,
                    ),
                    name,
                });
            }

            // The API server fills in fields the caller left empty.
            let mut created = service.clone();
            created.metadata.namespace = Some(self.namespace.clone());
            created
                .spec
                .get_or_insert_with(ServiceSpec::default)
                .cluster_ip = Some("10.96.0.10".to_string());
            services.insert(name, created.clone());
            Ok(created)
        }

        async fn delete(&self, name: &str) -> Result<()> {
            self.deletes.lock().push(name.to_string());

            if self.services.lock().remove(name).is_none() {
                return Err(ServiceError::Delete {
                    name: name.to_string(),
                    source: Self::api_error(
                        "NotFound",
                        format!("services {name:?} not found"),
                        404,
                    ),
                });
            }
            Ok(())
        }

        fn namespace(&self) -> &str {
            &self.namespace
        }
    }
}
