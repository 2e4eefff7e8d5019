//! Idempotent Service create/delete operations.

use std::sync::Arc;

use k8s_openapi::api::core::v1::Service;
use tracing::info;

use crate::client::ServiceClient;
use crate::error::Result;

/// Reconciles Services against the cluster control plane.
///
/// The reconciler is stateless and reentrant: it holds no mutable state,
/// so concurrent invocations from multiple in-flight requests are safe.
/// Races on the same Service name are resolved by the control plane's
/// conflict detection, not locally.
pub struct ServiceReconciler<C> {
    client: Arc<C>,
}

impl<C: ServiceClient> ServiceReconciler<C> {
    /// Create a reconciler over the given cluster client.
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Decode a JSON manifest and create the Service it describes.
    ///
    /// # Errors
    ///
    /// Returns a `Decode` error if the payload is not a valid Service
    /// manifest; the control plane is not contacted in that case.
    /// Otherwise errors are those of [`Self::create_service`].
    pub async fn create_service_from_json(&self, payload: &[u8]) -> Result<Service> {
        let service: Service = serde_json::from_slice(payload)?;
        self.create_service(&service).await
    }

    /// Create a Service in the configured namespace.
    ///
    /// Returns the control plane's view of the Service, which may carry
    /// server-populated fields such as the assigned cluster IP. A create
    /// for a name that already exists fails with the control plane's
    /// conflict error; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns a `Create` error wrapping the control plane's rejection.
    pub async fn create_service(&self, service: &Service) -> Result<Service> {
        let created = self.client.create(service).await?;
        let name = created.metadata.name.as_deref().unwrap_or_default();
        info!(
            service = %name,
            namespace = %self.client.namespace(),
            "Service created"
        );
        Ok(created)
    }

    /// Delete the named Services, one control-plane call per name, in
    /// input order.
    ///
    /// This is a best-effort cleanup sweep: every name is attempted
    /// regardless of earlier failures, each attempt is logged, and
    /// per-name failures are swallowed. Callers that need per-name
    /// outcomes must use [`ServiceClient::delete`] directly.
    ///
    /// # Errors
    ///
    /// Never fails once every name has been attempted. The fallible
    /// signature is kept so the sweep policy can change without touching
    /// callers.
    pub async fn delete_services(&self, names: &[String]) -> Result<()> {
        for name in names {
            match self.client.delete(name).await {
                Ok(()) => info!(service = %name, "Service deleted"),
                Err(error) => info!(service = %name, error = %error, "Service delete failed"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockServiceClient;
    use crate::error::ServiceError;

    fn manifest(name: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": { "name": name },
            "spec": { "selector": { "app": name }, "ports": [{ "port": 4000 }] }
        }))
        .unwrap()
    }

    fn reconciler() -> (Arc<MockServiceClient>, ServiceReconciler<MockServiceClient>) {
        let client = Arc::new(MockServiceClient::new("strata-clusters"));
        (Arc::clone(&client), ServiceReconciler::new(client))
    }

    #[tokio::test]
    async fn create_from_json_returns_the_server_view() {
        let (client, reconciler) = reconciler();

        let created = reconciler
            .create_service_from_json(&manifest("strata-db"))
            .await
            .unwrap();

        assert_eq!(created.metadata.name.as_deref(), Some("strata-db"));
        assert_eq!(
            created.spec.unwrap().cluster_ip.as_deref(),
            Some("10.96.0.10")
        );
        assert_eq!(client.create_calls(), vec!["strata-db"]);
    }

    #[tokio::test]
    async fn malformed_payload_never_reaches_the_cluster() {
        let (client, reconciler) = reconciler();

        let err = reconciler
            .create_service_from_json(b"{not json")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Decode(_)));
        assert!(client.create_calls().is_empty());
    }

    #[tokio::test]
    async fn schema_mismatch_is_a_decode_error() {
        let (client, reconciler) = reconciler();

        // metadata must be an object, not a string
        let err = reconciler
            .create_service_from_json(br#"{"metadata": "strata-db"}"#)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Decode(_)));
        assert!(client.create_calls().is_empty());
    }

    #[tokio::test]
    async fn duplicate_create_surfaces_the_conflict() {
        let (client, reconciler) = reconciler();

        reconciler
            .create_service_from_json(&manifest("strata-db"))
            .await
            .unwrap();
        let err = reconciler
            .create_service_from_json(&manifest("strata-db"))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        // Two invocations, two create calls: no local retry.
        assert_eq!(client.create_calls().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_creates_for_one_name_yield_one_winner() {
        let (_client, reconciler) = reconciler();
        let service: Service = serde_json::from_slice(&manifest("strata-db")).unwrap();

        let (a, b) = tokio::join!(
            reconciler.create_service(&service),
            reconciler.create_service(&service)
        );

        assert_eq!([&a, &b].iter().filter(|r| r.is_err()).count(), 1);
        let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
        assert!(loser.is_conflict());
    }

    #[tokio::test]
    async fn delete_sweep_attempts_every_name_in_order() {
        let (client, reconciler) = reconciler();
        reconciler
            .create_service_from_json(&manifest("svc-a"))
            .await
            .unwrap();
        reconciler
            .create_service_from_json(&manifest("svc-b"))
            .await
            .unwrap();

        let names = vec![
            "svc-a".to_string(),
            "svc-missing".to_string(),
            "svc-b".to_string(),
        ];
        reconciler.delete_services(&names).await.unwrap();

        assert_eq!(client.delete_calls(), names);
        assert_eq!(client.service_count(), 0);
    }

    #[tokio::test]
    async fn delete_sweep_with_no_names_is_a_no_op() {
        let (client, reconciler) = reconciler();

        reconciler.delete_services(&[]).await.unwrap();

        assert!(client.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn delete_sweep_attempts_duplicates_again() {
        let (client, reconciler) = reconciler();
        reconciler
            .create_service_from_json(&manifest("svc-a"))
            .await
            .unwrap();

        let names = vec!["svc-a".to_string(), "svc-a".to_string()];
        reconciler.delete_services(&names).await.unwrap();

        assert_eq!(client.delete_calls().len(), 2);
    }
}
