//! Service management endpoints.
//!
//! These handlers are thin: they hand payloads to the reconciler and
//! translate its errors. The delete endpoint inherits the reconciler's
//! best-effort sweep contract and therefore always succeeds.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use stratadb_kube::ServiceClient;
use stratadb_store::{ServiceRecord, Store, StoreError};

use crate::error::ApiError;
use crate::state::OperatorState;

/// Request to delete a batch of Services.
#[derive(Debug, Deserialize)]
pub struct DeleteServicesBody {
    /// Service names to delete, attempted in order.
    pub names: Vec<String>,
}

/// Response for a delete sweep.
#[derive(Debug, Serialize)]
pub struct DeleteServicesResponse {
    /// Number of names attempted.
    pub attempted: usize,
}

/// Response for the service list.
#[derive(Debug, Serialize)]
pub struct ListServicesResponse {
    /// Records for Services created through this operator.
    pub services: Vec<ServiceRecord>,
}

/// Create a Service from a raw JSON manifest.
///
/// The body is passed to the reconciler as opaque bytes; the platform's
/// Service schema is the only contract on it.
///
/// # Errors
///
/// Returns 400 for manifests that do not decode, and maps control-plane
/// rejections by category (409 conflict, 404 missing namespace, 400
/// invalid spec, 502 otherwise).
pub async fn create_service<C, S>(
    State(state): State<Arc<OperatorState<C, S>>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    C: ServiceClient + 'static,
    S: Store + 'static,
{
    let created = state.reconciler.create_service_from_json(&body).await?;

    let record = ServiceRecord {
        name: created.metadata.name.clone().unwrap_or_default(),
        namespace: created
            .metadata
            .namespace
            .clone()
            .unwrap_or_else(|| state.config.namespace.clone()),
        cluster_ip: created.spec.as_ref().and_then(|s| s.cluster_ip.clone()),
        created_at: Utc::now(),
    };
    // The cluster is authoritative; a bookkeeping failure must not undo
    // a successful create.
    if let Err(error) = state.store.put_service(&record) {
        tracing::warn!(
            service = %record.name,
            error = %error,
            "Failed to record created service"
        );
    }

    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete the named Services, best-effort.
///
/// Every name is attempted in order; per-name failures are logged by the
/// reconciler and swallowed, so the response always reports the number
/// of names attempted.
///
/// # Errors
///
/// Never fails under the current sweep policy.
pub async fn delete_services<C, S>(
    State(state): State<Arc<OperatorState<C, S>>>,
    Json(body): Json<DeleteServicesBody>,
) -> Result<impl IntoResponse, ApiError>
where
    C: ServiceClient + 'static,
    S: Store + 'static,
{
    state.reconciler.delete_services(&body.names).await?;

    for name in &body.names {
        match state.store.delete_service(name) {
            Ok(()) | Err(StoreError::NotFound) => {}
            Err(error) => {
                tracing::warn!(service = %name, error = %error, "Failed to drop service record");
            }
        }
    }

    Ok(Json(DeleteServicesResponse {
        attempted: body.names.len(),
    }))
}

/// List Services created through this operator.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub async fn list_services<C, S>(
    State(state): State<Arc<OperatorState<C, S>>>,
) -> Result<impl IntoResponse, ApiError>
where
    C: ServiceClient + 'static,
    S: Store + 'static,
{
    let services = state.store.list_services()?;

    Ok(Json(ListServicesResponse { services }))
}
