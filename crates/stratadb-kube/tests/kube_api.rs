//! Wire-level tests for `KubeServiceClient` against a fake API server.

use std::sync::Arc;

use k8s_openapi::api::core::v1::Service;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stratadb_kube::{KubeServiceClient, ServiceClient, ServiceReconciler};

async fn kube_client(server: &MockServer) -> kube::Client {
    let uri = server.uri().parse::<http::Uri>().expect("mock server uri");
    kube::Client::try_from(kube::Config::new(uri)).expect("kube client")
}

fn service_named(name: &str) -> Service {
    serde_json::from_value(json!({ "metadata": { "name": name } })).unwrap()
}

fn status_body(reason: &str, message: &str, code: u16) -> serde_json::Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code,
    })
}

#[tokio::test]
async fn create_posts_to_the_namespaced_services_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/namespaces/strata-clusters/services"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": { "name": "strata-db", "namespace": "strata-clusters" },
            "spec": { "clusterIP": "10.96.0.12" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = KubeServiceClient::new(kube_client(&server).await, "strata-clusters");

    let created = client.create(&service_named("strata-db")).await.unwrap();
    assert_eq!(
        created.spec.unwrap().cluster_ip.as_deref(),
        Some("10.96.0.12")
    );
}

#[tokio::test]
async fn conflict_statuses_surface_as_conflicts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/namespaces/strata-clusters/services"))
        .respond_with(ResponseTemplate::new(409).set_body_json(status_body(
            "AlreadyExists",
            "services \"strata-db\" already exists",
            409,
        )))
        .mount(&server)
        .await;

    let client = KubeServiceClient::new(kube_client(&server).await, "strata-clusters");

    let err = client.create(&service_named("strata-db")).await.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.http_status_code(), 409);
}

#[tokio::test]
async fn delete_sweep_continues_past_missing_names() {
    let server = MockServer::start().await;
    for name in ["svc-a", "svc-b"] {
        Mock::given(method("DELETE"))
            .and(path(format!(
                "/api/v1/namespaces/strata-clusters/services/{name}"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "Status",
                "apiVersion": "v1",
                "metadata": {},
                "status": "Success"
            })))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/api/v1/namespaces/strata-clusters/services/svc-missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(status_body(
            "NotFound",
            "services \"svc-missing\" not found",
            404,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(KubeServiceClient::new(
        kube_client(&server).await,
        "strata-clusters",
    ));
    let reconciler = ServiceReconciler::new(client);

    let names = vec![
        "svc-a".to_string(),
        "svc-missing".to_string(),
        "svc-b".to_string(),
    ];
    // Each mock's expect(1) verifies every name was attempted exactly once.
    reconciler.delete_services(&names).await.unwrap();
}
