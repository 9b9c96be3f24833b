#![allow(clippy::unwrap_used, clippy::expect_used)]

use http::{Method, Request, Response};
use k8s_provider::KubernetesProvider;
use k8s_provider_framework::ProviderServer;
use kube::Client;
use kube::client::Body;
use serde_json::{Value, json};

const API_SERVICE_MANIFEST: &str = "k8s_apiregistration_k8s_io_api_service_v1_manifest";
const LEASE: &str = "k8s_coordination_k8s_io_lease_v1";

fn offline_server() -> ProviderServer<KubernetesProvider> {
    ProviderServer::new(KubernetesProvider::new()).expect("provider schema is valid")
}

#[test]
fn metadata_lists_every_data_source() {
    let metadata = offline_server().metadata();
    assert_eq!(metadata.type_name, "k8s");
    assert_eq!(metadata.data_sources.len(), 10);
    assert!(metadata.data_sources.iter().any(|name| name == API_SERVICE_MANIFEST));
    assert!(
        metadata
            .data_sources
            .iter()
            .any(|name| name == "k8s_gateway_networking_k8s_io_gateway_class_v1")
    );
}

#[test]
fn schema_exposes_wire_and_terraform_names() {
    let schema = offline_server().schema();
    let manifest = &schema.data_sources[API_SERVICE_MANIFEST];
    let spec = manifest.get("spec").expect("spec attribute");
    assert!(spec.is_required());
    let children = spec.children().unwrap();
    let priority = children
        .iter()
        .find(|a| a.name == "group_priority_minimum")
        .unwrap();
    assert_eq!(priority.json_name.as_deref(), Some("groupPriorityMinimum"));
}

#[tokio::test]
async fn manifest_reads_work_offline() {
    let mut server = offline_server();
    let diags = server.configure(&json!({"offline": true})).await;
    assert!(diags.is_empty(), "{diags}");

    let response = server
        .read_data_source(
            API_SERVICE_MANIFEST,
            &json!({
                "metadata": {"name": "v1.example.com"},
                "spec": {"group_priority_minimum": 100, "version_priority": 10}
            }),
        )
        .await;
    assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);
    let state = response.state.unwrap();
    assert_eq!(
        state["yaml"],
        "apiVersion: apiregistration.k8s.io/v1\nkind: APIService\nmetadata:\n  name: v1.example.com\nspec:\n  groupPriorityMinimum: 100\n  versionPriority: 10\n"
    );
}

#[tokio::test]
async fn live_reads_fail_offline() {
    let mut server = offline_server();
    assert!(server.configure(&json!({"offline": true})).await.is_empty());

    let response = server
        .read_data_source(LEASE, &json!({"metadata": {"name": "lock", "namespace": "default"}}))
        .await;
    assert!(response.state.is_none());
    assert_eq!(response.diagnostics.len(), 1);
    assert!(
        response
            .diagnostics
            .iter()
            .all(|d| d.summary == "Provider in offline mode")
    );
}

#[tokio::test]
async fn invalid_config_is_rejected_before_read() {
    let server = offline_server();
    let response = server
        .read_data_source(
            API_SERVICE_MANIFEST,
            &json!({
                "metadata": {"name": "Not_A_Name"},
                "spec": {"group_priority_minimum": 0, "version_priority": 10, "color": "blue"}
            }),
        )
        .await;
    assert!(response.state.is_none());
    let summaries: Vec<&str> = response
        .diagnostics
        .iter()
        .map(|d| d.summary.as_str())
        .collect();
    assert!(summaries.contains(&"Invalid Attribute Value Match"));
    assert!(summaries.contains(&"Invalid Attribute Value"));
    assert!(summaries.contains(&"Unsupported argument"));
}

#[tokio::test]
async fn unknown_data_source_is_reported() {
    let response = offline_server()
        .read_data_source("k8s_example_v1", &json!({}))
        .await;
    assert!(
        response
            .diagnostics
            .iter()
            .all(|d| d.summary == "Unknown Data Source Type")
    );
}

#[tokio::test]
async fn live_read_through_configured_client() {
    let (service, mut handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
    let client = Client::new(service, "default");
    let mut server =
        ProviderServer::new(KubernetesProvider::with_client(client)).expect("valid schema");
    let diags = server.configure(&Value::Null).await;
    assert!(diags.is_empty(), "{diags}");

    let api_server = tokio::spawn(async move {
        let (request, send) = handle.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::GET);
        assert_eq!(
            request.uri().path(),
            "/apis/coordination.k8s.io/v1/namespaces/kube-system/leases/kube-scheduler"
        );
        let body = json!({
            "apiVersion": "coordination.k8s.io/v1",
            "kind": "Lease",
            "metadata": {"name": "kube-scheduler", "namespace": "kube-system"},
            "spec": {
                "holderIdentity": "node-1",
                "leaseDurationSeconds": 15,
                "renewTime": "2024-05-01T10:00:00.000000Z"
            }
        });
        send.send_response(
            Response::builder()
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        );
    });

    let response = server
        .read_data_source(
            LEASE,
            &json!({"metadata": {"name": "kube-scheduler", "namespace": "kube-system"}}),
        )
        .await;
    api_server.await.unwrap();

    assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);
    let state = response.state.unwrap();
    assert_eq!(state["id"], "kube-system/kube-scheduler");
    assert_eq!(state["kind"], "Lease");
    assert_eq!(state["spec"]["holder_identity"], "node-1");
    assert_eq!(state["spec"]["lease_duration_seconds"], 15);
    assert_eq!(state["spec"]["renew_time"], "2024-05-01T10:00:00.000000Z");
    assert_eq!(state["spec"]["strategy"], Value::Null);
}

#[tokio::test]
async fn out_of_range_integers_are_rejected_before_render() {
    let server = offline_server();
    let config = json!({
        "metadata": {"name": "lock", "namespace": "default"},
        "spec": {"lease_duration_seconds": 3_000_000_000_i64}
    });

    let diags =
        server.validate_data_source_config("k8s_coordination_k8s_io_lease_v1_manifest", &config);
    assert_eq!(diags.len(), 1);
    assert!(diags.iter().all(|d| d.summary == "Invalid Attribute Value"));

    let response = server
        .read_data_source("k8s_coordination_k8s_io_lease_v1_manifest", &config)
        .await;
    assert!(response.state.is_none());
    assert!(
        response
            .diagnostics
            .iter()
            .all(|d| d.summary != "Unable to unmarshal resource")
    );
}
