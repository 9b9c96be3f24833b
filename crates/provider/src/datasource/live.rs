use std::marker::PhantomData;

use k8s_provider_framework::state::to_state;
use k8s_provider_framework::{DataSource, Diagnostics, ReadResponse, Schema, async_trait};
use kube::api::{ApiResource, DynamicObject};
use kube::{Api, Client};
use serde_json::Value;
use tracing::{Span, debug, field, instrument, warn};

use super::live_schema;
use crate::kinds::CrdKind;
use crate::provider::ProviderData;
use crate::{Error, Result, telemetry, utilities};

/// Reads one object of kind `K` from the cluster
pub struct LiveDataSource<K> {
    client: Option<Client>,
    schema: Schema,
    kind: PhantomData<fn() -> K>,
}

impl<K: CrdKind> LiveDataSource<K> {
    /// Unconfigured data source, reads fail as offline until configured
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: None,
            schema: live_schema::<K>(),
            kind: PhantomData,
        }
    }

    /// Data source bound to `client`
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client: Some(client),
            ..Self::new()
        }
    }

    #[instrument(skip(self, config), fields(
        data_source = K::TYPE_NAME,
        name = field::Empty,
        namespace = field::Empty,
        trace_id = field::Empty,
    ))]
    async fn fetch(&self, config: &Value) -> Result<Value> {
        let trace_id = telemetry::get_trace_id();
        if trace_id != opentelemetry::trace::TraceId::INVALID {
            Span::current().record("trace_id", field::display(&trace_id));
        }

        let client = self.client.clone().ok_or(Error::Offline)?;

        let metadata = &config["metadata"];
        let name = metadata["name"]
            .as_str()
            .ok_or_else(|| Error::MissingAttribute("metadata.name".to_string()))?;
        Span::current().record("name", name);

        let resource = ApiResource::erase::<K>(&());
        let (api, id): (Api<DynamicObject>, String) = if K::NAMESPACED {
            let namespace = metadata["namespace"]
                .as_str()
                .ok_or_else(|| Error::MissingAttribute("metadata.namespace".to_string()))?;
            Span::current().record("namespace", namespace);
            (
                Api::namespaced_with(client, namespace, &resource),
                format!("{namespace}/{name}"),
            )
        } else {
            (Api::all_with(client, &resource), name.to_string())
        };

        let object = api.get(name).await.map_err(|source| Error::Get {
            resource: resource.plural.clone(),
            name: id.clone(),
            source,
        })?;
        debug!("fetched object from API server");

        let typed: K = serde_json::from_value(serde_json::to_value(object)?)?;
        let mut state = to_state(&self.schema.attributes, &serde_json::to_value(&typed)?)?;
        state["id"] = Value::String(id);

        Ok(state)
    }
}

impl<K: CrdKind> Default for LiveDataSource<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: CrdKind> DataSource<ProviderData> for LiveDataSource<K> {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_{}", K::TYPE_NAME)
    }

    fn schema(&self) -> Schema {
        self.schema.clone()
    }

    fn configure(&mut self, data: &ProviderData) -> Diagnostics {
        self.client = data.client().cloned();
        Diagnostics::new()
    }

    async fn read(&self, config: &Value) -> ReadResponse {
        match self.fetch(config).await {
            Ok(state) => ReadResponse::state(state),
            Err(err) => {
                warn!(data_source = K::TYPE_NAME, error = %err, "read failed");
                ReadResponse::error(utilities::diagnostic(&err))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use http::{Method, Request, Response, StatusCode};
    use k8s_provider_crd::{APIService, Lease};
    use kube::client::Body;
    use serde_json::json;

    use super::*;

    type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;

    fn mock_client() -> (Client, ApiServerHandle) {
        let (service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
        (Client::new(service, "default"), handle)
    }

    /// Answers exactly one GET on `path` with `status` and `body`
    fn serve_once(
        mut handle: ApiServerHandle,
        path: &'static str,
        status: StatusCode,
        body: Value,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), Method::GET);
            assert_eq!(request.uri().path(), path);
            send.send_response(
                Response::builder()
                    .status(status)
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            );
        })
    }

    fn api_service_json() -> Value {
        json!({
            "apiVersion": "apiregistration.k8s.io/v1",
            "kind": "APIService",
            "metadata": {
                "name": "v1beta1.metrics.k8s.io",
                "labels": {"k8s-app": "metrics-server"},
                "resourceVersion": "42",
                "uid": "5b1c7e0a"
            },
            "spec": {
                "group": "metrics.k8s.io",
                "groupPriorityMinimum": 100,
                "insecureSkipTLSVerify": true,
                "service": {"name": "metrics-server", "namespace": "kube-system", "port": 443},
                "version": "v1beta1",
                "versionPriority": 100
            }
        })
    }

    #[tokio::test]
    async fn reads_cluster_scoped_object() {
        let (client, handle) = mock_client();
        let server = serve_once(
            handle,
            "/apis/apiregistration.k8s.io/v1/apiservices/v1beta1.metrics.k8s.io",
            StatusCode::OK,
            api_service_json(),
        );

        let data_source = LiveDataSource::<APIService>::with_client(client);
        let response = data_source
            .read(&json!({"metadata": {"name": "v1beta1.metrics.k8s.io"}}))
            .await;
        server.await.unwrap();

        assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);
        let state = response.state.expect("state");
        assert_eq!(state["id"], "v1beta1.metrics.k8s.io");
        assert_eq!(state["api_version"], "apiregistration.k8s.io/v1");
        assert_eq!(state["kind"], "APIService");
        assert_eq!(
            state["metadata"],
            json!({
                "name": "v1beta1.metrics.k8s.io",
                "labels": {"k8s-app": "metrics-server"},
                "annotations": null
            })
        );
        assert_eq!(
            state["spec"],
            json!({
                "ca_bundle": null,
                "group": "metrics.k8s.io",
                "group_priority_minimum": 100,
                "insecure_skip_tls_verify": true,
                "service": {"name": "metrics-server", "namespace": "kube-system", "port": 443},
                "version": "v1beta1",
                "version_priority": 100
            })
        );
    }

    #[tokio::test]
    async fn reads_namespaced_object() {
        let (client, handle) = mock_client();
        let server = serve_once(
            handle,
            "/apis/coordination.k8s.io/v1/namespaces/kube-system/leases/kube-scheduler",
            StatusCode::OK,
            json!({
                "apiVersion": "coordination.k8s.io/v1",
                "kind": "Lease",
                "metadata": {"name": "kube-scheduler", "namespace": "kube-system"},
                "spec": {"holderIdentity": "node-1", "leaseDurationSeconds": 15}
            }),
        );

        let data_source = LiveDataSource::<Lease>::with_client(client);
        let response = data_source
            .read(&json!({"metadata": {"name": "kube-scheduler", "namespace": "kube-system"}}))
            .await;
        server.await.unwrap();

        let state = response.state.expect("state");
        assert_eq!(state["id"], "kube-system/kube-scheduler");
        assert_eq!(state["metadata"]["namespace"], "kube-system");
        assert_eq!(state["spec"]["holder_identity"], "node-1");
        assert_eq!(state["spec"]["lease_duration_seconds"], 15);
        assert_eq!(state["spec"]["renew_time"], Value::Null);
    }

    #[tokio::test]
    async fn offline_read_makes_no_request() {
        let data_source = LiveDataSource::<APIService>::new();
        let response = data_source
            .read(&json!({"metadata": {"name": "v1.example.com"}}))
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
    async fn configure_offline_drops_client() {
        let (client, _handle) = mock_client();
        let mut data_source = LiveDataSource::<APIService>::with_client(client);
        assert!(data_source.configure(&ProviderData::offline()).is_empty());

        let response = data_source
            .read(&json!({"metadata": {"name": "v1.example.com"}}))
            .await;
        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.len(), 1);
    }

    #[tokio::test]
    async fn transport_error_is_one_diagnostic() {
        let (client, mut handle) = mock_client();
        let server = tokio::spawn(async move {
            let (_request, send) = handle.next_request().await.expect("service not called");
            send.send_error(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused by test server",
            ));
        });

        let data_source = LiveDataSource::<APIService>::with_client(client);
        let response = data_source
            .read(&json!({"metadata": {"name": "v1.example.com"}}))
            .await;
        server.await.unwrap();

        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.len(), 1);
        let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
        assert_eq!(diagnostic.summary, "Unable to GET resource");
        assert!(diagnostic.detail.contains("connection refused by test server"));
    }

    #[tokio::test]
    async fn not_found_is_one_diagnostic() {
        let (client, handle) = mock_client();
        let server = serve_once(
            handle,
            "/apis/coordination.k8s.io/v1/namespaces/default/leases/missing",
            StatusCode::NOT_FOUND,
            json!({
                "kind": "Status",
                "apiVersion": "v1",
                "metadata": {},
                "status": "Failure",
                "message": "leases.coordination.k8s.io \"missing\" not found",
                "reason": "NotFound",
                "code": 404
            }),
        );

        let data_source = LiveDataSource::<Lease>::with_client(client);
        let response = data_source
            .read(&json!({"metadata": {"name": "missing", "namespace": "default"}}))
            .await;
        server.await.unwrap();

        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.len(), 1);
        let diagnostic = response.diagnostics.iter().next().expect("diagnostic");
        assert_eq!(diagnostic.summary, "Unable to GET resource");
        assert!(diagnostic.detail.contains("default/missing"));
    }

    #[tokio::test]
    async fn undecodable_object_is_one_diagnostic() {
        let (client, handle) = mock_client();
        let mut body = api_service_json();
        body["spec"]["groupPriorityMinimum"] = json!("one hundred");
        let server = serve_once(
            handle,
            "/apis/apiregistration.k8s.io/v1/apiservices/v1beta1.metrics.k8s.io",
            StatusCode::OK,
            body,
        );

        let data_source = LiveDataSource::<APIService>::with_client(client);
        let response = data_source
            .read(&json!({"metadata": {"name": "v1beta1.metrics.k8s.io"}}))
            .await;
        server.await.unwrap();

        assert!(response.state.is_none());
        assert_eq!(
            response.diagnostics.iter().map(|d| d.summary.as_str()).collect::<Vec<_>>(),
            vec!["Unable to unmarshal resource"]
        );
    }
}
