//! apiregistration.k8s.io/v1 resources

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `ServiceReference` holds a reference to `Service.legacy.k8s.io`
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReference {
    /// Name is the name of the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace is the namespace of the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// If specified, the port on the service that hosting webhook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

/// Spec object for the `APIService` kind
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    kind = "APIService",
    group = "apiregistration.k8s.io",
    version = "v1",
    plural = "apiservices"
)]
pub struct APIServiceSpec {
    /// PEM encoded CA bundle which will be used to validate an API server's serving certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,
    /// Group is the API group name this server hosts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Priority of the group as a whole when discovered by clients
    pub group_priority_minimum: i32,
    /// Disables TLS certificate verification when communicating with this server.
    #[serde(rename = "insecureSkipTLSVerify", skip_serializing_if = "Option::is_none")]
    pub insecure_skip_tls_verify: Option<bool>,
    /// Reference to the service for this API server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceReference>,
    /// Version is the API version this server hosts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Ordering of this version within its group
    pub version_priority: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kube::Resource;

    use super::*;

    #[test]
    fn parses_upstream_manifest() {
        let manifest = r"
apiVersion: apiregistration.k8s.io/v1
kind: APIService
metadata:
  name: v1beta1.metrics.k8s.io
spec:
  group: metrics.k8s.io
  groupPriorityMinimum: 100
  insecureSkipTLSVerify: true
  service:
    name: metrics-server
    namespace: kube-system
  version: v1beta1
  versionPriority: 100
";
        let service: APIService = serde_yaml::from_str(manifest).unwrap();
        assert_eq!(service.spec.group_priority_minimum, 100);
        assert_eq!(service.spec.insecure_skip_tls_verify, Some(true));
        assert_eq!(
            service.spec.service.and_then(|s| s.namespace).as_deref(),
            Some("kube-system")
        );
    }

    #[test]
    fn cluster_scoped_identity() {
        assert_eq!(APIService::api_version(&()), "apiregistration.k8s.io/v1");
        assert_eq!(APIService::kind(&()), "APIService");
        assert_eq!(APIService::plural(&()), "apiservices");
    }

    #[test]
    fn serializes_without_empty_fields() {
        let service = APIService::new(
            "v1.example.com",
            APIServiceSpec {
                group_priority_minimum: 100,
                version_priority: 10,
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&service).unwrap();
        assert_eq!(
            value["spec"],
            serde_json::json!({"groupPriorityMinimum": 100, "versionPriority": 10})
        );
        assert_eq!(value["apiVersion"], "apiregistration.k8s.io/v1");
    }
}
