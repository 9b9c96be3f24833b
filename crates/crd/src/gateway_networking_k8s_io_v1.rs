//! gateway.networking.k8s.io/v1 resources

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to a resource that contains the configuration parameters of a `GatewayClass`
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParametersReference {
    /// Group is the group of the referent.
    #[schemars(length(max = 253))]
    pub group: String,
    /// Kind is kind of the referent.
    #[schemars(length(min = 1, max = 63))]
    pub kind: String,
    /// Name is the name of the referent.
    #[schemars(length(min = 1, max = 253))]
    pub name: String,
    /// Namespace is the namespace of the referent, required for namespace-scoped referents.
    #[schemars(length(min = 1, max = 63))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Spec object for the `GatewayClass` kind
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    kind = "GatewayClass",
    group = "gateway.networking.k8s.io",
    version = "v1",
    plural = "gatewayclasses"
)]
pub struct GatewayClassSpec {
    /// Name of the controller that is managing Gateways of this class.
    #[schemars(length(min = 1, max = 253))]
    pub controller_name: String,
    /// Description helps describe a GatewayClass with more details.
    #[schemars(length(max = 64))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference to a resource that contains the configuration parameters for this class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_ref: Option<ParametersReference>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kube::Resource;

    use super::*;

    #[test]
    fn parses_upstream_manifest() {
        let manifest = r"
apiVersion: gateway.networking.k8s.io/v1
kind: GatewayClass
metadata:
  name: envoy
spec:
  controllerName: gateway.envoyproxy.io/gatewayclass-controller
  parametersRef:
    group: gateway.envoyproxy.io
    kind: EnvoyProxy
    name: custom-proxy-config
    namespace: envoy-gateway-system
";
        let class: GatewayClass = serde_yaml::from_str(manifest).unwrap();
        assert_eq!(
            class.spec.controller_name,
            "gateway.envoyproxy.io/gatewayclass-controller"
        );
        assert_eq!(
            class.spec.parameters_ref.map(|p| p.kind).as_deref(),
            Some("EnvoyProxy")
        );
        assert_eq!(GatewayClass::plural(&()), "gatewayclasses");
    }
}
