use k8s_provider_crd::{APIService, APIServiceSpec};
use k8s_provider_framework::Attribute;
use k8s_provider_framework::validator::int64_between;

use super::CrdKind;
use crate::validators;

impl CrdKind for APIService {
    type Spec = APIServiceSpec;

    const TYPE_NAME: &'static str = "apiregistration_k8s_io_api_service_v1";
    const NAMESPACED: bool = false;
    const DESCRIPTION: &'static str = "APIService represents a server for a particular GroupVersion.";

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("ca_bundle", "caBundle")
                .description("CABundle is a PEM encoded CA bundle which will be used to validate an API server's serving certificate. If unspecified, system trust roots on the apiserver are used.")
                .validator(validators::base64()),
            Attribute::string("group", "group")
                .description("Group is the API group name this server hosts."),
            Attribute::int64("group_priority_minimum", "groupPriorityMinimum")
                .required()
                .description("GroupPriorityMinimum is the priority this group should have at least. Higher priority means that the group is preferred by clients over lower priority ones.")
                .validator(int64_between(1, 20000)),
            Attribute::bool("insecure_skip_tls_verify", "insecureSkipTLSVerify")
                .description("InsecureSkipTLSVerify disables TLS certificate verification when communicating with this server. This is strongly discouraged."),
            Attribute::object(
                "service",
                "service",
                vec![
                    Attribute::string("name", "name")
                        .description("Name is the name of the service."),
                    Attribute::string("namespace", "namespace")
                        .description("Namespace is the namespace of the service."),
                    Attribute::int64("port", "port")
                        .description("If specified, the port on the service that hosting webhook. Defaults to 443. 'port' should be a valid port number (1-65535, inclusive).")
                        .validator(int64_between(1, 65535)),
                ],
            )
            .description("Service is a reference to the service for this API server. If the service is nil, the API server is expected to be served locally."),
            Attribute::string("version", "version")
                .description("Version is the API version this server hosts. For example, 'v1'."),
            Attribute::int64("version_priority", "versionPriority")
                .required()
                .description("VersionPriority controls the ordering of this API version inside of its group. Must be greater than zero.")
                .validator(validators::int32_at_least(1)),
        ]
    }
}
