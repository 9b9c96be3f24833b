use k8s_provider_crd::{GatewayClass, GatewayClassSpec};
use k8s_provider_framework::Attribute;
use k8s_provider_framework::validator::{length_at_most, length_between, regex_matches};

use super::CrdKind;
use crate::validators::DNS_LABEL;

const CONTROLLER_NAME: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*/[A-Za-z0-9/\-._~%!$&'()*+,;=:]+$";
const GROUP: &str = r"^$|^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";
const KIND: &str = r"^[a-zA-Z]([-a-zA-Z0-9]*[a-zA-Z0-9])?$";

impl CrdKind for GatewayClass {
    type Spec = GatewayClassSpec;

    const TYPE_NAME: &'static str = "gateway_networking_k8s_io_gateway_class_v1";
    const NAMESPACED: bool = false;
    const DESCRIPTION: &'static str = "GatewayClass describes a class of Gateways available to the user for creating Gateway resources.";

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("controller_name", "controllerName")
                .required()
                .description("ControllerName is the name of the controller that is managing Gateways of this class. The value of this field MUST be a domain prefixed path, for example 'example.net/gateway-controller'.")
                .validator(length_between(1, 253))
                .validator(regex_matches(
                    CONTROLLER_NAME,
                    "must be a domain prefixed path such as 'example.net/gateway-controller'",
                )),
            Attribute::string("description", "description")
                .description("Description helps describe a GatewayClass with more details.")
                .validator(length_at_most(64)),
            Attribute::object(
                "parameters_ref",
                "parametersRef",
                vec![
                    Attribute::string("group", "group")
                        .required()
                        .description("Group is the group of the referent.")
                        .validator(length_at_most(253))
                        .validator(regex_matches(GROUP, "must be empty or a DNS subdomain")),
                    Attribute::string("kind", "kind")
                        .required()
                        .description("Kind is kind of the referent.")
                        .validator(length_between(1, 63))
                        .validator(regex_matches(
                            KIND,
                            "must start with a letter and consist of alphanumeric characters or '-'",
                        )),
                    Attribute::string("name", "name")
                        .required()
                        .description("Name is the name of the referent.")
                        .validator(length_between(1, 253)),
                    Attribute::string("namespace", "namespace")
                        .description("Namespace is the namespace of the referent. This field is required when referring to a Namespace-scoped resource and MUST be unset when referring to a Cluster-scoped resource.")
                        .validator(length_between(1, 63))
                        .validator(regex_matches(DNS_LABEL, "must be a DNS label")),
                ],
            )
            .description("ParametersRef is a reference to a resource that contains the configuration parameters corresponding to the GatewayClass."),
        ]
    }
}
