use k8s_provider_crd::{Certificate, CertificateSpec};
use k8s_provider_framework::validator::{each, int64_at_least, one_of};
use k8s_provider_framework::{Attribute, Scalar};

use super::CrdKind;
use crate::validators;

const KEY_USAGES: [&str; 23] = [
    "signing",
    "digital signature",
    "content commitment",
    "key encipherment",
    "key agreement",
    "data encipherment",
    "cert sign",
    "crl sign",
    "encipher only",
    "decipher only",
    "any",
    "server auth",
    "client auth",
    "code signing",
    "email protection",
    "s/mime",
    "ipsec end system",
    "ipsec tunnel",
    "ipsec user",
    "timestamping",
    "ocsp signing",
    "microsoft sgc",
    "netscape sgc",
];

fn secret_key_selector() -> Attribute {
    Attribute::object(
        "password_secret_ref",
        "passwordSecretRef",
        vec![
            Attribute::string("key", "key")
                .description("The key of the entry in the Secret resource's `data` field to be used."),
            Attribute::string("name", "name")
                .required()
                .description("Name of the resource being referred to."),
        ],
    )
    .description("PasswordSecretRef is a reference to a key in a Secret resource containing the password used to encrypt the keystore.")
}

fn name_constraint_item(name: &str, description: &str) -> Attribute {
    Attribute::object(
        name,
        name,
        vec![
            Attribute::list("dns_domains", "dnsDomains", Scalar::String)
                .description("DNSDomains is a list of DNS domains that are permitted or excluded."),
            Attribute::list("email_addresses", "emailAddresses", Scalar::String)
                .description("EmailAddresses is a list of Email Addresses that are permitted or excluded."),
            Attribute::list("ip_ranges", "ipRanges", Scalar::String)
                .description("IPRanges is a list of IP Ranges that are permitted or excluded. This should be a valid CIDR notation."),
            Attribute::list("uri_domains", "uriDomains", Scalar::String)
                .description("URIDomains is a list of URI domains that are permitted or excluded."),
        ],
    )
    .description(description)
}

fn keystores() -> Attribute {
    Attribute::object(
        "keystores",
        "keystores",
        vec![
            Attribute::object(
                "jks",
                "jks",
                vec![
                    Attribute::string("alias", "alias")
                        .description("Alias specifies the alias of the key in the keystore, required by the JKS format. Defaults to 'certificate'."),
                    Attribute::bool("create", "create")
                        .required()
                        .description("Create enables JKS keystore creation for the Certificate. If true, a file named `keystore.jks` will be created in the target Secret resource."),
                    Attribute::string("password", "password")
                        .description("Password provides a literal password used to encrypt the JKS keystore. Mutually exclusive with passwordSecretRef."),
                    secret_key_selector(),
                ],
            )
            .description("JKS configures options for storing a JKS keystore in the `spec.secretName` Secret resource."),
            Attribute::object(
                "pkcs12",
                "pkcs12",
                vec![
                    Attribute::bool("create", "create")
                        .required()
                        .description("Create enables PKCS12 keystore creation for the Certificate. If true, a file named `keystore.p12` will be created in the target Secret resource."),
                    Attribute::string("password", "password")
                        .description("Password provides a literal password used to encrypt the PKCS#12 keystore. Mutually exclusive with passwordSecretRef."),
                    secret_key_selector(),
                    Attribute::string("profile", "profile")
                        .description("Profile specifies the key and certificate encryption algorithms and the HMAC algorithm used to create the PKCS12 keystore.")
                        .validator(one_of(&["LegacyRC2", "LegacyDES", "Modern2023"])),
                ],
            )
            .description("PKCS12 configures options for storing a PKCS12 keystore in the `spec.secretName` Secret resource."),
        ],
    )
    .description("Additional keystore output formats to be stored in the Certificate's Secret.")
}

fn private_key() -> Attribute {
    Attribute::object(
        "private_key",
        "privateKey",
        vec![
            Attribute::string("algorithm", "algorithm")
                .description("Algorithm is the private key algorithm of the corresponding private key for this certificate.")
                .validator(one_of(&["RSA", "ECDSA", "Ed25519"])),
            Attribute::string("encoding", "encoding")
                .description("The private key cryptography standards (PKCS) encoding for this certificate's private key to be encoded in.")
                .validator(one_of(&["PKCS1", "PKCS8"])),
            Attribute::string("rotation_policy", "rotationPolicy")
                .description("RotationPolicy controls how private keys should be regenerated when a re-issuance is being processed.")
                .validator(one_of(&["Never", "Always"])),
            Attribute::int64("size", "size")
                .description("Size is the key bit size of the corresponding private key for this certificate.")
                .validator(int64_at_least(1)),
        ],
    )
    .description("Private key options. These include the key algorithm and size, the used encoding and the rotation policy.")
}

fn subject() -> Attribute {
    let list = |name: &str, json_name: &str, description: &str| {
        Attribute::list(name, json_name, Scalar::String).description(description)
    };
    Attribute::object(
        "subject",
        "subject",
        vec![
            list("countries", "countries", "Countries to be used on the Certificate."),
            list("localities", "localities", "Cities to be used on the Certificate."),
            list(
                "organizational_units",
                "organizationalUnits",
                "Organizational Units to be used on the Certificate.",
            ),
            list("organizations", "organizations", "Organizations to be used on the Certificate."),
            list("postal_codes", "postalCodes", "Postal codes to be used on the Certificate."),
            list("provinces", "provinces", "State/Provinces to be used on the Certificate."),
            Attribute::string("serial_number", "serialNumber")
                .description("Serial number to be used on the Certificate."),
            list(
                "street_addresses",
                "streetAddresses",
                "Street addresses to be used on the Certificate.",
            ),
        ],
    )
    .description("Requested set of X509 certificate subject attributes.")
}

impl CrdKind for Certificate {
    type Spec = CertificateSpec;

    const TYPE_NAME: &'static str = "cert_manager_io_certificate_v1";
    const NAMESPACED: bool = true;
    const DESCRIPTION: &'static str = "A Certificate resource should be created to ensure an up to date and signed X.509 certificate is stored in the Kubernetes Secret resource named in `spec.secretName`.";

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::object_list(
                "additional_output_formats",
                "additionalOutputFormats",
                vec![
                    Attribute::string("type", "type")
                        .required()
                        .description("Type is the name of the format type that should be written to the Certificate's target Secret.")
                        .validator(one_of(&["DER", "CombinedPEM"])),
                ],
            )
            .description("Defines extra output formats of the private key and signed certificate chain to be written to this Certificate's target Secret."),
            Attribute::string("common_name", "commonName")
                .description("Requested common name X509 certificate subject attribute."),
            Attribute::list("dns_names", "dnsNames", Scalar::String)
                .description("Requested DNS subject alternative names."),
            Attribute::string("duration", "duration")
                .description("Requested 'duration' (i.e. lifetime) of the Certificate."),
            Attribute::list("email_addresses", "emailAddresses", Scalar::String)
                .description("Requested email subject alternative names."),
            Attribute::bool("encode_usages_in_request", "encodeUsagesInRequest")
                .description("Whether the KeyUsage and ExtKeyUsage extensions should be set in the encoded CSR."),
            Attribute::list("ip_addresses", "ipAddresses", Scalar::String)
                .description("Requested IP address subject alternative names."),
            Attribute::bool("is_ca", "isCA")
                .description("Requested basic constraints isCA value. The isCA value is used to set the `isCA` field on the created CertificateRequest resources."),
            Attribute::object(
                "issuer_ref",
                "issuerRef",
                vec![
                    Attribute::string("group", "group")
                        .description("Group of the resource being referred to."),
                    Attribute::string("kind", "kind")
                        .description("Kind of the resource being referred to."),
                    Attribute::string("name", "name")
                        .required()
                        .description("Name of the resource being referred to."),
                ],
            )
            .required()
            .description("Reference to the issuer responsible for issuing the certificate."),
            keystores(),
            Attribute::string("literal_subject", "literalSubject")
                .description("Requested X.509 certificate subject, represented using the LDAP 'String Representation of a Distinguished Name'."),
            Attribute::object(
                "name_constraints",
                "nameConstraints",
                vec![
                    Attribute::bool("critical", "critical")
                        .description("if true then the name constraints are marked critical."),
                    name_constraint_item(
                        "excluded",
                        "Excluded contains the constraints which must be disallowed.",
                    ),
                    name_constraint_item(
                        "permitted",
                        "Permitted contains the constraints in which the names must be located.",
                    ),
                ],
            )
            .description("x.509 certificate NameConstraint extension which MUST NOT be used in a non-CA certificate."),
            Attribute::object_list(
                "other_names",
                "otherNames",
                vec![
                    Attribute::string("oid", "oid")
                        .description("OID is the object identifier for the otherName SAN."),
                    Attribute::string("utf8_value", "utf8Value")
                        .description("utf8Value is the string value of the otherName SAN."),
                ],
            )
            .description("`otherNames` is an escape hatch for SAN that allows any type."),
            private_key(),
            Attribute::string("renew_before", "renewBefore")
                .description("How long before the currently issued certificate's expiry cert-manager should renew the certificate."),
            Attribute::int64("renew_before_percentage", "renewBeforePercentage")
                .description("`renewBeforePercentage` is like `renewBefore`, except it is a relative percentage rather than an absolute duration.")
                .validator(validators::int32()),
            Attribute::int64("revision_history_limit", "revisionHistoryLimit")
                .description("The maximum number of CertificateRequest revisions that are maintained in the Certificate's history.")
                .validator(validators::int32_at_least(1)),
            Attribute::string("secret_name", "secretName")
                .required()
                .description("Name of the Secret resource that will be automatically created and managed by this Certificate resource."),
            Attribute::object(
                "secret_template",
                "secretTemplate",
                vec![
                    Attribute::map("annotations", "annotations", Scalar::String)
                        .description("Annotations is a key value map to be copied to the target Kubernetes Secret."),
                    Attribute::map("labels", "labels", Scalar::String)
                        .description("Labels is a key value map to be copied to the target Kubernetes Secret."),
                ],
            )
            .description("Defines annotations and labels to be copied to the Certificate's Secret."),
            subject(),
            Attribute::list("uris", "uris", Scalar::String)
                .description("Requested URI subject alternative names."),
            Attribute::list("usages", "usages", Scalar::String)
                .description("Requested key usages and extended key usages.")
                .validator(each(one_of(&KEY_USAGES))),
        ]
    }
}

#[cfg(test)]
mod tests {
    use k8s_provider_framework::state::validate_config;
    use serde_json::json;

    use super::*;

    fn config(extra: serde_json::Value) -> serde_json::Value {
        let mut config = json!({
            "secret_name": "example-com-tls",
            "issuer_ref": {"name": "ca-issuer"}
        });
        if let (Some(config), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
            config.extend(extra.clone());
        }
        config
    }

    #[test]
    fn minimal_certificate_is_valid() {
        assert!(validate_config(&Certificate::spec_attributes(), &config(json!({}))).is_empty());
    }

    #[test]
    fn unknown_usage_is_reported_by_index() {
        let diags = validate_config(
            &Certificate::spec_attributes(),
            &config(json!({"usages": ["server auth", "teleport"]})),
        );
        assert_eq!(diags.len(), 1);
        assert!(
            diags
                .iter()
                .all(|d| d.attribute.as_ref().is_some_and(|p| p.to_string() == "usages[1]"))
        );
    }

    #[test]
    fn keystores_require_create() {
        let diags = validate_config(
            &Certificate::spec_attributes(),
            &config(json!({"keystores": {"pkcs12": {"profile": "Modern2023"}}})),
        );
        assert_eq!(diags.len(), 1);
        assert!(
            diags
                .iter()
                .all(|d| d.summary == "Missing Configuration for Required Attribute")
        );
    }

    #[test]
    fn int32_fields_are_bounded() {
        let diags = validate_config(
            &Certificate::spec_attributes(),
            &config(json!({
                "revision_history_limit": 2_147_483_648_i64,
                "renew_before_percentage": 50
            })),
        );
        assert_eq!(diags.len(), 1);
        assert!(diags.iter().all(|d| d.summary == "Invalid Attribute Value"));
    }
}
