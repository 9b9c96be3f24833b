//! cert-manager.io/v1 resources

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Additional output format written to the certificate's secret
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAdditionalOutputFormat {
    /// Type is the name of the format type that should be written to the secret (`DER` or `CombinedPEM`).
    #[serde(rename = "type")]
    pub type_: String,
}

/// Reference to the issuer for this certificate
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuerReference {
    /// Group of the resource being referred to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Kind of the resource being referred to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Name of the resource being referred to.
    pub name: String,
}

/// Reference to a key in a Secret resource
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// The key of the entry in the Secret resource's `data` field to be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Name of the resource being referred to.
    pub name: String,
}

/// JKS keystore configuration
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JksKeystore {
    /// Alias specifies the alias of the key in the keystore.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Create enables JKS keystore creation for the Certificate.
    pub create: bool,
    /// Password provides a literal password used to encrypt the JKS keystore.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Reference to a key in a Secret resource containing the password used to encrypt the keystore.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_secret_ref: Option<SecretKeySelector>,
}

/// PKCS12 keystore configuration
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pkcs12Keystore {
    /// Create enables PKCS12 keystore creation for the Certificate.
    pub create: bool,
    /// Password provides a literal password used to encrypt the PKCS#12 keystore.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Reference to a key in a Secret resource containing the password used to encrypt the keystore.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_secret_ref: Option<SecretKeySelector>,
    /// Profile specifies the key and certificate encryption algorithms and the HMAC algorithm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// Additional keystore output formats
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateKeystores {
    /// JKS configures options for storing a JKS keystore in the secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jks: Option<JksKeystore>,
    /// PKCS12 configures options for storing a PKCS12 keystore in the secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkcs12: Option<Pkcs12Keystore>,
}

/// A set of name constraint items
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NameConstraintItem {
    /// DNS domain names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_domains: Option<Vec<String>>,
    /// Email addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<Vec<String>>,
    /// IP address ranges in CIDR notation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_ranges: Option<Vec<String>>,
    /// URI domains
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_domains: Option<Vec<String>>,
}

/// X.509 name constraints extension
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NameConstraints {
    /// Marks the extension as critical.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
    /// Excluded contains the constraints which must be disallowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded: Option<NameConstraintItem>,
    /// Permitted contains the constraints in which the names must be located.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted: Option<NameConstraintItem>,
}

/// Other subject alternative name
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtherName {
    /// OID is the object identifier for the otherName SAN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
    /// utf8Value is the string value of the otherName SAN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utf8_value: Option<String>,
}

/// Private key options
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePrivateKey {
    /// Private key algorithm of the corresponding private key for this certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// The private key cryptography standards (PKCS) encoding for this certificate's private key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Controls how private keys should be regenerated when a re-issuance is being processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_policy: Option<String>,
    /// Key bit size of the corresponding private key for this certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

/// Template for labels and annotations copied onto the certificate's secret
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSecretTemplate {
    /// Annotations is a key value map to be copied to the target Kubernetes Secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    /// Labels is a key value map to be copied to the target Kubernetes Secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

/// Full X509 name specification
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct X509Subject {
    /// Countries to be used on the Certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
    /// Cities to be used on the Certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localities: Option<Vec<String>>,
    /// Organizational Units to be used on the Certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizational_units: Option<Vec<String>>,
    /// Organizations to be used on the Certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<String>>,
    /// Postal codes to be used on the Certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_codes: Option<Vec<String>>,
    /// State/Provinces to be used on the Certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provinces: Option<Vec<String>>,
    /// Serial number to be used on the Certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Street addresses to be used on the Certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_addresses: Option<Vec<String>>,
}

/// Spec object for the `Certificate` kind
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    kind = "Certificate",
    group = "cert-manager.io",
    version = "v1",
    plural = "certificates",
    namespaced
)]
pub struct CertificateSpec {
    /// Defines extra output formats of the private key and signed certificate chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_output_formats: Option<Vec<CertificateAdditionalOutputFormat>>,
    /// Requested common name X509 certificate subject attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    /// Requested DNS subject alternative names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_names: Option<Vec<String>>,
    /// Requested duration (i.e. lifetime) of the Certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Requested email subject alternative names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<Vec<String>>,
    /// Whether the KeyUsage and ExtKeyUsage extensions should be set in the encoded CSR.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode_usages_in_request: Option<bool>,
    /// Requested IP address subject alternative names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_addresses: Option<Vec<String>>,
    /// Requested basic constraints isCA value.
    #[serde(rename = "isCA", skip_serializing_if = "Option::is_none")]
    pub is_ca: Option<bool>,
    /// Reference to the issuer for this certificate.
    pub issuer_ref: IssuerReference,
    /// Additional keystore output formats to be stored in the Certificate's Secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keystores: Option<CertificateKeystores>,
    /// Requested X.509 certificate subject, represented using the LDAP String Representation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal_subject: Option<String>,
    /// x.509 certificate NameConstraint extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_constraints: Option<NameConstraints>,
    /// otherNames is an escape hatch for SAN that allows any type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_names: Option<Vec<OtherName>>,
    /// Private key options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<CertificatePrivateKey>,
    /// How long before the currently issued certificate's expiry cert-manager should renew.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renew_before: Option<String>,
    /// `renewBefore` expressed as a percentage of the certificate duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renew_before_percentage: Option<i32>,
    /// The maximum number of CertificateRequest revisions that are maintained in the Certificate's history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
    /// Name of the Secret resource that will be automatically created and managed by this Certificate.
    pub secret_name: String,
    /// Defines annotations and labels to be copied to the Certificate's Secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_template: Option<CertificateSecretTemplate>,
    /// Requested set of X509 certificate subject attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<X509Subject>,
    /// Requested URI subject alternative names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,
    /// Requested key usages and extended key usages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usages: Option<Vec<String>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_upstream_manifest() {
        let manifest = r#"
apiVersion: cert-manager.io/v1
kind: Certificate
metadata:
  name: example-com
  namespace: sandbox
spec:
  secretName: example-com-tls
  duration: 2160h
  renewBefore: 360h
  isCA: false
  privateKey:
    algorithm: RSA
    encoding: PKCS1
    size: 2048
  usages:
    - server auth
    - client auth
  dnsNames:
    - example.com
    - www.example.com
  issuerRef:
    name: ca-issuer
    kind: Issuer
    group: cert-manager.io
  additionalOutputFormats:
    - type: CombinedPEM
  secretTemplate:
    labels:
      app: example
"#;
        let certificate: Certificate = serde_yaml::from_str(manifest).unwrap();
        let spec = &certificate.spec;
        assert_eq!(spec.secret_name, "example-com-tls");
        assert_eq!(spec.is_ca, Some(false));
        assert_eq!(spec.issuer_ref.kind.as_deref(), Some("Issuer"));
        assert_eq!(
            spec.private_key.as_ref().and_then(|k| k.size),
            Some(2048)
        );
        assert_eq!(
            spec.additional_output_formats.as_deref().map(<[_]>::len),
            Some(1)
        );
        assert_eq!(certificate.metadata.namespace.as_deref(), Some("sandbox"));
    }

    #[test]
    fn missing_issuer_ref_is_rejected() {
        let manifest = r"
apiVersion: cert-manager.io/v1
kind: Certificate
metadata:
  name: broken
spec:
  secretName: tls
";
        assert!(serde_yaml::from_str::<Certificate>(manifest).is_err());
    }
}
