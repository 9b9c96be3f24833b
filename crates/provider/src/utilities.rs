//! Uniform diagnostics for data source failures

use k8s_provider_framework::Diagnostic;

use crate::Error;

/// Fixed summary for each error class
#[must_use]
pub fn summary(err: &Error) -> &'static str {
    match err {
        Error::Offline => "Provider in offline mode",
        Error::Get { .. } => "Unable to GET resource",
        Error::Decode(_) => "Unable to unmarshal resource",
        Error::Encode(_) => "Unable to marshal resource",
        Error::State(_) => "Invalid state conversion",
        Error::MissingAttribute(_) => "Missing attribute",
        Error::ProviderConfig(_)
        | Error::Kubeconfig(_)
        | Error::InferConfig(_)
        | Error::Kube(_) => "Unable to create Kubernetes client",
    }
}

/// Turns an error into a single error diagnostic carrying the error text as detail
#[must_use]
pub fn diagnostic(err: &Error) -> Diagnostic {
    Diagnostic::error(summary(err), err.to_string())
}
