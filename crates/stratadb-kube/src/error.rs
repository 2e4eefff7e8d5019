//! Error types for Service reconciliation.

use thiserror::Error;

/// A result type using `ServiceError`.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while reconciling Services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The payload could not be decoded into a Service manifest.
    #[error("invalid service manifest: {0}")]
    Decode(#[from] serde_json::Error),

    /// The control plane rejected a create request.
    #[error("failed to create service {name:?}: {source}")]
    Create {
        /// Name of the Service being created.
        name: String,
        /// The underlying Kubernetes API error.
        #[source]
        source: kube::Error,
    },

    /// The control plane rejected a delete request.
    #[error("failed to delete service {name:?}: {source}")]
    Delete {
        /// Name of the Service being deleted.
        name: String,
        /// The underlying Kubernetes API error.
        #[source]
        source: kube::Error,
    },
}

impl ServiceError {
    /// The API status code behind this error, if the control plane
    /// answered at all.
    fn api_code(&self) -> Option<u16> {
        match self {
            Self::Decode(_) => None,
            Self::Create { source, .. } | Self::Delete { source, .. } => match source {
                kube::Error::Api(status) => Some(status.code),
                _ => None,
            },
        }
    }

    /// Whether the control plane rejected the operation because the name
    /// already exists.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.api_code() == Some(409)
    }

    /// Whether the control plane reported the resource or its namespace
    /// missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.api_code() == Some(404)
    }

    /// Whether the control plane rejected the manifest as invalid.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.api_code() == Some(422)
    }

    /// The HTTP status code to surface for this error.
    ///
    /// Control-plane rejections keep their status; transport failures
    /// map to 502.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Decode(_) => 400,
            Self::Create { .. } | Self::Delete { .. } => self.api_code().unwrap_or(502),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(reason: &str, code: u16) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{reason} for test"),
            reason: reason.to_string(),
            code,
        })
    }

    #[test]
    fn conflict_category() {
        let err = ServiceError::Create {
            name: "strata-db".into(),
            source: api_error("AlreadyExists", 409),
        };
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
        assert_eq!(err.http_status_code(), 409);
    }

    #[test]
    fn not_found_category() {
        let err = ServiceError::Delete {
            name: "strata-db".into(),
            source: api_error("NotFound", 404),
        };
        assert!(err.is_not_found());
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn invalid_category() {
        let err = ServiceError::Create {
            name: "strata-db".into(),
            source: api_error("Invalid", 422),
        };
        assert!(err.is_invalid());
        assert_eq!(err.http_status_code(), 422);
    }

    #[test]
    fn decode_maps_to_bad_request() {
        let parse_err = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err = ServiceError::Decode(parse_err);
        assert!(!err.is_conflict());
        assert_eq!(err.http_status_code(), 400);
    }
}
