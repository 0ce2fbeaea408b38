//! Credential and authorization types

use reqwest::RequestBuilder;

/// Vendor credentials for one application
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Application id; selects the district token
    pub app_id: String,
    /// Vendor key (basic auth username on the token endpoint)
    pub vendor_key: String,
    /// Vendor secret (basic auth password on the token endpoint)
    pub vendor_secret: String,
}

impl Credentials {
    /// Create a new set of credentials
    pub fn new(
        app_id: impl Into<String>,
        vendor_key: impl Into<String>,
        vendor_secret: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            vendor_key: vendor_key.into(),
            vendor_secret: vendor_secret.into(),
        }
    }

    /// Basic auth scheme used against the token endpoint
    pub fn basic_auth(&self) -> AuthScheme {
        AuthScheme::Basic {
            username: self.vendor_key.clone(),
            password: self.vendor_secret.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("vendor_key", &self.vendor_key)
            .field("vendor_secret", &"<redacted>")
            .finish()
    }
}

/// How a connection authorizes its requests
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// No authorization header
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl AuthScheme {
    /// Create a bearer scheme
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Apply the scheme to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            AuthScheme::None => req,
            AuthScheme::Basic { username, password } => req.basic_auth(username, Some(password)),
            AuthScheme::Bearer { token } => req.bearer_auth(token),
        }
    }

    /// Whether this is a bearer scheme
    pub fn is_bearer(&self) -> bool {
        matches!(self, Self::Bearer { .. })
    }
}

impl std::fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::None => f.write_str("None"),
            AuthScheme::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            AuthScheme::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
