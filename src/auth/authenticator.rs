//! Authenticator implementation
//!
//! Exchanges vendor credentials for the district token that belongs to
//! the configured application.

use super::types::Credentials;
use crate::error::{Error, Result};
use crate::http::{Connection, Response};
use crate::records::Token;
use crate::types::{Method, QueryParams};
use tracing::{debug, info, warn};

/// Query parameter restricting the token listing to district tokens
const OWNER_TYPE_PARAM: (&str, &str) = ("owner_type", "district");

/// Holds credentials and, once authenticated, the district app token
pub struct Authenticator {
    credentials: Credentials,
    app_token: Option<String>,
}

impl Authenticator {
    /// Create an unauthenticated authenticator
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            app_token: None,
        }
    }

    /// Credentials in use
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The installed app token, if authenticated
    pub fn app_token(&self) -> Option<&str> {
        self.app_token.as_deref()
    }

    /// Whether a token has been installed
    pub fn is_authenticated(&self) -> bool {
        self.app_token.is_some()
    }

    /// List the tokens visible to these vendor credentials
    pub async fn fetch_tokens<C>(
        &self,
        connection: &C,
        tokens_url: &str,
    ) -> Result<Response<Vec<Token>>>
    where
        C: Connection + ?Sized,
    {
        let mut query = QueryParams::new();
        query.insert(OWNER_TYPE_PARAM.0.to_string(), OWNER_TYPE_PARAM.1.to_string());

        let response = connection
            .execute(tokens_url, Method::GET, Some(&query), None)
            .await?;
        let tokens: Vec<Token> = response.items().iter().map(Token::from_item).collect();
        Ok(response.map(|_| tokens))
    }

    /// Ensure a district token is installed on `connection`.
    ///
    /// No-op once authenticated. On any failure the authenticator stays
    /// unauthenticated so the caller can retry.
    pub async fn authenticate<C>(&mut self, connection: &mut C, tokens_url: &str) -> Result<()>
    where
        C: Connection + ?Sized,
    {
        if self.app_token.is_some() {
            return Ok(());
        }

        let app_id = self.credentials.app_id.as_str();
        debug!(app_id, url = tokens_url, "Requesting district tokens");

        let response = self.fetch_tokens(&*connection, tokens_url).await?;
        if !response.success {
            warn!(status = response.status, "Token request failed");
            return Err(Error::connection(response.status, response.raw_body));
        }

        let access_token = response
            .body
            .unwrap_or_default()
            .into_iter()
            .filter(|token| token.is_owned_by(app_id))
            .find_map(|token| token.access_token)
            .ok_or_else(|| {
                warn!(app_id, "No district token matches app id");
                Error::district_not_found(app_id)
            })?;

        connection.set_token(&access_token);
        self.app_token = Some(access_token);
        info!(app_id, "Authenticated with district token");

        Ok(())
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("credentials", &self.credentials)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
