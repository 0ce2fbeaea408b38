//! Authentication module
//!
//! Vendor credentials authenticate against the token endpoint with HTTP
//! basic auth. The token whose owner matches the application id is then
//! installed on the connection as a bearer token for every data request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthScheme, Credentials};
