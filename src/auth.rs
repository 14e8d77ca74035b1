use std::future::Future;
use std::pin::Pin;

use actix_web::{dev, web, FromRequest, HttpRequest};

use secrecy::Secret;

use crate::error::RestError;

/// Credential extraction strategies
pub mod credentials;

/// Shared secrets that inbound requests are authorized against
#[derive(Debug)]
pub struct AuthSecrets {
    api_key: Secret<String>,
    admin_token: Secret<String>,
}

impl AuthSecrets {
    pub fn new(api_key: Secret<String>, admin_token: Secret<String>) -> Self {
        Self {
            api_key,
            admin_token,
        }
    }

    /// The static token expected from authorized administrators
    pub fn admin_token(&self) -> &Secret<String> {
        &self.admin_token
    }
}

/// Request guard for public endpoints, open to callers holding the shared API key
#[derive(Debug)]
pub struct ApiCaller;

impl FromRequest for ApiCaller {
    type Error = RestError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            // NOTE: Must be registered with the application at startup
            let secrets: &web::Data<AuthSecrets> = req
                .app_data::<web::Data<AuthSecrets>>()
                .expect("AuthSecrets not registered for application");

            let key = credentials::api_key(req.headers(), req.query_string())
                .map_err(|e| RestError::Unauthorized(e.to_string()))?;

            verify_secret(&key, &secrets.api_key)?;

            Ok(ApiCaller)
        })
    }
}

/// Request guard for admin endpoints, open to callers holding the admin bearer token
#[derive(Debug)]
pub struct Administrator;

impl FromRequest for Administrator {
    type Error = RestError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            // NOTE: Must be registered with the application at startup
            let secrets: &web::Data<AuthSecrets> = req
                .app_data::<web::Data<AuthSecrets>>()
                .expect("AuthSecrets not registered for application");

            let token = credentials::bearer_token(req.headers())
                .map_err(|e| RestError::Unauthorized(e.to_string()))?;

            verify_secret(&token, &secrets.admin_token)?;

            Ok(Administrator)
        })
    }
}

/// Compare an extracted credential against a configured secret
///
/// A credential reaches this point only if it was present; a mismatch is
/// therefore `Forbidden` rather than `Unauthorized`.
fn verify_secret(candidate: &str, secret: &Secret<String>) -> Result<(), RestError> {
    use secrecy::ExposeSecret;

    if candidate != secret.expose_secret() {
        return Err(RestError::Forbidden("Invalid credentials".into()));
    }
    Ok(())
}
