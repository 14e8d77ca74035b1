use actix_web::http::header::{self, HeaderMap};

use anyhow::Context;

const BEARER_AUTH_PREFIX: &str = "Bearer ";

pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_KEY_QUERY_PARAM: &str = "apiKey";

/// Extract an API key from the request headers or, failing that, the query string
pub fn api_key(headers: &HeaderMap, query: &str) -> anyhow::Result<String> {
    if let Some(value) = headers.get(API_KEY_HEADER) {
        let value = value.to_str().context("API key header is not valid text")?;
        return Ok(value.to_string());
    }

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == API_KEY_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .context("Missing API key")
}

/// Extract a bearer token from the standard authorization header
pub fn bearer_token(headers: &HeaderMap) -> anyhow::Result<String> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .context("Missing authorization in header")?
        .to_str()
        .context("Authorization header is not valid text")?;

    let token = header_value
        .strip_prefix(BEARER_AUTH_PREFIX)
        .context("Authorization scheme not bearer")?;

    Ok(token.trim().to_string())
}
