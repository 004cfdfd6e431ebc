use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::warn;

/// Build the headers carrying daemon credentials.
///
/// Returns an empty map unless both `user` and `pass` are present, otherwise a
/// single `Authorization: Basic base64(user:pass)` header.
pub fn build_auth_header(user: Option<&str>, pass: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let (Some(user), Some(pass)) = (user, pass) else {
        return headers;
    };

    let encoded = STANDARD.encode(format!("{user}:{pass}"));
    match HeaderValue::from_str(&format!("Basic {encoded}")) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Err(e) => warn!("could not build authorization header: {}", e),
    }
    headers
}
