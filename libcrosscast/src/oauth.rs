//! OAuth 1.0a request signing
//!
//! Twitter requires OAuth 1.0a signatures for user-context requests. This
//! module computes the HMAC-SHA1 signature over the canonicalized request
//! and builds the `Authorization: OAuth ...` header.
//!
//! The tweet body is sent as JSON, not form-encoded, so it is excluded from
//! the signature base; only the OAuth parameters themselves (plus any query
//! parameters the caller passes in) are signed.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::TwitterCredentials;
use crate::error::PlatformError;

/// OAuth 1.0a signer with a fixed user-context token.
#[derive(Debug, Clone)]
pub struct OAuth1Signer {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_token_secret: String,
}

impl OAuth1Signer {
    pub fn new(credentials: &TwitterCredentials) -> Self {
        Self {
            consumer_key: credentials.api_key.clone(),
            consumer_secret: credentials.api_secret.clone(),
            access_token: credentials.access_token.clone(),
            access_token_secret: credentials.access_token_secret.clone(),
        }
    }

    /// Build the `Authorization` header value for one request.
    ///
    /// `extra_params` are request parameters that participate in the
    /// signature base (query or form parameters). A JSON body contributes
    /// nothing, so callers posting JSON pass an empty slice.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        extra_params: &[(String, String)],
    ) -> Result<String, PlatformError> {
        let nonce = generate_nonce();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.header_with(method, url, extra_params, &nonce, &timestamp)
    }

    /// Header construction with caller-supplied nonce and timestamp.
    ///
    /// Deterministic: fixed inputs always produce the same signature.
    fn header_with(
        &self,
        method: &str,
        url: &str,
        extra_params: &[(String, String)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String, PlatformError> {
        let mut oauth_params = BTreeMap::new();
        oauth_params.insert("oauth_consumer_key".to_string(), self.consumer_key.clone());
        oauth_params.insert("oauth_nonce".to_string(), nonce.to_string());
        oauth_params.insert(
            "oauth_signature_method".to_string(),
            "HMAC-SHA1".to_string(),
        );
        oauth_params.insert("oauth_timestamp".to_string(), timestamp.to_string());
        oauth_params.insert("oauth_token".to_string(), self.access_token.clone());
        oauth_params.insert("oauth_version".to_string(), "1.0".to_string());

        // Everything that participates in signing, sorted by key.
        let mut all_params = oauth_params.clone();
        for (k, v) in extra_params {
            all_params.insert(k.clone(), v.clone());
        }

        let signature = self.signature(method, url, &all_params)?;
        oauth_params.insert("oauth_signature".to_string(), signature);

        // BTreeMap iteration keeps the header parameters key-sorted.
        let header = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {header}"))
    }

    /// base64(HMAC-SHA1(signing key, signature base string)).
    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<String, PlatformError> {
        let param_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(url),
            percent_encode(&param_string)
        );

        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(&self.access_token_secret)
        );

        hmac_sha1(&signing_key, &base_string)
    }
}

/// Percent-encode per RFC 3986: only ALPHA / DIGIT / `-` / `.` / `_` / `~`
/// pass through unescaped.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Random 32-character hex nonce.
fn generate_nonce() -> String {
    use rand::RngCore;

    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hmac_sha1(key: &str, data: &str) -> Result<String, PlatformError> {
    type HmacSha1 = Hmac<Sha1>;

    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PlatformError::Signing(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
