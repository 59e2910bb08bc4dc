//! Handshake authentication
//!
//! Every connect attempt carries the account identity, session token, device id and a
//! signature over `"{device_id}|{unix_time}"`. The same payload is percent-encoded into
//! the `signbody` query parameter of the handshake URL.

use crate::error::{SocketError, SocketResult};
use ndc_core::IdentityProvider;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tokio_tungstenite::tungstenite::http::{HeaderMap, HeaderName, HeaderValue};

/// Characters escaped in the `signbody` query value
const SIGN_BODY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub const HEADER_ACCOUNT: &str = "AUID";
pub const HEADER_AUTH: &str = "NDCAUTH";
pub const HEADER_LANG: &str = "NDCLANG";
pub const HEADER_DEVICE: &str = "NDCDEVICEID";
pub const HEADER_SIGNATURE: &str = "NDC-MSG-SIG";

/// Authentication material for one connect attempt
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    device_id: String,
    unix_time: i64,
    account_id: String,
    session_token: String,
    language: String,
    signature: String,
}

impl AuthHeaders {
    /// Build the handshake material from the identity
    ///
    /// # Errors
    /// Returns `MissingSessionToken` when the identity holds no token
    pub fn build(
        identity: &dyn IdentityProvider,
        device_id: impl Into<String>,
        unix_time: i64,
        language: impl Into<String>,
    ) -> SocketResult<Self> {
        let session_token = identity
            .session_token()
            .ok_or(SocketError::MissingSessionToken)?;
        let device_id = device_id.into();
        let signature = identity.sign(&sign_body(&device_id, unix_time));

        Ok(Self {
            device_id,
            unix_time,
            account_id: identity.account_id(),
            session_token,
            language: language.into(),
            signature,
        })
    }

    /// Signed payload `"{device_id}|{unix_time}"`
    pub fn sign_body(&self) -> String {
        sign_body(&self.device_id, self.unix_time)
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn unix_time(&self) -> i64 {
        self.unix_time
    }

    /// Handshake URL `{base}/?signbody={encoded payload}`
    pub fn signed_url(&self, base_url: &str) -> String {
        let body = self.sign_body();
        let encoded = utf8_percent_encode(&body, SIGN_BODY);
        format!("{}/?signbody={encoded}", base_url.trim_end_matches('/'))
    }

    /// Handshake headers as name/value pairs
    pub fn header_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Accept-Encoding", "gzip, deflate, br".to_string()),
            ("Connection", "Upgrade".to_string()),
            (HEADER_ACCOUNT, self.account_id.clone()),
            (HEADER_AUTH, format!("sid={}", self.session_token)),
            (HEADER_LANG, self.language.clone()),
            (HEADER_DEVICE, self.device_id.clone()),
            (HEADER_SIGNATURE, self.signature.clone()),
        ]
    }

    /// Insert the handshake headers into a request header map
    ///
    /// # Errors
    /// Returns `InvalidRequest` when a value is not a legal header value
    pub fn apply(&self, headers: &mut HeaderMap) -> SocketResult<()> {
        for (name, value) in self.header_pairs() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SocketError::InvalidRequest(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|e| SocketError::InvalidRequest(format!("{name}: {e}")))?;
            headers.insert(name, value);
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeaders")
            .field("device_id", &self.device_id)
            .field("unix_time", &self.unix_time)
            .field("account_id", &self.account_id)
            .field("session_token", &"<redacted>")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

fn sign_body(device_id: &str, unix_time: i64) -> String {
    format!("{device_id}|{unix_time}")
}
