//! In-memory identity provider
//!
//! Holds credentials obtained elsewhere (login, stored session) and a caller-supplied
//! signing function. The session token can be swapped while a socket is running.

use super::IdentityProvider;
use parking_lot::RwLock;
use std::sync::Arc;

type SignFn = Arc<dyn Fn(&str) -> String + Send + Sync>;
type DeviceIdFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Identity provider backed by values held in memory
pub struct StaticIdentity {
    session_token: RwLock<Option<String>>,
    account_id: String,
    device_id: String,
    signer: SignFn,
    device_generator: Option<DeviceIdFn>,
}

impl StaticIdentity {
    /// Start building a static identity
    #[must_use]
    pub fn builder() -> StaticIdentityBuilder {
        StaticIdentityBuilder::new()
    }

    /// Replace the session token (after a login)
    pub fn set_session_token(&self, token: impl Into<String>) {
        *self.session_token.write() = Some(token.into());
    }

    /// Drop the session token (after a logout)
    pub fn clear_session_token(&self) {
        *self.session_token.write() = None;
    }
}

impl IdentityProvider for StaticIdentity {
    fn session_token(&self) -> Option<String> {
        self.session_token.read().clone()
    }

    fn account_id(&self) -> String {
        self.account_id.clone()
    }

    fn device_id(&self) -> String {
        self.device_id.clone()
    }

    fn rotates_device_id(&self) -> bool {
        self.device_generator.is_some()
    }

    fn generate_device_id(&self) -> String {
        match &self.device_generator {
            Some(generate) => generate(),
            None => self.device_id.clone(),
        }
    }

    fn sign(&self, payload: &str) -> String {
        (self.signer)(payload)
    }
}

impl std::fmt::Debug for StaticIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticIdentity")
            .field("account_id", &self.account_id)
            .field("device_id", &self.device_id)
            .field("has_session", &self.session_token.read().is_some())
            .field("rotates_device_id", &self.device_generator.is_some())
            .finish()
    }
}

/// Builder for [`StaticIdentity`]
pub struct StaticIdentityBuilder {
    session_token: Option<String>,
    account_id: Option<String>,
    device_id: Option<String>,
    signer: Option<SignFn>,
    device_generator: Option<DeviceIdFn>,
}

impl StaticIdentityBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_token: None,
            account_id: None,
            device_id: None,
            signer: None,
            device_generator: None,
        }
    }

    pub fn session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn signer<F>(mut self, signer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Generate a fresh device id on every connect attempt
    pub fn rotate_device_id<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.device_generator = Some(Arc::new(generator));
        self
    }

    /// Build the identity
    ///
    /// # Errors
    /// Returns `IdentityError::Missing` if the account id, device id, or signer is absent
    pub fn build(self) -> Result<StaticIdentity, IdentityError> {
        Ok(StaticIdentity {
            session_token: RwLock::new(self.session_token),
            account_id: self.account_id.ok_or(IdentityError::Missing("account_id"))?,
            device_id: self.device_id.ok_or(IdentityError::Missing("device_id"))?,
            signer: self.signer.ok_or(IdentityError::Missing("signer"))?,
            device_generator: self.device_generator,
        })
    }
}

impl Default for StaticIdentityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("{0} is required")]
    Missing(&'static str),
}
