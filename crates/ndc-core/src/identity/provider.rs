//! Identity provider trait

/// Supplies the credentials needed to authenticate a socket connection.
///
/// Implementations are shared between the connect path and the reconnect supervisor,
/// so every method must be cheap and callable from any thread.
pub trait IdentityProvider: Send + Sync {
    /// Current session token. `None` means the account is not logged in.
    fn session_token(&self) -> Option<String>;

    /// Account identifier sent as `AUID`
    fn account_id(&self) -> String;

    /// Stored device identifier
    fn device_id(&self) -> String;

    /// Whether a fresh device id should be generated for every connect attempt
    fn rotates_device_id(&self) -> bool {
        false
    }

    /// Produce a new device identifier
    ///
    /// Only called when [`rotates_device_id`](Self::rotates_device_id) is `true`.
    fn generate_device_id(&self) -> String {
        self.device_id()
    }

    /// Sign a payload string (`"{device}|{unix time}"` for socket auth)
    fn sign(&self, payload: &str) -> String;

    /// Device id to use for the next connect attempt
    fn connect_device_id(&self) -> String {
        if self.rotates_device_id() {
            self.generate_device_id()
        } else {
            self.device_id()
        }
    }
}
