//! Identity provider port
//!
//! The socket never owns credentials. It asks an identity provider for them on every
//! connect attempt.

mod provider;
mod static_identity;

pub use provider::IdentityProvider;
pub use static_identity::{IdentityError, StaticIdentity, StaticIdentityBuilder};
