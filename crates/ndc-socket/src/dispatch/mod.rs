//! Inbound event dispatch
//!
//! Classifies decoded frames into a [`Route`] and invokes the matching
//! [`EventHandler`](crate::EventHandler) method.

mod dispatcher;
mod route;

pub use dispatcher::EventDispatcher;
pub use route::{classify, Route};
