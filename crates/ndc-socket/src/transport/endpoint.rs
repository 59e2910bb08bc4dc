//! Endpoint selection

use rand::Rng;

/// Picks a base endpoint for each connect attempt
///
/// Selection is uniform over the candidate list; a new pick is made on every attempt.
#[derive(Debug, Clone)]
pub struct EndpointSelector {
    endpoints: Vec<String>,
}

impl EndpointSelector {
    pub fn new<I, S>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
        }
    }

    /// Pick a random endpoint, `None` when the list is empty
    pub fn select(&self) -> Option<&str> {
        if self.endpoints.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..self.endpoints.len());
        self.endpoints.get(index).map(String::as_str)
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
