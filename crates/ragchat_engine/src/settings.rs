use std::time::Duration;

use url::Url;

use crate::ServiceError;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub base_url: Url,
    /// `None` means requests may hang indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ServiceSettings {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        let base_url =
            Url::parse(base_url).map_err(|err| ServiceError::InvalidUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(format!(
                "{base_url} cannot be used as a base"
            )));
        }
        Ok(Self {
            base_url,
            request_timeout: None,
        })
    }

    /// Resolves an endpoint below the base url, keeping any base path prefix.
    pub fn endpoint(&self, name: &str) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_SERVER_URL).expect("default server url is valid"),
            request_timeout: None,
        }
    }
}
