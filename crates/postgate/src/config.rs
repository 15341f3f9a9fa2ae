//! Client configuration for the content delivery backend.
//!
//! A `ClientConfig` is built once per process from explicit inputs (or the
//! environment) and then passed by reference into the delivery client. It
//! selects between the production and preview delivery hosts and carries the
//! matching bearer token.

use crate::error::{Error, Result};
use std::fmt;
use url::Url;

/// Production (published content) delivery host.
pub const PRODUCTION_HOST: &str = "cdn.contentful.com";
/// Preview (draft content) delivery host.
pub const PREVIEW_HOST: &str = "preview.contentful.com";
/// Backend environment used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "master";

/// Environment variable names read by [`ConfigInputs::from_env`].
pub mod env_vars {
    pub const SPACE_ID: &str = "SPACE_ID";
    pub const DELIVERY_TOKEN: &str = "DELIVERY_TOKEN";
    pub const PREVIEW_TOKEN: &str = "PREVIEW_TOKEN";
    pub const USE_PREVIEW: &str = "USE_PREVIEW";
    pub const ENVIRONMENT: &str = "CMS_ENVIRONMENT";
}

/// Which delivery endpoint a configuration addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Published content.
    Production,
    /// Draft and published content.
    Preview,
}

/// Raw, unvalidated configuration values.
#[derive(Debug, Clone, Default)]
pub struct ConfigInputs {
    pub space_id: String,
    pub delivery_token: Option<String>,
    pub preview_token: Option<String>,
    pub use_preview: bool,
    pub environment: Option<String>,
}

impl ConfigInputs {
    /// Read inputs from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read inputs through an arbitrary key lookup.
    ///
    /// Preview mode is enabled only by the exact literal `"true"`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            space_id: lookup(env_vars::SPACE_ID).unwrap_or_default(),
            delivery_token: lookup(env_vars::DELIVERY_TOKEN),
            preview_token: lookup(env_vars::PREVIEW_TOKEN),
            use_preview: lookup(env_vars::USE_PREVIEW).as_deref() == Some("true"),
            environment: lookup(env_vars::ENVIRONMENT).filter(|e| !e.is_empty()),
        }
    }
}

/// Immutable descriptor of the backend host and credential to use.
#[derive(Clone)]
pub struct ClientConfig {
    space_id: String,
    environment: String,
    host: String,
    token: String,
    endpoint: Endpoint,
    base_url: Url,
}

impl ClientConfig {
    /// Resolve inputs into a configuration.
    ///
    /// The preview host and token are selected only when the preview flag is
    /// set *and* a preview token is present; otherwise production is used.
    /// Fails if the selected token is missing or empty, or if the space id is
    /// empty.
    pub fn resolve(inputs: ConfigInputs) -> Result<Self> {
        let ConfigInputs {
            space_id,
            delivery_token,
            preview_token,
            use_preview,
            environment,
        } = inputs;

        if space_id.trim().is_empty() {
            return Err(Error::configuration(format!(
                "{} is missing or empty",
                env_vars::SPACE_ID
            )));
        }

        let (endpoint, host, token, token_var) = match preview_token {
            Some(token) if use_preview => (
                Endpoint::Preview,
                PREVIEW_HOST,
                Some(token),
                env_vars::PREVIEW_TOKEN,
            ),
            _ => (
                Endpoint::Production,
                PRODUCTION_HOST,
                delivery_token,
                env_vars::DELIVERY_TOKEN,
            ),
        };

        let token = match token {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                return Err(Error::configuration(format!(
                    "{token_var} is missing or empty"
                )))
            }
        };

        Ok(Self {
            space_id,
            environment: environment.unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            host: host.to_string(),
            token,
            endpoint,
            base_url: base_url_for(host)?,
        })
    }

    /// Resolve a configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(ConfigInputs::from_env())
    }

    /// Return a copy of this configuration addressing a different host.
    ///
    /// `host` may carry an explicit `http://` or `https://` scheme (useful for
    /// local mock servers); a bare host name is addressed over HTTPS.
    pub fn with_host(&self, host: &str) -> Result<Self> {
        Ok(Self {
            host: host.to_string(),
            base_url: base_url_for(host)?,
            ..self.clone()
        })
    }

    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Whether this configuration addresses the preview endpoint.
    pub fn is_preview(&self) -> bool {
        self.endpoint == Endpoint::Preview
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// The entries collection endpoint for this space and environment.
    pub fn entries_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "spaces",
                self.space_id.as_str(),
                "environments",
                self.environment.as_str(),
                "entries",
            ]);
        }
        url
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("space_id", &self.space_id)
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn base_url_for(host: &str) -> Result<Url> {
    let raw = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    let url = Url::parse(&raw)
        .map_err(|e| Error::configuration(format!("invalid backend host {host:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::configuration(format!(
            "backend host {host:?} cannot be used as a base URL"
        )));
    }
    Ok(url)
}
