//! Merchant configuration.
//!
//! The static template is issued once per merchant and rarely changes, so it
//! lives in a TOML file next to the render service settings:
//!
//! ```toml
//! template = "00020101021126...6304ABCD"
//!
//! [render]
//! endpoint = "https://api.qrserver.com/v1/create-qr-code/"
//! size = "300x300"
//! ```
//!
//! `QRIS_TEMPLATE` in the environment overrides the file's template.

use crate::application::mutator::ensure_static;
use crate::domain::tlv;
use crate::error::{QrisError, Result};
use crate::interfaces::render::{DEFAULT_ENDPOINT, DEFAULT_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TEMPLATE_ENV: &str = "QRIS_TEMPLATE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MerchantConfig {
    /// Static payload the dynamic codes are derived from.
    #[serde(default)]
    pub template: Option<String>,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_size")]
    pub size: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_size() -> String {
    DEFAULT_SIZE.to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            size: default_size(),
        }
    }
}

impl MerchantConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replaces the template with `QRIS_TEMPLATE` when it is set and non-empty.
    pub fn apply_env(&mut self) {
        self.apply_template_override(std::env::var(TEMPLATE_ENV).ok());
    }

    fn apply_template_override(&mut self, value: Option<String>) {
        if let Some(template) = value.filter(|t| !t.trim().is_empty()) {
            self.template = Some(template.trim().to_string());
        }
    }

    /// The configured template, checked to be a decodable static payload.
    pub fn static_template(&self) -> Result<&str> {
        let template = self.template.as_deref().ok_or(QrisError::MissingTemplate)?;
        ensure_static(&tlv::decode(template)?)?;
        Ok(template)
    }
}
