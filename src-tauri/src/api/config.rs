//! API Configuration
//!
//! Read from `api_config.json` in the app config dir. Missing file means
//! defaults; `SCHOOLPAY_API_URL` overrides the base URL either way.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ApiError, ApiResult};

pub const CONFIG_FILE_NAME: &str = "api_config.json";
pub const BASE_URL_ENV: &str = "SCHOOLPAY_API_URL";

const DEFAULT_BASE_URL: &str = "https://api.schoolpay.app/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    /// Load from `dir/api_config.json`, then apply the env override
    pub fn load(dir: &Path) -> ApiResult<Self> {
        let env_url = std::env::var(BASE_URL_ENV).ok();
        Self::load_with_override(dir, env_url.as_deref())
    }

    pub(crate) fn load_with_override(dir: &Path, base_url: Option<&str>) -> ApiResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| ApiError::InvalidInput(format!("{}: {}", path.display(), e)))?;
            serde_json::from_str::<ApiConfig>(&raw)
                .map_err(|e| ApiError::InvalidInput(format!("{}: {}", path.display(), e)))?
        } else {
            log::info!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            ApiConfig::default()
        };

        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.base_url = url.to_string();
        }
        config.normalize();
        Ok(config)
    }

    fn normalize(&mut self) {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self.timeout_secs = self.timeout_secs.max(1);
        self.page_size = self.page_size.max(1);
    }

    /// Absolute URL for an API path such as `installments`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
