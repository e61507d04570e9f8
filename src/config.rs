//! Configuration for the pagelinks server and CLI
//!
//! Loaded from a YAML file; every key is optional.
//!
//! ```yaml
//! address: "0.0.0.0:2697"
//! base_url: "https://api.example.com"
//! pagination:
//!   kind: offset
//!   page_size: 25
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::pagination::{
    OffsetLimitPagination, PageNumberPagination, PaginationKind, PaginationStrategy,
    DEFAULT_LIMIT_PARAM, DEFAULT_OFFSET_PARAM, DEFAULT_PAGE_PARAM, DEFAULT_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Default listen address
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:2697";

/// Default public base URL used to rebuild request URLs
pub const DEFAULT_BASE_URL: &str = "http://localhost:2697";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub address: String,

    /// Public base URL of the server; request paths are resolved against it
    pub base_url: String,

    /// Pagination settings
    pub pagination: PaginationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            pagination: PaginationSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// `None` returns the defaults. A leading `~` expands to the home directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let path = expand_home(path);
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.base_url()?;
        config.pagination.validate()?;
        Ok(config)
    }

    /// Parsed public base URL
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }
}

/// Expand a leading `~` to `$HOME`
fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}

// ============================================================================
// Pagination Settings
// ============================================================================

/// Parameter names and page size used to build strategies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    /// Strategy used when none is requested explicitly
    pub kind: PaginationKind,

    /// Query parameter for page numbers
    pub page_param: String,

    /// Query parameter for offsets
    pub offset_param: String,

    /// Query parameter for limits
    pub limit_param: String,

    /// Items per page for offset/limit pagination
    pub page_size: u64,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            kind: PaginationKind::default(),
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            offset_param: DEFAULT_OFFSET_PARAM.to_string(),
            limit_param: DEFAULT_LIMIT_PARAM.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationSettings {
    /// Check parameter names and page size
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("page_param", &self.page_param),
            ("offset_param", &self.offset_param),
            ("limit_param", &self.limit_param),
        ] {
            if value.is_empty() {
                return Err(Error::invalid_value(field, "must not be empty"));
            }
        }
        if self.offset_param == self.limit_param {
            return Err(Error::invalid_value(
                "limit_param",
                "must differ from offset_param",
            ));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        Ok(())
    }

    /// Build the configured default strategy
    pub fn strategy(&self) -> Result<PaginationStrategy> {
        self.strategy_of(self.kind)
    }

    /// Build a strategy of the given kind with these settings
    pub fn strategy_of(&self, kind: PaginationKind) -> Result<PaginationStrategy> {
        Ok(match kind {
            PaginationKind::PageNumber => {
                PageNumberPagination::new(self.page_param.clone()).into()
            }
            PaginationKind::OffsetLimit => OffsetLimitPagination::new(
                self.offset_param.clone(),
                self.limit_param.clone(),
                self.page_size,
            )?
            .into(),
        })
    }
}
