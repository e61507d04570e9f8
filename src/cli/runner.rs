//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{AppConfig, PaginationSettings};
use crate::error::{Error, Result};
use crate::pagination::{Pagination, PaginationKind, PaginationState, PagingLinks};
use serde_json::json;
use std::fmt::Write as _;
use url::Url;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = AppConfig::load(self.cli.config.as_deref())?;
        if self.cli.verbose {
            eprintln!("Using pagination kind: {}", config.pagination.kind);
        }

        match &self.cli.command {
            Commands::Links {
                url,
                kind,
                page_param,
                offset_param,
                limit_param,
                page_size,
            } => {
                let mut settings = config.pagination.clone();
                apply_overrides(
                    &mut settings,
                    page_param.as_deref(),
                    offset_param.as_deref(),
                    limit_param.as_deref(),
                    *page_size,
                );
                self.links(url, kind.unwrap_or(settings.kind), &settings)
            }
            Commands::Config => self.show_config(&config),
            Commands::Serve { port } => {
                let mut server_config = crate::cli::ServerConfig::try_from(config)?;
                if let Some(port) = port {
                    server_config.address = format!("0.0.0.0:{port}");
                }
                crate::cli::serve(server_config).await
            }
        }
    }

    /// Print the links for a URL
    fn links(&self, raw_url: &str, kind: PaginationKind, settings: &PaginationSettings) -> Result<()> {
        settings.validate()?;
        let url = Url::parse(raw_url)?;
        let strategy = settings.strategy_of(kind)?;

        let state = strategy.parse(&url)?;
        let links = strategy.links(&url, &state)?;
        tracing::debug!(%kind, count = links.len(), "Computed links");

        println!("{}", render_links(self.cli.format, &state, &links)?);
        Ok(())
    }

    /// Print the effective configuration
    fn show_config(&self, config: &AppConfig) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
            OutputFormat::Header | OutputFormat::Pretty => {
                print!("{}", serde_yaml::to_string(config)?);
            }
        }
        Ok(())
    }
}

/// Apply command-line overrides to pagination settings
fn apply_overrides(
    settings: &mut PaginationSettings,
    page_param: Option<&str>,
    offset_param: Option<&str>,
    limit_param: Option<&str>,
    page_size: Option<u64>,
) {
    if let Some(param) = page_param {
        settings.page_param = param.to_string();
    }
    if let Some(param) = offset_param {
        settings.offset_param = param.to_string();
    }
    if let Some(param) = limit_param {
        settings.limit_param = param.to_string();
    }
    if let Some(size) = page_size {
        settings.page_size = size;
    }
}

/// Render links in the requested output format
pub fn render_links(
    format: OutputFormat,
    state: &PaginationState,
    links: &PagingLinks,
) -> Result<String> {
    match format {
        OutputFormat::Header => Ok(links.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string(&json!({
            "state": state,
            "links": links,
        }))?),
        OutputFormat::Pretty => {
            let mut out = String::new();
            for link in links {
                writeln!(out, "{:<5} {}", link.relation.as_str(), link.target)
                    .map_err(|e| Error::Other(e.to_string()))?;
            }
            Ok(out.trim_end().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{PageNumberPagination, PaginationStrategy};
    use pretty_assertions::assert_eq;

    fn page_links(raw: &str) -> (PaginationState, PagingLinks) {
        let strategy = PaginationStrategy::from(PageNumberPagination::default());
        let url = Url::parse(raw).unwrap();
        let state = strategy.parse(&url).unwrap();
        let links = strategy.links(&url, &state).unwrap();
        (state, links)
    }

    #[test]
    fn test_render_header() {
        let (state, links) = page_links("https://api.example.com/items?page=2");
        assert_eq!(
            render_links(OutputFormat::Header, &state, &links).unwrap(),
            "<https://api.example.com/items?page=1>; rel=\"first\",\
             <https://api.example.com/items?page=1>; rel=\"prev\",\
             <https://api.example.com/items?page=3>; rel=\"next\""
        );
    }

    #[test]
    fn test_render_pretty() {
        let (state, links) = page_links("https://api.example.com/items");
        assert_eq!(
            render_links(OutputFormat::Pretty, &state, &links).unwrap(),
            "first https://api.example.com/items?page=1\n\
             next  https://api.example.com/items?page=2"
        );
    }

    #[test]
    fn test_render_json() {
        let (state, links) = page_links("https://api.example.com/items?page=5");
        let rendered = render_links(OutputFormat::Json, &state, &links).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["state"], json!({"kind": "page", "page": 5}));
        assert_eq!(value["links"].as_array().unwrap().len(), 3);
        assert_eq!(value["links"][1]["rel"], "prev");
    }

    #[test]
    fn test_apply_overrides() {
        let mut settings = PaginationSettings::default();
        apply_overrides(&mut settings, None, Some("skip"), Some("take"), Some(10));

        assert_eq!(settings.page_param, "page");
        assert_eq!(settings.offset_param, "skip");
        assert_eq!(settings.limit_param, "take");
        assert_eq!(settings.page_size, 10);
    }
}
