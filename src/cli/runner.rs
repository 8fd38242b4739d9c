//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::PagerConfig;
use crate::error::{Error, Result, ResultExt};
use crate::pagination::{parse_links, parse_page_params, PageSource, PagingResource};
use crate::types::Item;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;

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
        match &self.cli.command {
            Commands::Fetch { pages } => self.fetch(pages).await,
            Commands::Validate => self.validate(),
            Commands::Links { header } => {
                self.links(header);
                Ok(())
            }
        }
    }

    /// Resolve the collection config from the file and command-line overrides
    pub fn load_config(&self) -> Result<PagerConfig> {
        let mut config = match (&self.cli.config, &self.cli.url) {
            (Some(path), _) => PagerConfig::from_file(path)?,
            (None, Some(url)) => PagerConfig::new(url.clone()),
            (None, None) => {
                return Err(Error::config(
                    "No collection given. Use --config <FILE> or --url <URL>",
                ))
            }
        };

        if let (Some(_), Some(url)) = (&self.cli.config, &self.cli.url) {
            config.endpoint.clone_from(url);
        }
        if let Some(size) = self.cli.page_size {
            config.page_size = size;
        }
        for (key, value) in &self.cli.params {
            config.params.insert(key.clone(), value.clone());
        }

        config.validate()?;
        Ok(config)
    }

    async fn fetch(&self, pages: &[String]) -> Result<()> {
        let config = self.load_config()?;
        let mut resource = config.build_resource()?;
        info!("Fetching {}", config.endpoint);

        resource.fetch_first_page(Some(config.page_size)).await?;
        self.emit_page(&resource, "first");

        for key in pages {
            resource
                .fetch_page(key)
                .await
                .with_context(|| format!("Navigating to '{key}'"))?;
            self.emit_page(&resource, key);
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        let summary = json!({
            "type": "VALID",
            "endpoint": config.endpoint,
            "page_size": config.page_size,
            "params": config.params.iter().collect::<BTreeMap<_, _>>(),
            "conditional_requests": config.conditional_requests,
        });

        match self.cli.format {
            OutputFormat::Json => println!("{summary}"),
            OutputFormat::Pretty => {
                println!("Config OK: {}", config.endpoint);
                println!("  page size: {}", config.page_size);
                for (key, value) in config.params.iter().collect::<BTreeMap<_, _>>() {
                    println!("  param {key}={value}");
                }
            }
        }
        Ok(())
    }

    fn links(&self, header: &str) {
        let links = parse_links(Some(header))
            .into_iter()
            .collect::<BTreeMap<_, _>>();

        for (rel, url) in links {
            let params = parse_page_params(&url);
            match self.cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    json!({
                        "rel": rel,
                        "url": url,
                        "maxItems": params.max_items,
                        "skipCount": params.skip_count,
                        "page": params.page_number(),
                    })
                ),
                OutputFormat::Pretty => println!("{rel:>6}: {url} ({params})"),
            }
        }
    }

    fn emit_page<S: PageSource>(&self, resource: &PagingResource<S>, key: &str) {
        let state = resource.pagination_state();
        let items = resource.current_items();

        match self.cli.format {
            OutputFormat::Json => println!("{}", page_message(key, resource)),
            OutputFormat::Pretty => {
                println!(
                    "== {} -> page {}/{} ({} items)",
                    key,
                    state.current_page_number,
                    state.count_of_pages,
                    items.len()
                );
                for item in items {
                    println!("  {item}");
                }
            }
        }
    }
}

/// JSON message describing the current page of a resource
pub fn page_message<S: PageSource>(key: &str, resource: &PagingResource<S>) -> Value {
    let state = resource.pagination_state();
    json!({
        "type": "PAGE",
        "key": key,
        "page": state.current_page_number,
        "count_of_pages": state.count_of_pages,
        "items": resource.current_items().iter().cloned().collect::<Vec<Item>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn runner(args: &[&str]) -> Runner {
        Runner::new(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_load_config_from_url() {
        let runner = runner(&[
            "remote-pager",
            "--url",
            "https://example.com/api/items",
            "-p",
            "userId=u1",
            "--page-size",
            "5",
            "validate",
        ]);
        let config = runner.load_config().unwrap();

        assert_eq!(config.endpoint, "https://example.com/api/items");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.params.get("userId"), Some(&"u1".to_string()));
    }

    #[test]
    fn test_load_config_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "endpoint: https://example.com/api/organization\npage_size: 20\nparams:\n  userId: a"
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let runner = runner(&[
            "remote-pager",
            "--config",
            &path,
            "-p",
            "userId=b",
            "validate",
        ]);
        let config = runner.load_config().unwrap();

        assert_eq!(config.page_size, 20);
        assert_eq!(config.params.get("userId"), Some(&"b".to_string()));
    }

    #[test]
    fn test_load_config_requires_source() {
        let runner = runner(&["remote-pager", "validate"]);
        let err = runner.load_config().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_config_rejects_reserved_param() {
        let runner = runner(&[
            "remote-pager",
            "--url",
            "https://example.com/api/items",
            "-p",
            "maxItems=3",
            "validate",
        ]);
        assert!(runner.load_config().is_err());
    }
}
