//! CLI runner - executes the selected mode

use crate::auth::BearerTokenAuthenticator;
use crate::catalog::Catalog;
use crate::cli::commands::{Cli, OutputFormat};
use crate::config::TapConfig;
use crate::engine::{SyncConfig, SyncEngine};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::MessageWriter;
use crate::state::State;
use crate::tap::Tap;
use serde_json::Value;
use std::fmt::Write as _;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing to stdout
    pub async fn run(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        self.run_to(&mut stdout).await
    }

    /// Run the CLI command, writing to `out`
    pub async fn run_to<W: Write + Send>(&self, out: &mut W) -> Result<()> {
        if self.cli.about {
            return self.about(out);
        }

        let tap = Tap::new(self.load_config()?)?;
        if self.cli.discover {
            return self.discover(&tap, out);
        }
        self.sync(&tap, out).await
    }

    /// Load and merge config files
    fn load_config(&self) -> Result<TapConfig> {
        if self.cli.config.is_empty() {
            debug!("No config file given");
            return Ok(TapConfig::default());
        }
        TapConfig::from_files(&self.cli.config)
    }

    /// Load catalog
    fn load_catalog(&self) -> Result<Option<Catalog>> {
        self.cli.catalog.as_ref().map(Catalog::from_file).transpose()
    }

    /// Load state
    fn load_state(&self) -> Result<State> {
        match &self.cli.state {
            Some(path) => State::from_file(path),
            None => Ok(State::new()),
        }
    }

    /// Describe the tap
    fn about<W: Write>(&self, out: &mut W) -> Result<()> {
        let about = Tap::about();
        match self.cli.format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&about)?)?;
            }
            OutputFormat::Markdown => {
                write!(out, "{}", about_markdown(&about))?;
            }
        }
        Ok(())
    }

    /// Print the catalog
    fn discover<W: Write>(&self, tap: &Tap, out: &mut W) -> Result<()> {
        let catalog = tap.catalog();
        info!("Discovered {} streams", catalog.streams.len());
        writeln!(out, "{}", serde_json::to_string_pretty(&catalog)?)?;
        Ok(())
    }

    /// Sync selected streams
    async fn sync<W: Write + Send>(&self, tap: &Tap, out: &mut W) -> Result<()> {
        let catalog = self.load_catalog()?;
        let state = self.load_state()?;

        let http_config = HttpClientConfig::builder()
            .base_url(tap.config().base_url())
            .build();
        let client = HttpClient::with_config(http_config)?
            .with_authenticator(BearerTokenAuthenticator::from_config(tap.config())?);

        let mut engine = SyncEngine::new(client)
            .with_config(SyncConfig::default())
            .with_state(state);
        let mut writer = MessageWriter::new(out);
        let stats = engine.sync(tap, catalog.as_ref(), &mut writer).await?;

        info!(
            "Wrote {} messages ({} records, {} pages) in {}ms",
            writer.written(),
            stats.records_synced,
            stats.pages_fetched,
            stats.duration_ms
        );
        Ok(())
    }
}

/// Render `--about` output as Markdown
fn about_markdown(about: &Value) -> String {
    let mut md = String::new();
    let text = |v: &Value| v.as_str().unwrap_or_default().to_string();

    let _ = writeln!(md, "# `{}`\n", text(&about["name"]));
    let _ = writeln!(md, "{}\n", text(&about["description"]));
    let _ = writeln!(md, "Version: {}\n", text(&about["version"]));

    md.push_str("## Capabilities\n\n");
    for capability in about["capabilities"].as_array().into_iter().flatten() {
        let _ = writeln!(md, "* `{}`", text(capability));
    }

    md.push_str("\n## Settings\n\n");
    md.push_str("| Setting | Required | Default | Description |\n");
    md.push_str("|:--------|:--------:|:-------:|:------------|\n");
    let settings = &about["settings"];
    let required: Vec<&str> = settings["required"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .collect();
    for (name, property) in settings["properties"].as_object().into_iter().flatten() {
        let default = property
            .get("default")
            .map(text)
            .unwrap_or_else(|| "None".to_string());
        let _ = writeln!(
            md,
            "| {name} | {} | {default} | {} |",
            if required.contains(&name.as_str()) { "True" } else { "False" },
            text(&property["description"])
        );
    }
    md
}
