use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use serde::Serialize;
use weathernow_core::{
    Config, IconVariant, PendingFetch, WeatherSnapshot, WeatherWidget, compass_label,
    config::DEFAULT_LANGUAGE, description_for, icon_for, render::render,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-now", version, about = "Current weather for any city")]
pub struct Cli {
    /// Read and write this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the weather once and exit.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Print the snapshot as JSON instead of the widget.
        #[arg(long)]
        json: bool,
    },

    /// Search cities from a prompt until Esc or Ctrl-C.
    Interactive,

    /// Set the default city and the language for place names.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        tracing::debug!(?config, "configuration loaded");

        match self.command {
            Command::Show { city, json } => show(&config, city, json).await,
            Command::Interactive => interactive(&config).await,
            Command::Configure => configure(config, self.config.as_deref()),
        }
    }
}

/// JSON shape of `show --json`: the raw snapshot plus its mapped labels.
#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    icon: IconVariant,
    description: &'static str,
    wind_direction: &'static str,
    #[serde(flatten)]
    snapshot: &'a WeatherSnapshot,
}

impl<'a> From<&'a WeatherSnapshot> for ShowOutput<'a> {
    fn from(snapshot: &'a WeatherSnapshot) -> Self {
        let code = snapshot.current.weather_code;
        Self {
            icon: icon_for(code),
            description: description_for(code),
            wind_direction: compass_label(snapshot.current.wind_direction_deg),
            snapshot,
        }
    }
}

async fn show(config: &Config, city: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut widget = WeatherWidget::from_config(config);
    let out = show_widget(&mut widget, city, json).await?;
    println!("{out}");
    Ok(())
}

/// Fetch once and produce the output of `show`. A blank CITY submits
/// nothing, so the idle widget (or `null` with `--json`) comes back.
async fn show_widget(
    widget: &mut WeatherWidget,
    city: Option<String>,
    json: bool,
) -> anyhow::Result<String> {
    let pending = match city {
        Some(city) => {
            widget.set_query(city);
            widget.begin_submit()
        }
        None => Some(widget.begin_mount()),
    };

    if let Some(pending) = pending {
        if !json {
            // Busy state goes to stderr so stdout only carries the result.
            eprintln!("{}", render(widget.state()));
        }
        let done = pending.run().await;
        widget.settle(done);
    }

    let state = widget.state();
    if !json {
        return Ok(render(state));
    }

    if let Some(message) = state.error() {
        bail!("{message}");
    }

    let snapshot = state.snapshot().map(ShowOutput::from);
    serde_json::to_string_pretty(&snapshot).context("Failed to serialize weather snapshot")
}

/// Start a fetch, print the busy widget, then print the settled one.
async fn fetch_and_render(widget: &mut WeatherWidget, pending: PendingFetch) {
    println!("{}", render(widget.state()));
    let done = pending.run().await;
    widget.settle(done);
    println!("{}", render(widget.state()));
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let mut widget = WeatherWidget::from_config(config);
    let pending = widget.begin_mount();
    fetch_and_render(&mut widget, pending).await;

    loop {
        let current = widget.state().query().to_string();
        let answer = Text::new("City name:")
            .with_placeholder("Enter city name")
            .with_initial_value(&current)
            .with_help_message("Enter to search, Esc to quit")
            .prompt();

        match answer {
            Ok(text) => {
                widget.set_query(text);
                if let Some(pending) = widget.begin_submit() {
                    fetch_and_render(&mut widget, pending).await;
                }
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        }
    }

    Ok(())
}

fn configure(mut config: Config, path: Option<&Path>) -> anyhow::Result<()> {
    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .with_validator(inquire::required!("City name is required"))
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city)?;

    let language = Text::new("Language for place names:")
        .with_default(&config.language)
        .with_help_message("Two-letter code, e.g. en, de, fr")
        .prompt()
        .context("Failed to read language")?;
    config.language = match language.trim() {
        "" => DEFAULT_LANGUAGE.to_string(),
        lang => lang.to_lowercase(),
    };

    let saved = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };

    tracing::info!(path = %saved.display(), "configuration saved");
    println!("Saved configuration to {}", saved.display());
    Ok(())
}
