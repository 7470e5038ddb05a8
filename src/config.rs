use crate::api::Routes;
use crate::error::ConfigError;
use crate::terminal::RenderMode;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_HEADER: &str = "Hire Me";

/// Terminal form for sending a hiring enquiry.
#[derive(Debug, Clone, Parser)]
#[command(name = "hireme", version, about)]
pub struct Config {
    /// Backend base URL; `/api/...` paths are appended to it.
    #[arg(long, env = "HIREME_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Title shown above the form.
    #[arg(long, env = "HIREME_FORM_HEADER", default_value = DEFAULT_HEADER)]
    pub header: String,

    /// Write logs here. Logging is off without it.
    #[arg(long, env = "HIREME_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Draw below the prompt instead of on the alternate screen.
    #[arg(long)]
    pub inline: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        let Some(rest) = base
            .strip_prefix("http://")
            .or_else(|| base.strip_prefix("https://"))
        else {
            return Err(ConfigError::UnsupportedScheme(base.to_string()));
        };
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(ConfigError::MissingHost(base.to_string()));
        }
        Ok(())
    }

    pub fn routes(&self) -> Routes {
        Routes::new(self.base_url.trim())
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.inline {
            RenderMode::Inline
        } else {
            RenderMode::AltScreen
        }
    }

    pub fn log_summary(&self) {
        info!(
            base_url = %self.routes().base(),
            header = %self.header,
            mode = ?self.render_mode(),
            "configuration loaded"
        );
    }
}
