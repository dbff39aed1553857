pub mod toml_config;

pub use toml_config::SiteConfig;

#[cfg(feature = "cli")]
use crate::core::theme::Theme;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "cv-forge")]
#[command(about = "Render a single-page CV from cv.json into static HTML")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Data directory or base URL holding cv.json / cv.template.json
    #[arg(long)]
    pub data: Option<String>,

    /// Output HTML file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Color theme: light, dark or system
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Validate cv.json and exit without writing anything
    #[arg(long)]
    pub check: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the configured TOML file (or defaults) and applies flag overrides.
    pub fn resolve(&self) -> crate::Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };
        self.apply_to(&mut config);
        Ok(config)
    }

    pub fn apply_to(&self, config: &mut SiteConfig) {
        if let Some(data) = &self.data {
            config.set_data_location(data);
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(theme) = self.theme {
            config.page.theme = theme;
        }
    }
}
