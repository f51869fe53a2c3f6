use std::{env, path::PathBuf};

use color_eyre::Result;
use directories::BaseDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::charts::{ChartTheme, Palette};
use crate::core::{CsvImportOptions, ViewSettings};
use crate::error::DashboardError;

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_true")]
    pub has_header: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sample-data").join("acquisitions.csv"),
            delimiter: default_delimiter(),
            has_header: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChartsConfig {
    pub top_categories: usize,
    pub top_prices: usize,
    pub year_bins: usize,
    pub palette: String,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        let settings = ViewSettings::default();
        Self {
            top_categories: settings.top_categories,
            top_prices: settings.top_prices,
            year_bins: settings.year_bins,
            palette: Palette::default().to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
    #[serde(default)]
    pub debug: bool,
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_true() -> bool {
    true
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    /// Built-in defaults shipped in `.config/config.json5`
    pub fn embedded() -> Result<Self> {
        Ok(json5::from_str(CONFIG)?)
    }

    /// Layer embedded defaults, the user file and `ACQBOARD__SECTION__KEY`
    /// environment overrides, in that order.
    ///
    /// An explicit `config_path` must exist; the default location is optional.
    pub fn from_path(config_path: Option<&PathBuf>) -> Result<Self, config::ConfigError> {
        let (selected_path, required) = match config_path {
            Some(p) => (expand_tilde(p), true),
            None => (get_config_dir().join("config.json5"), false),
        };

        let cfg = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5))
            .add_source(
                config::File::from(selected_path)
                    .format(config::FileFormat::Json5)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(&PROJECT_NAME)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: Self = cfg.try_deserialize()?;
        cfg.data.path = expand_tilde(&cfg.data.path);
        Ok(cfg)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            top_categories: self.charts.top_categories,
            top_prices: self.charts.top_prices,
            year_bins: self.charts.year_bins,
        }
    }

    pub fn chart_theme(&self) -> Result<ChartTheme> {
        Ok(ChartTheme::with_palette(Palette::parse(&self.charts.palette)?))
    }

    pub fn csv_options(&self) -> Result<CsvImportOptions> {
        let mut chars = self.data.delimiter.chars();
        let delimiter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => c,
            _ => return Err(DashboardError::InvalidDelimiter(self.data.delimiter.clone()).into()),
        };
        Ok(CsvImportOptions {
            has_header: self.data.has_header,
            delimiter,
            ..CsvImportOptions::default()
        })
    }
}

fn expand_tilde(path: &PathBuf) -> PathBuf {
    if let Some(s) = path.to_str() {
        if s.starts_with("~") {
            if let Some(base) = BaseDirs::new() {
                return PathBuf::from(s.replacen("~", base.home_dir().to_str().unwrap_or(""), 1));
            }
        }
    }
    path.clone()
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else {
        PathBuf::from(".").join(".config")
    }
}
