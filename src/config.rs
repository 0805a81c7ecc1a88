//! Theme files: JSON overrides on top of the default brand theme.
//!
//! ```json
//! {
//!   "style": "whitegrid",
//!   "palette": ["#00A0DF", "#425563"],
//!   "tick_format": { "kind": "grouped", "locale": "de" },
//!   "context": { "tick_label_size": 9 }
//! }
//! ```

use crate::palette::{InvalidHexColor, Palette};
use crate::style::{AxesStyle, UnknownStyle};
use crate::theme::Theme;
use crate::ticks::TickFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read theme file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] InvalidHexColor),
    #[error(transparent)]
    Style(#[from] UnknownStyle),
}

/// Optional overrides of the plot context (points).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextOverrides {
    pub font_size: Option<f64>,
    pub title_size: Option<f64>,
    pub tick_label_size: Option<f64>,
    pub legend_font_size: Option<f64>,
    pub line_width: Option<f64>,
    pub grid_line_width: Option<f64>,
    pub marker_size: Option<f64>,
    pub patch_line_width: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub style: Option<String>,
    pub palette: Option<Vec<String>>,
    pub tick_format: Option<TickFormat>,
    pub font_family: Option<String>,
    pub font_path: Option<PathBuf>,
    pub context: ContextOverrides,
}

impl ThemeConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Theme {
    pub fn from_config(cfg: &ThemeConfig) -> Result<Theme, ConfigError> {
        let style = match cfg.style.as_deref() {
            Some(s) => s.parse::<AxesStyle>()?,
            None => AxesStyle::default(),
        };
        let mut theme = Theme::new(style);
        if let Some(hex) = &cfg.palette {
            theme.palette = Palette::from_hex(hex)?;
        }
        if let Some(tf) = &cfg.tick_format {
            theme.tick_format = tf.clone();
        }
        if let Some(family) = &cfg.font_family {
            theme.font_family = family.clone();
        }
        theme.font_path = cfg.font_path.clone();

        let o = &cfg.context;
        let c = &mut theme.context;
        if let Some(v) = o.font_size {
            c.font_size = v;
            c.axes_label_size = v;
        }
        if let Some(v) = o.title_size {
            c.title_size = v;
        }
        if let Some(v) = o.tick_label_size {
            c.tick_label_size = v;
        }
        if let Some(v) = o.legend_font_size {
            c.legend_font_size = v;
        }
        if let Some(v) = o.line_width {
            c.line_width = v;
        }
        if let Some(v) = o.grid_line_width {
            c.grid_line_width = v;
        }
        if let Some(v) = o.marker_size {
            c.marker_size = v;
        }
        if let Some(v) = o.patch_line_width {
            c.patch_line_width = v.max(0.0);
        }
        Ok(theme)
    }
}

/// Read a JSON theme file.
pub fn load_theme<P: AsRef<Path>>(path: P) -> Result<Theme, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = ThemeConfig::from_json(&text)?;
    log::debug!("loaded theme config from {}", path.display());
    Theme::from_config(&cfg)
}
