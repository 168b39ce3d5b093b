//! Geometry and style settings for the pattern grid.
//!
//! Defaults match the stock widget: 200 unit cells, 10 unit borders and
//! 100 units of spacing. An optional JSON override can be stored under
//! [`GridConfig::STORAGE_KEY`] in `localStorage`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::Color;

pub const DEFAULT_CELL_DIAMETER: f64 = 200.0;
pub const DEFAULT_CELL_STROKE_WIDTH: f64 = 10.0;
pub const DEFAULT_SPACE: f64 = 100.0;

/// Cells per row and per column.
pub const GRID_SIDE: usize = 3;
pub const CELL_COUNT: usize = GRID_SIDE * GRID_SIDE;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("cell diameter must be positive, got {0}")]
    InvalidDiameter(f64),
    #[error("stroke width must be zero or more, got {0}")]
    InvalidStrokeWidth(f64),
    #[error("spacing must be zero or more, got {0}")]
    InvalidSpacing(f64),
    #[error("malformed config: {0}")]
    Malformed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_diameter: f64,
    pub stroke_width: f64,
    /// Gap between cells, also used as the outer margin.
    pub spacing: f64,
    pub normal_color: Color,
    pub selected_color: Color,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_diameter: DEFAULT_CELL_DIAMETER,
            stroke_width: DEFAULT_CELL_STROKE_WIDTH,
            spacing: DEFAULT_SPACE,
            normal_color: Color::WHITE,
            selected_color: Color::CYAN,
        }
    }
}

impl GridConfig {
    pub const STORAGE_KEY: &'static str = "gesture_lock_config";

    pub fn radius(&self) -> f64 {
        self.cell_diameter / 2.0
    }

    /// Width and height of the square canvas needed to fit the grid with margins.
    pub fn canvas_extent(&self) -> f64 {
        let side = GRID_SIDE as f64;
        self.spacing * (side + 1.0) + self.cell_diameter * side
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(self.cell_diameter.is_finite() && self.cell_diameter > 0.0) {
            return Err(ConfigError::InvalidDiameter(self.cell_diameter));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(ConfigError::InvalidStrokeWidth(self.stroke_width));
        }
        if !(self.spacing.is_finite() && self.spacing >= 0.0) {
            return Err(ConfigError::InvalidSpacing(self.spacing));
        }
        Ok(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(raw)
            .map_err(|err| ConfigError::Malformed(err.to_string()))?
            .validate()
    }

    /// Reads the stored override, falling back to defaults when it is absent or invalid.
    pub fn load_or_default() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(Self::STORAGE_KEY).ok().flatten());
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => {
                log::debug!("using stored grid config: {:?}", config);
                config
            }
            Err(err) => {
                log::warn!("ignoring stored grid config: {}", err);
                Self::default()
            }
        }
    }
}
