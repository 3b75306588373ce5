use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::chart::{AxisConfig, AxisRange, MarkerStyle, MAX_TICKS};
use crate::color::ColorScheme;
use crate::geometry::Vector;
use crate::state::{Method, VectorCount, VectorSet, DEFAULT_VECTORS, MAX_VECTORS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("axis range is empty: min {min} must be below max {max}")]
    EmptyAxis { min: f64, max: f64 },
    #[error("tick step must be positive, got {0}")]
    TickStep(f64),
    #[error("tick step {step} gives {ticks:.0} ticks per axis, at most {max} allowed")]
    TooManyTicks { step: f64, ticks: f64, max: usize },
    #[error("drag tolerance must be positive, got {0}")]
    DragTolerance(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub vectors: VectorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub marker: MarkerStyle,
    pub color_scheme: ColorScheme,
    pub fps: u32,
    /// Duration of the before/after animation; 0 switches instantly
    pub transition_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            marker: MarkerStyle::Braille,
            color_scheme: ColorScheme::Classic,
            fps: 60,
            transition_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub axis_min: f64,
    pub axis_max: f64,
    pub tick_step: f64,
    pub show_grid: bool,
    pub show_tick_labels: bool,
    /// Distance, in terminal cells, within which a click grabs a vector tip
    pub drag_tolerance: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            axis_min: -300.0,
            axis_max: 300.0,
            tick_step: 30.0,
            show_grid: true,
            show_tick_labels: true,
            drag_tolerance: 1.5,
        }
    }
}

impl ChartConfig {
    pub fn axes(&self) -> AxisConfig {
        let range = AxisRange {
            min: self.axis_min,
            max: self.axis_max,
            step: self.tick_step,
        };
        AxisConfig { x: range, y: range }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorsConfig {
    pub count: VectorCount,
    pub method: Method,
    pub initial: [Vector; MAX_VECTORS],
}

impl Default for VectorsConfig {
    fn default() -> Self {
        Self {
            count: VectorCount::Two,
            method: Method::Triangle,
            initial: DEFAULT_VECTORS,
        }
    }
}

impl VectorsConfig {
    pub fn vector_set(&self) -> VectorSet {
        VectorSet::new(self.initial)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            chart: ChartConfig::default(),
            vectors: VectorsConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let chart = &self.chart;
        if !(chart.axis_min < chart.axis_max) {
            return Err(ConfigError::EmptyAxis {
                min: chart.axis_min,
                max: chart.axis_max,
            });
        }
        if !(chart.tick_step > 0.0) {
            return Err(ConfigError::TickStep(chart.tick_step));
        }
        let ticks = (chart.axis_max - chart.axis_min) / chart.tick_step;
        if ticks > MAX_TICKS as f64 {
            return Err(ConfigError::TooManyTicks {
                step: chart.tick_step,
                ticks,
                max: MAX_TICKS,
            });
        }
        if !(chart.drag_tolerance > 0.0) {
            return Err(ConfigError::DragTolerance(chart.drag_tolerance));
        }
        Ok(())
    }

    /// Get the default XDG config path (~/.config/vectorsum/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vectorsum").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist, logs a warning on errors.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("{}; using defaults", e);
                None
            }
        }
    }

    /// Write the commented template to the XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Self::generate_config_template())?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# vectorsum configuration

[display]
# Canvas marker: braille, halfblock, dot, block
marker = "braille"
# Color scheme: classic, spectrum, pastel, monochrome
color_scheme = "classic"
# Redraw rate while a transition is running
fps = 60
# Before/after animation length in milliseconds (0 = instant)
transition_ms = 400

[chart]
# Both axes share these bounds
axis_min = -300.0
axis_max = 300.0
# Grid and tick spacing
tick_step = 30.0
show_grid = true
show_tick_labels = true
# How close (in terminal cells) a click must be to grab a vector tip
drag_tolerance = 1.5

[vectors]
# Number of active vectors: 2 or 3 (other values are clamped)
count = 2
# Composition method: triangle or parallelogram
method = "triangle"
# Starting vectors (angle in degrees); the third is used when count = 3
initial = [
    { magnitude = 80.0, angle = 0.0 },
    { magnitude = 70.0, angle = 30.0 },
    { magnitude = 60.0, angle = -45.0 },
]
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(count) = args.count {
            self.vectors.count = VectorCount::from(count);
        }
        if let Some(method) = args.method {
            self.vectors.method = method;
        }
        if let Some(ref colors) = args.colors {
            match colors.parse() {
                Ok(scheme) => self.display.color_scheme = scheme,
                Err(e) => warn!("{}; keeping {}", e, self.display.color_scheme.name()),
            }
        }
        if let Some(marker) = args.marker {
            self.display.marker = marker;
        }
    }
}
