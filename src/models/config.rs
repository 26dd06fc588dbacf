use scribble_colorize::{affinity, constraint, solver, ColorizeOptions, SolverKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Default pipeline parameters
    #[serde(default)]
    pub colorize: ColorizeConfig,

    /// How uploaded images are prepared
    #[serde(default)]
    pub input: InputConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Pipeline parameters, mirrored onto the core `ColorizeOptions`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ColorizeConfig {
    #[serde(default = "default_radius")]
    pub radius: usize,

    #[serde(default = "default_white_tolerance")]
    pub white_tolerance: f64,

    #[serde(default = "default_mark_threshold")]
    pub mark_threshold: f64,

    /// Keep the reference color wherever the scribble is left white
    #[serde(default)]
    pub pin_white_to_reference: bool,

    #[serde(default)]
    pub solver: SolverName,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_radius() -> usize {
    affinity::DEFAULT_RADIUS
}

fn default_white_tolerance() -> f64 {
    constraint::DEFAULT_WHITE_TOLERANCE
}

fn default_mark_threshold() -> f64 {
    constraint::DEFAULT_MARK_THRESHOLD
}

fn default_tolerance() -> f64 {
    solver::DEFAULT_TOLERANCE
}

fn default_max_iterations() -> usize {
    solver::DEFAULT_MAX_ITERATIONS
}

impl Default for ColorizeConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            white_tolerance: default_white_tolerance(),
            mark_threshold: default_mark_threshold(),
            pin_white_to_reference: false,
            solver: SolverName::default(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InputConfig {
    /// Resize a scribble drawn at another resolution onto the reference grid
    #[serde(default = "default_fit_scribble")]
    pub fit_scribble: bool,
}

fn default_fit_scribble() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            fit_scribble: default_fit_scribble(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Largest accepted `width * height` per image
    #[serde(default = "default_max_pixels")]
    pub max_pixels: usize,

    /// Largest accepted request body (base64 inflates PNGs by a third)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_max_pixels() -> usize {
    4_000_000
}

fn default_max_body_bytes() -> usize {
    64 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_pixels: default_max_pixels(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Solver selection as it appears in YAML, JSON and on the command line
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SolverName {
    #[default]
    Bicgstab,
    GaussSeidel,
}

impl From<SolverName> for SolverKind {
    fn from(name: SolverName) -> Self {
        match name {
            SolverName::Bicgstab => SolverKind::BiCgStab,
            SolverName::GaussSeidel => SolverKind::GaussSeidel,
        }
    }
}

/// Per-request parameter overrides (HTTP `options` object or CLI flags)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ColorizeOverrides {
    /// Affinity window half-width (1 gives a 3x3 window)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverName>,

    /// Relative residual at which the solver stops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,

    /// Per-channel iteration cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,

    /// Recolorize: white keeps the reference color instead of meaning "no opinion"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_white_to_reference: Option<bool>,
}

impl ColorizeOverrides {
    pub fn apply(&self, options: &mut ColorizeOptions) {
        if let Some(radius) = self.radius {
            options.affinity.radius = radius;
        }
        if let Some(solver) = self.solver {
            options.solver.kind = solver.into();
        }
        if let Some(tolerance) = self.tolerance {
            options.solver.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            options.solver.max_iterations = max_iterations;
        }
        if let Some(pin) = self.pin_white_to_reference {
            options.constraint.pin_white_to_reference = pin;
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to `CONFIG_FILE`.
    ///
    /// A missing or malformed file is not fatal: the defaults are used and a
    /// warning is logged.
    pub fn load(path: Option<&Path>) -> Self {
        let env_path = std::env::var("CONFIG_FILE").ok();
        let path = match path.or(env_path.as_deref().map(Path::new)) {
            Some(path) => path,
            None => {
                tracing::debug!("No config file given, using defaults");
                return Self::default();
            }
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        radius = config.colorize.radius,
                        solver = ?config.colorize.solver,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Server bind address; `BIND_ADDR` wins over the file.
    pub fn bind_addr(&self) -> String {
        std::env::var("BIND_ADDR").unwrap_or_else(|_| self.server.bind_addr.clone())
    }

    /// Core pipeline options described by the `colorize` section.
    pub fn colorize_options(&self) -> ColorizeOptions {
        let c = &self.colorize;
        let mut options = ColorizeOptions::default();
        options.constraint.white_tolerance = c.white_tolerance;
        options.constraint.mark_threshold = c.mark_threshold;
        options.constraint.pin_white_to_reference = c.pin_white_to_reference;
        options.affinity.radius = c.radius;
        options.solver.kind = c.solver.into();
        options.solver.tolerance = c.tolerance;
        options.solver.max_iterations = c.max_iterations;
        options
    }
}
