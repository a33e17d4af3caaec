use anyhow::{Context, Result};
use isogo_author::DestructionConfig;
use isogo_kernel::DEFAULT_STEP;
use isogo_render::ProjectionConfig;
use isogo_stream::StreamConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level run configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub stream: StreamConfig,
    pub projection: ProjectionConfig,
    pub destruction: DestructionConfig,
    /// Observer step, in tiles per second along each axis.
    pub step: f32,
    /// Generation seed. Unset means a fresh world every run.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            stream: StreamConfig::default(),
            projection: ProjectionConfig::default(),
            destruction: DestructionConfig::default(),
            step: DEFAULT_STEP,
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening config {}", path.display()))?;
        let config: Self = serde_json::from_reader(file)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.stream.render_distance >= 0,
            "render_distance must not be negative, got {}",
            self.stream.render_distance
        );
        anyhow::ensure!(
            self.step.is_finite() && self.step >= 0.0,
            "step must be a finite non-negative number, got {}",
            self.step
        );
        anyhow::ensure!(
            self.destruction.rate.is_finite() && self.destruction.rate > 0.0,
            "destruction rate must be positive, got {}",
            self.destruction.rate
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_values() {
        let config = WorldConfig::default();
        assert_eq!(config.stream.render_distance, 6);
        assert_eq!(config.projection.tile_half_width, 254.0);
        assert_eq!(config.destruction.rate, 81.0);
        assert_eq!(config.step, 4.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "seed": 7, "stream": {{ "render_distance": 3 }} }}"#).unwrap();

        let config = WorldConfig::load(tmp.path()).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.stream.render_distance, 3);
        assert_eq!(config.stream.window_scale, 1.2);
        assert_eq!(config.step, 4.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "destruction": {{ "rate": 0.0 }} }}"#).unwrap();
        assert!(WorldConfig::load(tmp.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(WorldConfig::load(dir.path().join("nope.json")).is_err());
    }
}
