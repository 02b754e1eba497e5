use std::path::{Path, PathBuf};

use fragtex_imgproc::{filter::kernels::GaborParams, padding::BorderMode};
use serde::Deserialize;

use crate::{discovery::FilePattern, naming::OutputNaming};

/// An error type for the configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read the config file {}: {source}", path.display())]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or has unknown fields.
    #[error("Failed to parse the config. {0}")]
    Parse(#[from] serde_json::Error),

    /// No input directory was given.
    #[error("No input directory given, pass --root-dir or set `root_dir` in the config file")]
    MissingRootDir,

    /// The file pattern cannot be used to match file names.
    #[error("Invalid file pattern '{0}': must be a non-empty file name without path separators")]
    InvalidPattern(String),

    /// The output directory would not be a direct subdirectory of the root.
    #[error("Invalid output directory '{0}': must be a non-empty relative name without path separators or '..'")]
    InvalidOutputDir(String),

    /// The output prefix would move outputs out of the output directory.
    #[error("Invalid output prefix '{0}': must not contain path separators or '..'")]
    InvalidOutputPrefix(String),
}

/// Everything the batch runner needs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Directory holding the input images; outputs go to a subdirectory of it.
    pub root_dir: PathBuf,
    /// Pattern selecting the input files.
    pub pattern: FilePattern,
    /// Output directory and file naming.
    pub naming: OutputNaming,
    /// Gabor kernel parameters, fixed for the whole run.
    pub gabor: GaborParams,
    /// Border extrapolation used by the filter.
    pub border: BorderMode,
}

impl BatchConfig {
    /// Create a configuration with the default pattern, naming and filter parameters.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            pattern: FilePattern::default(),
            naming: OutputNaming::default(),
            gabor: GaborParams::default(),
            border: BorderMode::default(),
        }
    }
}

/// A partial configuration.
///
/// Layers come from the config file and from the command line. Merging keeps the values
/// of the later layer where set, and [`ConfigLayer::resolve`] fills the rest with defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    /// Directory holding the input images.
    pub root_dir: Option<PathBuf>,
    /// Side length of the Gabor kernel.
    pub ksize: Option<usize>,
    /// Standard deviation of the gaussian envelope.
    pub sigma: Option<f64>,
    /// Orientation in radians.
    pub theta: Option<f64>,
    /// Wavelength of the sinusoid.
    pub lambda: Option<f64>,
    /// Spatial aspect ratio.
    pub gamma: Option<f64>,
    /// Pattern selecting the input files.
    pub pattern: Option<String>,
    /// Name of the output directory under the root.
    pub output_dir: Option<String>,
    /// Prefix of the output file names.
    pub output_prefix: Option<String>,
    /// Border extrapolation of the filter.
    pub border: Option<BorderMode>,
}

impl ConfigLayer {
    /// Parse a layer from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a layer from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Merge `overrides` on top of `self`.
    pub fn merge(self, overrides: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            root_dir: overrides.root_dir.or(self.root_dir),
            ksize: overrides.ksize.or(self.ksize),
            sigma: overrides.sigma.or(self.sigma),
            theta: overrides.theta.or(self.theta),
            lambda: overrides.lambda.or(self.lambda),
            gamma: overrides.gamma.or(self.gamma),
            pattern: overrides.pattern.or(self.pattern),
            output_dir: overrides.output_dir.or(self.output_dir),
            output_prefix: overrides.output_prefix.or(self.output_prefix),
            border: overrides.border.or(self.border),
        }
    }

    /// Turn the layer into a full configuration, using defaults for unset values.
    ///
    /// Filter parameters are not validated here: an invalid kernel is reported for each
    /// image by the texture step.
    pub fn resolve(self) -> Result<BatchConfig, ConfigError> {
        let root_dir = self.root_dir.ok_or(ConfigError::MissingRootDir)?;
        let mut config = BatchConfig::new(root_dir);

        if let Some(pattern) = self.pattern {
            config.pattern = FilePattern::new(&pattern)?;
        }
        let naming = OutputNaming::default();
        config.naming = OutputNaming::new(
            self.output_dir.as_deref().unwrap_or(naming.dir_name()),
            self.output_prefix.as_deref().unwrap_or(naming.prefix()),
        )?;

        let gabor = &mut config.gabor;
        gabor.kernel_size = self.ksize.unwrap_or(gabor.kernel_size);
        gabor.sigma = self.sigma.unwrap_or(gabor.sigma);
        gabor.theta = self.theta.unwrap_or(gabor.theta);
        gabor.lambda = self.lambda.unwrap_or(gabor.lambda);
        gabor.gamma = self.gamma.unwrap_or(gabor.gamma);

        config.border = self.border.unwrap_or(config.border);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_defaults() -> Result<(), ConfigError> {
        let layer = ConfigLayer {
            root_dir: Some("frags".into()),
            ..Default::default()
        };
        let config = layer.resolve()?;
        assert_eq!(config, BatchConfig::new("frags"));
        assert_eq!(config.gabor.kernel_size, 31);
        assert_eq!(config.gabor.sigma, 5.0);
        assert_eq!(config.gabor.theta, std::f64::consts::FRAC_PI_4);
        assert_eq!(config.gabor.lambda, 10.0);
        assert_eq!(config.gabor.gamma, 0.5);
        assert_eq!(config.pattern.as_str(), "frag_eroded_*.ppm");
        assert_eq!(config.naming.dir_name(), "textures_traitees");
        assert_eq!(config.naming.prefix(), "texture_");
        assert_eq!(config.border, BorderMode::Reflect101);
        Ok(())
    }

    #[test]
    fn resolve_requires_root_dir() {
        assert!(matches!(
            ConfigLayer::default().resolve(),
            Err(ConfigError::MissingRootDir)
        ));
    }

    #[test]
    fn parse_json_layer() -> Result<(), ConfigError> {
        let layer = ConfigLayer::from_json_str(
            r#"{
                "root_dir": "/data/frag_eroded",
                "ksize": 21,
                "theta": 0.0,
                "pattern": "frag_*.ppm",
                "border": "replicate"
            }"#,
        )?;
        let config = layer.resolve()?;
        assert_eq!(config.root_dir, PathBuf::from("/data/frag_eroded"));
        assert_eq!(config.gabor.kernel_size, 21);
        assert_eq!(config.gabor.theta, 0.0);
        assert_eq!(config.gabor.sigma, 5.0);
        assert_eq!(config.pattern.as_str(), "frag_*.ppm");
        assert_eq!(config.border, BorderMode::Replicate);
        Ok(())
    }

    #[test]
    fn parse_json_rejects_unknown_fields() {
        let res = ConfigLayer::from_json_str(r#"{ "kernel": 3 }"#);
        assert!(matches!(res, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn merge_prefers_overrides() -> Result<(), ConfigError> {
        let file = ConfigLayer::from_json_str(
            r#"{ "root_dir": "from_file", "sigma": 3.0, "gamma": 0.8 }"#,
        )?;
        let cli = ConfigLayer {
            root_dir: Some("from_cli".into()),
            sigma: Some(4.0),
            ..Default::default()
        };
        let config = file.merge(cli).resolve()?;
        assert_eq!(config.root_dir, PathBuf::from("from_cli"));
        assert_eq!(config.gabor.sigma, 4.0);
        assert_eq!(config.gabor.gamma, 0.8);
        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = ConfigLayer::from_json_file("does/not/exist.json");
        assert!(matches!(res, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn resolve_invalid_pattern() {
        let layer = ConfigLayer {
            root_dir: Some("frags".into()),
            pattern: Some("a/b*.ppm".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            layer.resolve(),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn resolve_rejects_absolute_output_dir() -> Result<(), ConfigError> {
        let layer = ConfigLayer::from_json_str(
            r#"{ "root_dir": "frags", "output_dir": "/tmp/elsewhere" }"#,
        )?;
        assert!(matches!(
            layer.resolve(),
            Err(ConfigError::InvalidOutputDir(_))
        ));
        Ok(())
    }

    #[test]
    fn resolve_rejects_parent_output_dir() {
        let layer = ConfigLayer {
            root_dir: Some("frags".into()),
            output_dir: Some("../textures".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            layer.resolve(),
            Err(ConfigError::InvalidOutputDir(_))
        ));
    }

    #[test]
    fn resolve_rejects_empty_output_dir() {
        let layer = ConfigLayer {
            root_dir: Some("frags".into()),
            output_dir: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            layer.resolve(),
            Err(ConfigError::InvalidOutputDir(_))
        ));
    }

    #[test]
    fn resolve_rejects_climbing_prefix() -> Result<(), ConfigError> {
        let layer = ConfigLayer::from_json_str(
            r#"{ "root_dir": "frags", "output_prefix": "../../x_" }"#,
        )?;
        assert!(matches!(
            layer.resolve(),
            Err(ConfigError::InvalidOutputPrefix(_))
        ));
        Ok(())
    }

    #[test]
    fn resolve_rejects_prefix_with_separator() {
        let layer = ConfigLayer {
            root_dir: Some("frags".into()),
            output_prefix: Some("sub\\t_".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            layer.resolve(),
            Err(ConfigError::InvalidOutputPrefix(_))
        ));
    }

    #[test]
    fn resolve_keeps_default_dir_with_custom_prefix() -> Result<(), ConfigError> {
        let layer = ConfigLayer {
            root_dir: Some("frags".into()),
            output_prefix: Some("g_".to_string()),
            ..Default::default()
        };
        let config = layer.resolve()?;
        assert_eq!(config.naming.dir_name(), "textures_traitees");
        assert_eq!(config.naming.prefix(), "g_");
        Ok(())
    }
}
