use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// Extension of every written texture.
pub const OUTPUT_EXTENSION: &str = "png";

/// Where and under which name a texture is written.
///
/// The output path is a pure function of the input file name, so reprocessing an input
/// overwrites the same output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    dir_name: String,
    prefix: String,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            dir_name: "textures_traitees".to_string(),
            prefix: "texture_".to_string(),
        }
    }
}

impl OutputNaming {
    /// Create a naming that keeps every output under `<root>/<dir_name>/`.
    ///
    /// `dir_name` must be a single non-empty path component. Neither `dir_name` nor
    /// `prefix` may contain a path separator or `..`.
    pub fn new(dir_name: &str, prefix: &str) -> Result<Self, ConfigError> {
        let escapes = |s: &str| s.contains(['/', '\\']) || s.contains("..");
        if dir_name.is_empty()
            || dir_name == "."
            || escapes(dir_name)
            || Path::new(dir_name).is_absolute()
        {
            return Err(ConfigError::InvalidOutputDir(dir_name.to_string()));
        }
        if escapes(prefix) {
            return Err(ConfigError::InvalidOutputPrefix(prefix.to_string()));
        }
        Ok(Self {
            dir_name: dir_name.to_string(),
            prefix: prefix.to_string(),
        })
    }

    /// Name of the output directory, created under the input root.
    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// Prefix prepended to the input file stem.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Directory receiving the textures for inputs under `root_dir`.
    pub fn output_dir(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.dir_name)
    }

    /// Output file name for the given input file name.
    ///
    /// # Example
    ///
    /// ```
    /// use fragtex::naming::OutputNaming;
    ///
    /// let naming = OutputNaming::default();
    /// assert_eq!(
    ///     naming.output_file_name("frag_eroded_0007.ppm"),
    ///     "texture_frag_eroded_0007.png"
    /// );
    /// ```
    pub fn output_file_name(&self, input_file_name: &str) -> String {
        let stem = Path::new(input_file_name)
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        format!("{}{}.{}", self.prefix, stem, OUTPUT_EXTENSION)
    }

    /// Full output path for the given input file name.
    pub fn output_path(&self, root_dir: &Path, input_file_name: &str) -> PathBuf {
        self.output_dir(root_dir)
            .join(self.output_file_name(input_file_name))
    }
}
