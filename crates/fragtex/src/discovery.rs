use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// Default pattern of the fragment images.
pub const DEFAULT_PATTERN: &str = "frag_eroded_*.ppm";

/// A shell-style file name pattern.
///
/// `*` matches any run of characters (possibly empty) and `?` matches exactly one.
/// Matching is case-sensitive and applies to the file name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    pattern: String,
}

impl FilePattern {
    /// Create a pattern, rejecting empty patterns and patterns containing path separators.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() || pattern.contains(['/', '\\']) {
            return Err(ConfigError::InvalidPattern(pattern.to_string()));
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Check whether `file_name` matches the pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        let pattern: Vec<char> = self.pattern.chars().collect();
        let name: Vec<char> = file_name.chars().collect();

        let (mut p, mut n) = (0, 0);
        // position of the last `*` and the name index it is currently absorbing up to
        let mut star: Option<(usize, usize)> = None;

        while n < name.len() {
            if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
                p += 1;
                n += 1;
            } else if p < pattern.len() && pattern[p] == '*' {
                star = Some((p, n));
                p += 1;
            } else if let Some((sp, sn)) = star {
                p = sp + 1;
                n = sn + 1;
                star = Some((sp, sn + 1));
            } else {
                return false;
            }
        }

        pattern[p..].iter().all(|&c| c == '*')
    }
}

impl Default for FilePattern {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl std::fmt::Display for FilePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// List the files directly under `root_dir` whose name matches `pattern`.
///
/// The result is sorted by file name. Subdirectories are not visited. A missing or
/// unreadable directory yields an empty list.
pub fn find_images(root_dir: &Path, pattern: &FilePattern) -> Vec<PathBuf> {
    walkdir::WalkDir::new(root_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping directory entry: {e}");
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(|name| pattern.matches(name))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect()
}
