use std::str::FromStr;

/// A border type for spatial filtering.
///
/// Decides which source sample is read when a kernel tap falls outside the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum BorderMode {
    /// This border type fills the border with zeros.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    Constant,

    /// This border type takes the outermost row or column of pixels and repeats it into the padded region.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// This border type reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    #[default]
    Reflect101,
}

impl BorderMode {
    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    /// Maps index `i` to a valid index within `[0, len)` according to the border mode.
    ///
    /// Returns `None` when the sample lies outside the image and the mode is `Constant`,
    /// or when `len` is zero.
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            BorderMode::Constant => None,
            BorderMode::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            BorderMode::Reflect101 => Some(Self::reflect101(i, len)),
        }
    }

    /// Builds the lookup table for a padded axis.
    ///
    /// Entry `j` holds the source index of the padded coordinate `j - anchor`, for
    /// `j` in `[0, len + kernel_len - 1)`.
    pub(crate) fn index_table(&self, len: usize, kernel_len: usize, anchor: usize) -> Vec<Option<usize>> {
        (0..len + kernel_len - 1)
            .map(|j| self.map_index(j as isize - anchor as isize, len))
            .collect()
    }
}

impl std::fmt::Display for BorderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            BorderMode::Constant => "constant",
            BorderMode::Replicate => "replicate",
            BorderMode::Reflect101 => "reflect101",
        };
        write!(f, "{name}")
    }
}

/// Error returned when parsing an unknown border mode name.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Unknown border mode '{0}', expected one of: constant, replicate, reflect101")]
pub struct ParseBorderModeError(pub String);

impl FromStr for BorderMode {
    type Err = ParseBorderModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "constant" => Ok(BorderMode::Constant),
            "replicate" => Ok(BorderMode::Replicate),
            "reflect101" | "reflect_101" | "default" => Ok(BorderMode::Reflect101),
            _ => Err(ParseBorderModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_index_inside() {
        for mode in [
            BorderMode::Constant,
            BorderMode::Replicate,
            BorderMode::Reflect101,
        ] {
            assert_eq!(mode.map_index(2, 5), Some(2));
        }
    }

    #[test]
    fn map_index_reflect101() {
        // gfedcb|abcdefgh|gfedcba
        let mode = BorderMode::Reflect101;
        assert_eq!(mode.map_index(-1, 8), Some(1));
        assert_eq!(mode.map_index(-6, 8), Some(6));
        assert_eq!(mode.map_index(8, 8), Some(6));
        assert_eq!(mode.map_index(14, 8), Some(0));
        assert_eq!(mode.map_index(-3, 1), Some(0));
        // reflected more than once
        assert_eq!(mode.map_index(-5, 3), Some(1));
    }

    #[test]
    fn map_index_replicate_and_constant() {
        assert_eq!(BorderMode::Replicate.map_index(-4, 3), Some(0));
        assert_eq!(BorderMode::Replicate.map_index(9, 3), Some(2));
        assert_eq!(BorderMode::Constant.map_index(-1, 3), None);
        assert_eq!(BorderMode::Constant.map_index(3, 3), None);
        assert_eq!(BorderMode::Reflect101.map_index(0, 0), None);
    }

    #[test]
    fn index_table_covers_padding() {
        let table = BorderMode::Reflect101.index_table(4, 3, 1);
        assert_eq!(table, vec![Some(1), Some(0), Some(1), Some(2), Some(3), Some(2)]);
    }

    #[test]
    fn parse_border_mode() {
        assert_eq!("constant".parse::<BorderMode>(), Ok(BorderMode::Constant));
        assert_eq!("Replicate".parse::<BorderMode>(), Ok(BorderMode::Replicate));
        assert_eq!("reflect101".parse::<BorderMode>(), Ok(BorderMode::Reflect101));
        assert_eq!(
            "wrap".parse::<BorderMode>(),
            Err(ParseBorderModeError("wrap".to_string()))
        );
        assert_eq!(BorderMode::default().to_string(), "reflect101");
    }
}
