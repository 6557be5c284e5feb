use serde::Deserialize;

pub const DEFAULT_INDENTATION: usize = 4;

/// Output formatting options.
///
/// Deserializing a partial set of options fills the rest from [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Spaces per nesting level.
    pub indentation: usize,
}

impl ConverterOptions {
    pub fn with_indentation(indentation: usize) -> Self {
        Self { indentation }
    }

    /// Prefix `line` with `levels` levels of indentation.
    pub fn indent(&self, line: &str, levels: usize) -> String {
        format!("{}{}", " ".repeat(self.indentation * levels), line)
    }
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            indentation: DEFAULT_INDENTATION,
        }
    }
}
