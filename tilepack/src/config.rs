use crate::error::{Result, TilepackError};

/// Environment variable holding the per-side padding, in pixels.
pub const PADDING_VAR: &str = "PADDING";

/// Atlas packing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    /// Empty pixels kept around each tile on all four sides.
    pub padding: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            padding: 0,
            canvas_width: 512,
            canvas_height: 512,
        }
    }
}

impl PackConfig {
    /// Defaults, with `padding` taken from `$PADDING` when it is set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(PADDING_VAR) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                config.padding = trimmed
                    .parse()
                    .map_err(|_| TilepackError::InvalidPadding(raw.clone()))?;
            }
        }
        Ok(config)
    }
}
