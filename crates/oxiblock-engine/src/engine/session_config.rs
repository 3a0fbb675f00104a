use serde::{Deserialize, Serialize};

/// Tunable rules of a game session.
///
/// Missing fields take their default values when deserializing, so a config
/// file only needs to mention what it changes:
///
/// ```
/// use oxiblock_engine::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(r#"{ "redraw_limit": 3 }"#).unwrap();
/// assert_eq!(config.set_size, SessionConfig::DEFAULT_SET_SIZE);
/// assert_eq!(config.redraw_limit, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Number of pieces offered in each set.
    pub set_size: usize,
    /// How many times a freshly drawn set that repeats the previous set is
    /// redrawn before it is accepted anyway.
    pub redraw_limit: usize,
}

impl SessionConfig {
    pub const DEFAULT_SET_SIZE: usize = 3;
    pub const DEFAULT_REDRAW_LIMIT: usize = 10;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            set_size: Self::DEFAULT_SET_SIZE,
            redraw_limit: Self::DEFAULT_REDRAW_LIMIT,
        }
    }
}
