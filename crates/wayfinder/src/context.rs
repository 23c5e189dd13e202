//! Resolver configuration

use serde::Deserialize;

use crate::error::Result;
use crate::menu::AnchorSide;

/// Configuration for navigation resolution and menu behavior.
///
/// Passed explicitly to the resolver and menu state; there is no global
/// instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Maximum nesting depth accepted when walking a taxonomy
    pub max_depth: usize,

    /// Whether to emit per-node trace events during resolution
    pub trace: bool,

    /// Anchor side used for flyouts when no overflow is detected
    pub default_anchor: AnchorSide,

    /// Whether flyouts flip their anchor when they overflow the viewport.
    ///
    /// Targets without a measurable viewport set this to `false` and always
    /// use `default_anchor`.
    pub overflow_detection: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            trace: false,
            default_anchor: AnchorSide::Right,
            overflow_detection: true,
        }
    }
}

impl NavConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = NavConfig::from_json(r#"{ "max_depth": 3 }"#).unwrap();
        assert_eq!(config.max_depth, 3);
        assert!(config.overflow_detection);
        assert_eq!(config.default_anchor, AnchorSide::Right);
    }

    #[test]
    fn test_anchor_side_from_json() {
        let config =
            NavConfig::from_json(r#"{ "default_anchor": "left", "overflow_detection": false }"#)
                .unwrap();
        assert_eq!(config.default_anchor, AnchorSide::Left);
        assert!(!config.overflow_detection);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = NavConfig::from_json("{ max_depth").unwrap_err();
        assert!(matches!(err, crate::NavError::InvalidConfig(_)));
    }
}
