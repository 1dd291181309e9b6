//! Serializable gradient description, loadable from JSON.
//!
//! ```json
//! {
//!   "colors": ["#fe0", "teal", "rgb(40, 0, 90)"],
//!   "positions": [0.0, 0.3, 1.0],
//!   "blend_mode": "oklab",
//!   "interpolation": "catmull_rom",
//!   "sharp": { "segments": 7, "smoothness": 0.2 }
//! }
//! ```
//!
//! Every field is optional. An empty object describes the default
//! black-to-white gradient.

use crate::blend::BlendMode;
use crate::error::GradientError;
use crate::gradient::{Gradient, GradientBuilder};
use crate::interpolate::Interpolation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradientConfig {
    /// CSS color strings.
    pub colors: Vec<String>,
    /// Zero, two, or one per color.
    pub positions: Vec<f64>,
    /// A CSS stop list; takes precedence over `colors`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    pub blend_mode: BlendMode,
    pub interpolation: Interpolation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharp: Option<SharpConfig>,
}

/// Quantization applied after the gradient is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharpConfig {
    pub segments: usize,
    #[serde(default)]
    pub smoothness: f64,
}

impl GradientConfig {
    pub fn from_json(json: &str) -> Result<Self, GradientError> {
        serde_json::from_str(json).map_err(|e| GradientError::InvalidFormat(e.to_string()))
    }

    pub fn builder(&self) -> GradientBuilder {
        let mut builder = GradientBuilder::new()
            .css_colors(&self.colors)
            .domain(&self.positions)
            .mode(self.blend_mode)
            .interpolation(self.interpolation);
        if let Some(css) = &self.css {
            builder = builder.css(css);
        }
        builder
    }

    pub fn build(&self) -> Result<Gradient, GradientError> {
        let gradient = self.builder().build()?;
        Ok(match self.sharp {
            Some(SharpConfig {
                segments,
                smoothness,
            }) => gradient.sharp(segments, smoothness),
            None => gradient,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_black_to_white() {
        let config = GradientConfig::from_json("{}").unwrap();
        assert_eq!(config, GradientConfig::default());
        let grad = config.build().unwrap();
        assert_eq!(grad.at(0.0).to_hex(), "#000000");
        assert_eq!(grad.at(1.0).to_hex(), "#ffffff");
    }

    #[test]
    fn full_config_parses() {
        let config = GradientConfig::from_json(
            r#"{
                "colors": ["red", "lime", "blue"],
                "positions": [0, 10],
                "blend_mode": "linear_rgb",
                "interpolation": "basis",
                "sharp": { "segments": 3 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.blend_mode, BlendMode::LinearRgb);
        assert_eq!(config.interpolation, Interpolation::Basis);
        assert_eq!(
            config.sharp,
            Some(SharpConfig {
                segments: 3,
                smoothness: 0.0
            })
        );
        let grad = config.build().unwrap();
        assert_eq!(grad.domain(), (0.0, 10.0));
        assert_eq!(grad.at(1.0).to_hex(), "#ff0000");
    }

    #[test]
    fn css_config_builds_from_stop_list() {
        let config = GradientConfig {
            css: Some("red, blue 40%".into()),
            ..Default::default()
        };
        let grad = config.build().unwrap();
        assert_eq!(grad.at(0.5).to_hex(), "#0000ff");
    }

    #[test]
    fn invalid_colors_surface_at_build() {
        let config = GradientConfig {
            colors: vec!["red".into(), "nope".into()],
            ..Default::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            GradientError::InvalidColor(vec!["nope".into()])
        );
    }

    #[test]
    fn unknown_fields_and_modes_are_rejected() {
        assert!(matches!(
            GradientConfig::from_json(r#"{"colours": []}"#),
            Err(GradientError::InvalidFormat(_))
        ));
        assert!(matches!(
            GradientConfig::from_json(r#"{"blend_mode": "cmyk"}"#),
            Err(GradientError::InvalidFormat(_))
        ));
    }

    #[test]
    fn serializes_without_empty_options() {
        let json = serde_json::to_string(&GradientConfig::default()).unwrap();
        assert_eq!(
            json,
            r#"{"colors":[],"positions":[],"blend_mode":"rgb","interpolation":"linear"}"#
        );
    }
}
