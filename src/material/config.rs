//! Material configuration intents handed to the scene target

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::material::classifier::{AlphaMode, MaterialGroupKey};
use crate::material::tokens::NameTokens;

/// Blending the scene target should use
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    Opaque,
    Cutout,
    Alpha,
}

impl From<AlphaMode> for BlendMode {
    fn from(mode: AlphaMode) -> Self {
        match mode {
            AlphaMode::Opaque => BlendMode::Opaque,
            AlphaMode::AlphaClip => BlendMode::Cutout,
            AlphaMode::AlphaBlend => BlendMode::Alpha,
        }
    }
}

/// Shader variant and its animation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shading {
    Standard,
    /// Rendered from both sides, depth-offset against z-fighting at edges
    DualSided {
        offset_factor: f32,
        offset_units: f32,
        /// Texture offset scroll speed per second
        scroll: Option<Vec2>,
    },
    /// Vertex displacement driven by a vertical gradient and a sine of time
    Swaying {
        gradient_top: [f32; 4],
        gradient_bottom: [f32; 4],
        magnitude: f32,
    },
}

/// Water scroll speed for flowing water
pub const WATER_FLOW_SPEED: Vec2 = Vec2::new(0.0, 1.0);

/// Peak vertical displacement of swaying plants
pub const SWAY_MAGNITUDE: f32 = 0.1;

/// How a shared material should be set up
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub name: String,
    pub blend: BlendMode,
    pub metallic: f32,
    pub smoothness: f32,
    pub clear_specular: bool,
    pub shading: Shading,
}

fn is_grass_like(tokens: &NameTokens) -> bool {
    tokens.contains("grass") && !tokens.contains_any(&["block", "double", "tall", "path"])
}

impl MaterialConfig {
    /// Derive the configuration of the material called `name` when it is
    /// first used by geometry of group `key`.
    pub fn derive(name: &str, key: MaterialGroupKey) -> Self {
        let tokens = NameTokens::split(name);

        let shading = if tokens.contains("water") {
            Shading::DualSided {
                offset_factor: 1.0,
                offset_units: 1.0,
                scroll: tokens.contains("flow").then_some(WATER_FLOW_SPEED),
            }
        } else if is_grass_like(&tokens) {
            Shading::Swaying {
                gradient_top: [1.0, 1.0, 1.0, 1.0],
                gradient_bottom: [0.0, 0.0, 0.0, 1.0],
                magnitude: SWAY_MAGNITUDE,
            }
        } else {
            Shading::Standard
        };

        Self {
            name: name.to_string(),
            blend: key.alpha_mode.into(),
            metallic: 0.0,
            smoothness: 0.0,
            clear_specular: true,
            shading,
        }
    }
}
