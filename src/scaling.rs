use std::collections::HashSet;

use serde::Serialize;

use crate::error::LayoutError;
use crate::tile::VisualizationType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceBox {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContainerStyle {
    None,
    /// Uniform `scale()` transform anchored at the top-left corner.
    Scale { factor: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InnerStyle {
    None,
    Sized { width: f32, height: f32, padding: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingContext {
    /// Set when the visualization scales its own geometry.
    pub scale_factor: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileStyle {
    pub container: ContainerStyle,
    pub inner: InnerStyle,
    pub context: ScalingContext,
}

impl ContainerStyle {
    pub fn to_css(&self) -> Option<String> {
        match self {
            ContainerStyle::None => None,
            ContainerStyle::Scale { factor } => Some(format!(
                "transform: scale({}); transform-origin: top left;",
                css_number(*factor)
            )),
        }
    }
}

impl InnerStyle {
    pub fn to_css(&self) -> Option<String> {
        match self {
            InnerStyle::None => None,
            InnerStyle::Sized {
                width,
                height,
                padding,
            } => Some(format!(
                "width: {}px; height: {}px; padding: {}px;",
                css_number(*width),
                css_number(*height),
                css_number(*padding)
            )),
        }
    }
}

fn css_number(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

pub fn default_self_scaling_types() -> HashSet<VisualizationType> {
    HashSet::from([VisualizationType::Map])
}

/// Splits the work of scaling a tile between the container and its content.
///
/// Visualizations that can zoom themselves receive the factor through the
/// context and are sized at the scaled dimensions. Everything else is laid out
/// at reference size and shrunk with a container transform, which avoids
/// re-laying-out the content.
pub fn compute_tile_style(
    collapse_mode: bool,
    visualization: VisualizationType,
    reference: ReferenceBox,
    scale_factor: f32,
    self_scaling_types: &HashSet<VisualizationType>,
) -> Result<TileStyle, LayoutError> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(LayoutError::InvalidScaleFactor(scale_factor));
    }

    if collapse_mode {
        return Ok(TileStyle {
            container: ContainerStyle::None,
            inner: InnerStyle::None,
            context: ScalingContext::default(),
        });
    }

    if self_scaling_types.contains(&visualization) {
        return Ok(TileStyle {
            container: ContainerStyle::None,
            inner: InnerStyle::Sized {
                width: reference.width * scale_factor,
                height: reference.height * scale_factor,
                padding: reference.padding * scale_factor,
            },
            context: ScalingContext {
                scale_factor: Some(scale_factor),
            },
        });
    }

    Ok(TileStyle {
        container: ContainerStyle::Scale {
            factor: scale_factor,
        },
        inner: InnerStyle::Sized {
            width: reference.width,
            height: reference.height,
            padding: reference.padding,
        },
        context: ScalingContext::default(),
    })
}
