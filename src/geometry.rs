use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GridSettings;
use crate::position::TilePosition;

// A4 at 96 dpi.
const A4_PORTRAIT_WIDTH_PX: f32 = 794.0;
const A4_LANDSCAPE_WIDTH_PX: f32 = 1123.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayoutConfig {
    pub column_count: u32,
    pub cells_per_column: u32,
    pub cell_size_px: f32,
    pub horizontal_padding_px: f32,
    pub vertical_padding_px: f32,
    pub tile_padding_px: f32,
    pub zoom_level: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn scaled(&self, factor: f32) -> PixelRect {
        PixelRect {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

impl GridLayoutConfig {
    pub fn total_columns(&self) -> u32 {
        self.column_count.saturating_mul(self.cells_per_column)
    }

    pub fn full_width_px(&self) -> f32 {
        self.cell_size_px * self.total_columns() as f32 + self.horizontal_padding_px * 2.0
    }

    pub fn grid_height_px(&self, bottom_row: u32) -> f32 {
        self.cell_size_px * bottom_row as f32 + self.vertical_padding_px * 2.0
    }

    /// Unscaled rectangle of a tile, inset by the tile padding on every side.
    pub fn tile_rect(&self, position: &TilePosition) -> PixelRect {
        let cell = self.cell_size_px;
        let pad = self.tile_padding_px;
        PixelRect {
            x: self.horizontal_padding_px + position.x() as f32 * cell + pad,
            y: self.vertical_padding_px + position.y() as f32 * cell + pad,
            width: (position.column_count() as f32 * cell - pad * 2.0).max(0.0),
            height: (position.row_count() as f32 * cell - pad * 2.0).max(0.0),
        }
    }
}

/// Derives pixel geometry and the zoom needed to fit `desired_output_width_px`.
///
/// Current dashboards use a fixed cell size. Legacy dashboards stretch their
/// cells to the container, so their saved positions keep their proportions.
/// Zoom is 1 whenever the grid or the target is degenerate.
pub fn compute_layout(
    settings: &GridSettings,
    container_width_px: f32,
    desired_output_width_px: f32,
    legacy_mode: bool,
) -> GridLayoutConfig {
    let total_cells = settings.column_count.saturating_mul(settings.cells_per_column);
    let cell_size_px = if legacy_mode {
        legacy_cell_size(settings, container_width_px, total_cells)
    } else {
        settings.cell_size_px
    };

    let mut layout = GridLayoutConfig {
        column_count: settings.column_count,
        cells_per_column: settings.cells_per_column,
        cell_size_px,
        horizontal_padding_px: settings.horizontal_padding_px,
        vertical_padding_px: settings.vertical_padding_px,
        tile_padding_px: settings.tile_padding_px,
        zoom_level: 1.0,
    };

    let full_width = layout.full_width_px();
    let degenerate = total_cells == 0
        || !(full_width.is_finite() && full_width > 0.0)
        || !(desired_output_width_px.is_finite() && desired_output_width_px > 0.0);
    if !degenerate {
        layout.zoom_level = desired_output_width_px / full_width;
    }
    layout
}

fn legacy_cell_size(settings: &GridSettings, container_width_px: f32, total_cells: u32) -> f32 {
    let minimum = settings.legacy_min_cell_size_px.max(0.0);
    if total_cells == 0 || !container_width_px.is_finite() {
        return minimum;
    }
    let usable = container_width_px - settings.horizontal_padding_px * 2.0;
    (usable / total_cells as f32).floor().max(minimum)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportTarget {
    #[default]
    Screen,
    A4Portrait,
    A4Landscape,
    FixedWidth(f32),
}

impl ExportTarget {
    pub fn output_width_px(&self, container_width_px: f32) -> f32 {
        match self {
            ExportTarget::Screen => container_width_px,
            ExportTarget::A4Portrait => A4_PORTRAIT_WIDTH_PX,
            ExportTarget::A4Landscape => A4_LANDSCAPE_WIDTH_PX,
            ExportTarget::FixedWidth(width) => *width,
        }
    }
}

impl FromStr for ExportTarget {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "screen" => Ok(ExportTarget::Screen),
            "a4" | "a4-portrait" => Ok(ExportTarget::A4Portrait),
            "a4-landscape" => Ok(ExportTarget::A4Landscape),
            other => match other.trim_end_matches("px").parse::<f32>() {
                Ok(width) if width.is_finite() && width > 0.0 => Ok(ExportTarget::FixedWidth(width)),
                _ => Err(format!(
                    "unknown export target '{value}' (expected screen, a4, a4-landscape or a width in px)"
                )),
            },
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportTarget::Screen => f.write_str("screen"),
            ExportTarget::A4Portrait => f.write_str("a4"),
            ExportTarget::A4Landscape => f.write_str("a4-landscape"),
            ExportTarget::FixedWidth(width) => write!(f, "{width}px"),
        }
    }
}
