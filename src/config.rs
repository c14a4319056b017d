use crate::dashboard::DashboardGrid;
use crate::geometry::ExportTarget;
use crate::theme::Theme;
use crate::tile::VisualizationType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub column_count: u32,
    pub cells_per_column: u32,
    pub cell_size_px: f32,
    pub legacy_min_cell_size_px: f32,
    pub horizontal_padding_px: f32,
    pub vertical_padding_px: f32,
    pub tile_padding_px: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            column_count: 12,
            cells_per_column: 4,
            cell_size_px: 24.0,
            legacy_min_cell_size_px: 1.0,
            horizontal_padding_px: 24.0,
            vertical_padding_px: 16.0,
            tile_padding_px: 8.0,
        }
    }
}

impl GridSettings {
    /// Pixel settings of `self` with the dimensions a dashboard was saved with.
    pub fn for_grid(&self, grid: DashboardGrid) -> Self {
        Self {
            column_count: grid.column_count,
            cells_per_column: grid.cells_per_column,
            ..*self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub container_width: f32,
    pub target: ExportTarget,
    pub background: String,
    pub self_scaling: HashSet<VisualizationType>,
    pub collapse: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            container_width: 1200.0,
            target: ExportTarget::Screen,
            background: "#FFFFFF".to_string(),
            self_scaling: crate::scaling::default_self_scaling_types(),
            collapse: false,
        }
    }
}

impl RenderConfig {
    pub fn output_width(&self) -> f32 {
        self.target.output_width_px(self.container_width)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub grid: GridSettings,
    pub render: RenderConfig,
    pub theme: Theme,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GridConfigFile {
    column_count: Option<u32>,
    cells_per_column: Option<u32>,
    cell_size: Option<f32>,
    legacy_min_cell_size: Option<f32>,
    horizontal_padding: Option<f32>,
    vertical_padding: Option<f32>,
    tile_padding: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    container_width: Option<f32>,
    target: Option<String>,
    background: Option<String>,
    self_scaling: Option<Vec<VisualizationType>>,
    collapse: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeConfigFile {
    font_family: Option<String>,
    font_size: Option<f32>,
    grid_line_color: Option<String>,
    tile_border_color: Option<String>,
    text_color: Option<String>,
    query_fill: Option<String>,
    text_fill: Option<String>,
    iframe_fill: Option<String>,
    gis_fill: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    grid: Option<GridConfigFile>,
    render: Option<RenderConfigFile>,
    theme: Option<ThemeConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let is_json5 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    let parsed: ConfigFile = if is_json5 {
        json5::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };

    if let Some(grid) = parsed.grid {
        if let Some(v) = grid.column_count {
            config.grid.column_count = v;
        }
        if let Some(v) = grid.cells_per_column {
            config.grid.cells_per_column = v;
        }
        if let Some(v) = grid.cell_size {
            config.grid.cell_size_px = v;
        }
        if let Some(v) = grid.legacy_min_cell_size {
            config.grid.legacy_min_cell_size_px = v;
        }
        if let Some(v) = grid.horizontal_padding {
            config.grid.horizontal_padding_px = v;
        }
        if let Some(v) = grid.vertical_padding {
            config.grid.vertical_padding_px = v;
        }
        if let Some(v) = grid.tile_padding {
            config.grid.tile_padding_px = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.container_width {
            config.render.container_width = v;
        }
        if let Some(v) = render.target {
            config.render.target = v.parse().map_err(|err: String| anyhow::anyhow!(err))?;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
        if let Some(v) = render.self_scaling {
            config.render.self_scaling = v.into_iter().collect();
        }
        if let Some(v) = render.collapse {
            config.render.collapse = v;
        }
    }

    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = theme.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = theme.grid_line_color {
            config.theme.grid_line_color = v;
        }
        if let Some(v) = theme.tile_border_color {
            config.theme.tile_border_color = v;
        }
        if let Some(v) = theme.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = theme.query_fill {
            config.theme.query_fill = v;
        }
        if let Some(v) = theme.text_fill {
            config.theme.text_fill = v;
        }
        if let Some(v) = theme.iframe_fill {
            config.theme.iframe_fill = v;
        }
        if let Some(v) = theme.gis_fill {
            config.theme.gis_fill = v;
        }
    }

    Ok(config)
}
