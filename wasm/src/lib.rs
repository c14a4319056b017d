use dashboard_grid::{
    Dashboard, ExportTarget, GridSettings, LayoutDump, TileId, VisualizationType, compute_layout,
};
use serde::Deserialize;
use std::collections::HashSet;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridLayoutOptions {
    container_width: Option<f32>,
    target: Option<String>,
    collapse: Option<bool>,
    self_scaling: Option<Vec<VisualizationType>>,
}

fn parse_options(options_json: Option<String>) -> Result<GridLayoutOptions, String> {
    match options_json {
        Some(raw) => serde_json::from_str(&raw).map_err(|error| error.to_string()),
        None => Ok(GridLayoutOptions::default()),
    }
}

fn layout_json(dashboard_json: &str, options: GridLayoutOptions) -> Result<String, String> {
    let dashboard: Dashboard =
        serde_json::from_str(dashboard_json).map_err(|error| error.to_string())?;
    let container_width = options.container_width.unwrap_or(1200.0);
    let target = match options.target.as_deref() {
        Some(raw) => raw.parse::<ExportTarget>()?,
        None => ExportTarget::Screen,
    };
    let self_scaling: HashSet<VisualizationType> = match options.self_scaling {
        Some(types) => types.into_iter().collect(),
        None => dashboard_grid::scaling::default_self_scaling_types(),
    };

    let settings = GridSettings::default().for_grid(dashboard.grid());
    let grid = compute_layout(
        &settings,
        container_width,
        target.output_width_px(container_width),
        dashboard.grid().legacy,
    );
    let dump = LayoutDump::from_dashboard(
        &dashboard,
        &grid,
        &self_scaling,
        options.collapse.unwrap_or(false),
    )
    .map_err(|error| error.to_string())?;
    serde_json::to_string(&dump).map_err(|error| error.to_string())
}

fn clone_json(dashboard_json: &str, tile_id: &str) -> Result<String, String> {
    let dashboard: Dashboard =
        serde_json::from_str(dashboard_json).map_err(|error| error.to_string())?;
    let next = dashboard
        .clone_tile(&TileId::from(tile_id))
        .map_err(|error| error.to_string())?;
    serde_json::to_string(&next).map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn compute_grid_layout(
    dashboard_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = parse_options(options_json).map_err(|error| JsValue::from_str(&error))?;
    layout_json(dashboard_json, options).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn clone_tile(dashboard_json: &str, tile_id: &str) -> Result<String, JsValue> {
    clone_json(dashboard_json, tile_id).map_err(|error| JsValue::from_str(&error))
}
