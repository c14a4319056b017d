use crate::dashboard::{CloneOutcome, Dashboard};
use crate::error::LayoutError;
use crate::geometry::{GridLayoutConfig, PixelRect};
use crate::placement::PlacementStrategy;
use crate::position::TilePosition;
use crate::scaling::{ReferenceBox, TileStyle, compute_tile_style};
use crate::tile::{TileId, TileKind, VisualizationType};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub dashboard: String,
    pub grid: GridLayoutConfig,
    pub total_columns: u32,
    pub rows: u32,
    pub width: f32,
    pub height: f32,
    pub tiles: Vec<TileDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDump {
    pub id: String,
    pub kind: TileKind,
    pub visualization: VisualizationType,
    pub position: TilePosition,
    /// Unscaled rectangle on the reference grid.
    pub reference: PixelRect,
    /// Rectangle after zoom, as it appears in the output.
    pub rect: PixelRect,
    pub style: TileStyle,
    pub container_css: Option<String>,
    pub inner_css: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneReport {
    pub source: String,
    pub clone: String,
    pub index: usize,
    pub strategy: PlacementStrategy,
    pub position: TilePosition,
}

impl CloneReport {
    pub fn new(source: &TileId, outcome: &CloneOutcome) -> Self {
        CloneReport {
            source: source.to_string(),
            clone: outcome.id.to_string(),
            index: outcome.placement.index,
            strategy: outcome.placement.strategy,
            position: outcome.placement.position,
        }
    }
}

impl LayoutDump {
    pub fn from_dashboard(
        dashboard: &Dashboard,
        grid: &GridLayoutConfig,
        self_scaling: &HashSet<VisualizationType>,
        collapse_mode: bool,
    ) -> Result<Self, LayoutError> {
        let zoom = grid.zoom_level;
        let mut tiles = Vec::with_capacity(dashboard.items().len());
        for item in dashboard.items() {
            let reference = grid.tile_rect(&item.position);
            let style = compute_tile_style(
                collapse_mode,
                item.content.visualization(),
                ReferenceBox {
                    width: reference.width,
                    height: reference.height,
                    padding: grid.tile_padding_px,
                },
                zoom,
                self_scaling,
            )?;
            tiles.push(TileDump {
                id: item.id.to_string(),
                kind: item.content.kind(),
                visualization: item.content.visualization(),
                position: item.position,
                reference,
                rect: reference.scaled(zoom),
                container_css: style.container.to_css(),
                inner_css: style.inner.to_css(),
                style,
            });
        }

        let rows = dashboard.bottom_row();
        Ok(LayoutDump {
            dashboard: dashboard.id().to_string(),
            grid: *grid,
            total_columns: grid.total_columns(),
            rows,
            width: grid.full_width_px() * zoom,
            height: grid.grid_height_px(rows) * zoom,
            tiles,
        })
    }
}

pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, value)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

pub fn write_layout_dump(dump: &LayoutDump, output: Option<&Path>) -> anyhow::Result<()> {
    write_json(dump, output)
}
