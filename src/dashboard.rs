use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::flow::{find_overlap, grid_bottom, reflow};
use crate::placement::{Placement, find_best_new_position};
use crate::position::TilePosition;
use crate::tile::{TileContent, TileId, TileItemHolder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardGrid {
    pub column_count: u32,
    pub cells_per_column: u32,
    /// Positions were saved against the legacy, container-relative grid.
    #[serde(default)]
    pub legacy: bool,
}

impl Default for DashboardGrid {
    fn default() -> Self {
        Self {
            column_count: 12,
            cells_per_column: 4,
            legacy: false,
        }
    }
}

impl DashboardGrid {
    pub fn total_columns(&self) -> u32 {
        self.column_count.saturating_mul(self.cells_per_column)
    }
}

/// Immutable dashboard value. Every update returns a new `Dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    id: String,
    title: String,
    grid: DashboardGrid,
    items: Vec<TileItemHolder>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardFile {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    grid: DashboardGrid,
    #[serde(default)]
    items: Vec<TileItemHolder>,
}

impl<'de> Deserialize<'de> for Dashboard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let file = DashboardFile::deserialize(deserializer)?;
        Dashboard::new(file.id, file.title, file.grid, file.items).map_err(serde::de::Error::custom)
    }
}

/// Source of identifiers for tiles created by the engine.
pub trait IdGenerator {
    fn next_id(&mut self, source: &TileId, taken: &HashSet<&TileId>) -> TileId;
}

/// `<source>-copy`, then `<source>-copy-2`, `<source>-copy-3`, ...
#[derive(Debug, Default, Clone, Copy)]
pub struct CopySuffixIds;

impl IdGenerator for CopySuffixIds {
    fn next_id(&mut self, source: &TileId, taken: &HashSet<&TileId>) -> TileId {
        let first = TileId::new(format!("{source}-copy"));
        if !taken.contains(&first) {
            return first;
        }
        let mut n = 2usize;
        loop {
            let candidate = TileId::new(format!("{source}-copy-{n}"));
            if !taken.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Dashboard {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        grid: DashboardGrid,
        items: Vec<TileItemHolder>,
    ) -> Result<Self, LayoutError> {
        validate_items(&items, grid.total_columns())?;
        Ok(Self {
            id: id.into(),
            title: title.into(),
            grid,
            items,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn grid(&self) -> DashboardGrid {
        self.grid
    }

    pub fn items(&self) -> &[TileItemHolder] {
        &self.items
    }

    pub fn get(&self, id: &TileId) -> Option<&TileItemHolder> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn index_of(&self, id: &TileId) -> Result<usize, LayoutError> {
        self.items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| LayoutError::HolderNotFound(id.clone()))
    }

    /// Number of grid rows in use.
    pub fn bottom_row(&self) -> u32 {
        grid_bottom(&self.items)
    }

    pub fn clone_tile(&self, source_id: &TileId) -> Result<Dashboard, LayoutError> {
        apply_clone(
            self,
            source_id,
            self.grid.column_count,
            self.grid.cells_per_column,
            &mut CopySuffixIds,
        )
    }

    /// Like [`Dashboard::clone_tile`], also reporting where the copy went.
    pub fn clone_tile_with_placement(
        &self,
        source_id: &TileId,
    ) -> Result<CloneOutcome, LayoutError> {
        apply_clone_with_placement(
            self,
            source_id,
            self.grid.column_count,
            self.grid.cells_per_column,
            &mut CopySuffixIds,
        )
    }

    /// Moves or resizes one tile. The tile is re-slotted into row-major order
    /// and tiles it now collides with are pushed down as needed.
    pub fn with_tile_position(
        &self,
        id: &TileId,
        position: TilePosition,
    ) -> Result<Dashboard, LayoutError> {
        let index = self.index_of(id)?;
        let mut items = self.items.clone();
        let moved = items.remove(index).with_position(position);
        let key = |pos: &TilePosition| (pos.y(), pos.x());
        let slot = items
            .iter()
            .position(|item| key(&item.position) > key(&position))
            .unwrap_or(items.len());
        items.insert(slot, moved);
        self.replace_items(reflow(items, slot)?)
    }

    pub fn with_content(&self, id: &TileId, content: TileContent) -> Result<Dashboard, LayoutError> {
        let index = self.index_of(id)?;
        let mut items = self.items.clone();
        items[index] = TileItemHolder {
            content,
            ..items[index].clone()
        };
        self.replace_items(items)
    }

    pub fn without_tile(&self, id: &TileId) -> Result<Dashboard, LayoutError> {
        let index = self.index_of(id)?;
        let mut items = self.items.clone();
        items.remove(index);
        self.replace_items(items)
    }

    /// Adds a tile at an explicit, user-chosen position.
    pub fn with_tile(&self, holder: TileItemHolder) -> Result<Dashboard, LayoutError> {
        let mut items = self.items.clone();
        let key = (holder.position.y(), holder.position.x());
        let slot = items
            .iter()
            .position(|item| (item.position.y(), item.position.x()) > key)
            .unwrap_or(items.len());
        items.insert(slot, holder);
        self.replace_items(items)
    }

    /// Adds a tile on a new row below every existing tile.
    pub fn with_tile_at_bottom(
        &self,
        id: TileId,
        content: TileContent,
        column_count: u32,
        row_count: u32,
    ) -> Result<Dashboard, LayoutError> {
        let position = TilePosition::new(
            0,
            self.bottom_row().into(),
            column_count.into(),
            row_count.into(),
        )?;
        let mut items = self.items.clone();
        items.push(TileItemHolder::new(id, position, content));
        self.replace_items(items)
    }

    fn replace_items(&self, items: Vec<TileItemHolder>) -> Result<Dashboard, LayoutError> {
        validate_items(&items, self.grid.total_columns())?;
        Ok(Dashboard {
            id: self.id.clone(),
            title: self.title.clone(),
            grid: self.grid,
            items,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloneOutcome {
    pub dashboard: Dashboard,
    /// Id given to the copy.
    pub id: TileId,
    pub placement: Placement,
}

/// Clones a tile into the nearest free space and returns the new dashboard.
///
/// The copy shares the source's content, gets a fresh id from `ids` and is
/// spliced into the sequence at the solved index. Every other tile keeps its
/// position, and the input dashboard is left untouched. The result carries
/// the grid dimensions the placement was solved against.
pub fn apply_clone(
    dashboard: &Dashboard,
    source_id: &TileId,
    column_count: u32,
    cells_per_column: u32,
    ids: &mut impl IdGenerator,
) -> Result<Dashboard, LayoutError> {
    apply_clone_with_placement(dashboard, source_id, column_count, cells_per_column, ids)
        .map(|outcome| outcome.dashboard)
}

pub fn apply_clone_with_placement(
    dashboard: &Dashboard,
    source_id: &TileId,
    column_count: u32,
    cells_per_column: u32,
    ids: &mut impl IdGenerator,
) -> Result<CloneOutcome, LayoutError> {
    let source = dashboard
        .get(source_id)
        .ok_or_else(|| LayoutError::HolderNotFound(source_id.clone()))?;
    let grid = DashboardGrid {
        column_count,
        cells_per_column,
        ..dashboard.grid
    };
    let total_columns = grid.total_columns();
    let placement = find_best_new_position(&dashboard.items, source, total_columns)?;

    let id = fresh_id(&dashboard.items, source_id, ids)?;
    let copy = TileItemHolder::new(id.clone(), placement.position, source.content.clone());
    let mut items = dashboard.items.clone();
    items.insert(placement.index, copy);

    validate_items(&items, total_columns)?;
    tracing::debug!(
        dashboard = %dashboard.id,
        source = %source_id,
        copy = %id,
        tiles = items.len(),
        "cloned tile"
    );
    Ok(CloneOutcome {
        dashboard: Dashboard {
            id: dashboard.id.clone(),
            title: dashboard.title.clone(),
            grid,
            items,
        },
        id,
        placement,
    })
}

fn fresh_id(
    items: &[TileItemHolder],
    seed: &TileId,
    ids: &mut impl IdGenerator,
) -> Result<TileId, LayoutError> {
    let taken: HashSet<&TileId> = items.iter().map(|item| &item.id).collect();
    let id = ids.next_id(seed, &taken);
    if taken.contains(&id) {
        return Err(LayoutError::DuplicateTileId(id));
    }
    Ok(id)
}

fn validate_items(items: &[TileItemHolder], total_columns: u32) -> Result<(), LayoutError> {
    let mut seen: HashSet<&TileId> = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(&item.id) {
            return Err(LayoutError::DuplicateTileId(item.id.clone()));
        }
        if !item.position.fits_within(total_columns) {
            return Err(LayoutError::PositionOutOfBounds {
                id: item.id.clone(),
                right_edge: item.position.right_edge(),
                total_columns,
            });
        }
    }
    if let Some((a, b)) = find_overlap(items) {
        return Err(LayoutError::OverlappingTiles {
            first: items[a].id.clone(),
            second: items[b].id.clone(),
        });
    }
    Ok(())
}
