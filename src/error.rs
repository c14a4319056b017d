use thiserror::Error;

use crate::tile::TileId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid tile position (x={x}, y={y}, columns={column_count}, rows={row_count}): {reason}")]
    InvalidPosition {
        x: i64,
        y: i64,
        column_count: i64,
        row_count: i64,
        reason: &'static str,
    },
    #[error("tile not found: {0}")]
    HolderNotFound(TileId),
    #[error("duplicate tile id: {0}")]
    DuplicateTileId(TileId),
    #[error("tile {id} overflows the grid: right edge {right_edge} > {total_columns} columns")]
    PositionOutOfBounds {
        id: TileId,
        right_edge: u32,
        total_columns: u32,
    },
    #[error("tiles {first} and {second} overlap")]
    OverlappingTiles { first: TileId, second: TileId },
    #[error("scale factor must be finite and positive, got {0}")]
    InvalidScaleFactor(f32),
}
