use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Placement of a tile on the grid, in grid cells.
///
/// The column axis is bounded by the dashboard's total column count; the row
/// axis grows without limit. Values are validated on construction and on
/// deserialization, so a `TilePosition` in hand always has non-negative
/// offsets and spans of at least one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTilePosition", into = "RawTilePosition")]
pub struct TilePosition {
    x: u32,
    y: u32,
    column_count: u32,
    row_count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTilePosition {
    x: i64,
    #[serde(default)]
    y: i64,
    column_count: i64,
    #[serde(default = "default_row_count")]
    row_count: i64,
}

fn default_row_count() -> i64 {
    1
}

impl TryFrom<RawTilePosition> for TilePosition {
    type Error = LayoutError;

    fn try_from(raw: RawTilePosition) -> Result<Self, Self::Error> {
        TilePosition::new(raw.x, raw.y, raw.column_count, raw.row_count)
    }
}

impl From<TilePosition> for RawTilePosition {
    fn from(pos: TilePosition) -> Self {
        Self {
            x: pos.x.into(),
            y: pos.y.into(),
            column_count: pos.column_count.into(),
            row_count: pos.row_count.into(),
        }
    }
}

impl TilePosition {
    pub fn new(x: i64, y: i64, column_count: i64, row_count: i64) -> Result<Self, LayoutError> {
        let invalid = |reason| LayoutError::InvalidPosition {
            x,
            y,
            column_count,
            row_count,
            reason,
        };
        if x < 0 {
            return Err(invalid("x must not be negative"));
        }
        if y < 0 {
            return Err(invalid("y must not be negative"));
        }
        if column_count < 1 {
            return Err(invalid("column count must be at least 1"));
        }
        if row_count < 1 {
            return Err(invalid("row count must be at least 1"));
        }
        let narrow = |value: i64| u32::try_from(value).map_err(|_| invalid("value exceeds grid range"));
        let pos = Self {
            x: narrow(x)?,
            y: narrow(y)?,
            column_count: narrow(column_count)?,
            row_count: narrow(row_count)?,
        };
        if pos.x.checked_add(pos.column_count).is_none() || pos.y.checked_add(pos.row_count).is_none()
        {
            return Err(invalid("tile extends past the addressable grid"));
        }
        Ok(pos)
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn right_edge(&self) -> u32 {
        self.x + self.column_count
    }

    pub fn bottom_edge(&self) -> u32 {
        self.y + self.row_count
    }

    /// Same span, moved to column `x`.
    pub fn with_x(&self, x: u32) -> Result<Self, LayoutError> {
        Self::new(x.into(), self.y.into(), self.column_count.into(), self.row_count.into())
    }

    /// Same span, moved to row `y`.
    pub fn with_y(&self, y: u32) -> Result<Self, LayoutError> {
        Self::new(self.x.into(), y.into(), self.column_count.into(), self.row_count.into())
    }

    pub fn overlaps(&self, other: &TilePosition) -> bool {
        self.x < other.right_edge()
            && other.x < self.right_edge()
            && self.y < other.bottom_edge()
            && other.y < self.bottom_edge()
    }

    pub fn fits_within(&self, total_columns: u32) -> bool {
        self.right_edge() <= total_columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_offsets() {
        let err = TilePosition::new(-1, 0, 1, 1).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidPosition { x: -1, .. }));
        assert!(TilePosition::new(0, -3, 1, 1).is_err());
    }

    #[test]
    fn rejects_empty_spans() {
        assert!(TilePosition::new(0, 0, 0, 1).is_err());
        assert!(TilePosition::new(0, 0, 1, 0).is_err());
    }

    #[test]
    fn accepts_unit_tile() {
        let pos = TilePosition::new(0, 0, 1, 1).unwrap();
        assert_eq!(pos.right_edge(), 1);
        assert_eq!(pos.bottom_edge(), 1);
    }

    #[test]
    fn overlap_is_symmetric_and_edge_exclusive() {
        let a = TilePosition::new(0, 0, 4, 2).unwrap();
        let b = TilePosition::new(3, 1, 4, 2).unwrap();
        let touching = TilePosition::new(4, 0, 2, 2).unwrap();
        let below = TilePosition::new(0, 2, 4, 1).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&touching));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn with_x_keeps_span() {
        let pos = TilePosition::new(2, 5, 3, 2).unwrap();
        let moved = pos.with_x(7).unwrap();
        assert_eq!(moved.x(), 7);
        assert_eq!(moved.y(), 5);
        assert_eq!(moved.column_count(), 3);
        assert_eq!(moved.row_count(), 2);
        assert!(!moved.fits_within(9));
        assert!(moved.fits_within(10));
    }

    #[test]
    fn deserializes_with_default_row_count() {
        let pos: TilePosition = serde_json::from_str(r#"{"x":1,"columnCount":2}"#).unwrap();
        assert_eq!(pos, TilePosition::new(1, 0, 2, 1).unwrap());
    }

    #[test]
    fn deserialization_validates() {
        let result: Result<TilePosition, _> =
            serde_json::from_str(r#"{"x":-2,"y":0,"columnCount":2,"rowCount":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let pos = TilePosition::new(1, 2, 3, 4).unwrap();
        let json = serde_json::to_value(pos).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"x": 1, "y": 2, "columnCount": 3, "rowCount": 4})
        );
    }
}
