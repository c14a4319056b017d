use serde::Serialize;

use crate::error::LayoutError;
use crate::flow::{grid_bottom, lowest_free_y, next_row_start};
use crate::position::TilePosition;
use crate::tile::TileItemHolder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementStrategy {
    RightOfSource,
    BelowSource,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index in the tile sequence the new tile is inserted at.
    pub index: usize,
    pub position: TilePosition,
    pub strategy: PlacementStrategy,
}

/// Finds free space for a copy of `source` without displacing any tile.
///
/// Candidates are tried in a fixed order: the cells right of the source on
/// its own row, then the first free cells directly below it, then a new row
/// at the bottom of the grid starting at column 0. Every candidate is checked
/// against the committed positions, so the returned position overlaps no
/// existing tile. Ties are settled by sequence order, so identical inputs
/// always produce the same index and position.
pub fn find_best_new_position(
    items: &[TileItemHolder],
    source: &TileItemHolder,
    total_columns: u32,
) -> Result<Placement, LayoutError> {
    let source_index = items
        .iter()
        .position(|item| item.id == source.id)
        .ok_or_else(|| LayoutError::HolderNotFound(source.id.clone()))?;
    let src = items[source_index].position;
    let candidate_x = src.right_edge();
    let is_free = |candidate: &TilePosition| {
        !items.iter().any(|item| item.position.overlaps(candidate))
    };

    let next = items.get(source_index + 1);
    let next_on_same_row = next.filter(|next| src.right_edge() <= next.position.x());
    let max_right = match next_on_same_row {
        Some(next) => next.position.x(),
        None => total_columns,
    };
    let fits_right = candidate_x
        .checked_add(src.column_count())
        .is_some_and(|right| right <= max_right);
    if fits_right {
        let position = src.with_x(candidate_x)?;
        if is_free(&position) {
            let placement = Placement {
                index: source_index + 1,
                position,
                strategy: PlacementStrategy::RightOfSource,
            };
            log_placement(source, &placement);
            return Ok(placement);
        }
    }

    let below_index = match next_row_start(items, source_index) {
        None => Some(items.len()),
        Some(row_start) if candidate_x < items[row_start].position.x() => Some(row_start),
        Some(_) => None,
    };
    let placement = match below_index {
        Some(index) => {
            let placed = items.iter().map(|item| &item.position);
            let y = lowest_free_y(placed, &src, src.bottom_edge());
            Placement {
                index,
                position: src.with_y(y)?,
                strategy: PlacementStrategy::BelowSource,
            }
        }
        None => Placement {
            index: items.len(),
            position: TilePosition::new(
                0,
                grid_bottom(items).into(),
                src.column_count().into(),
                src.row_count().into(),
            )?,
            strategy: PlacementStrategy::Bottom,
        },
    };
    log_placement(source, &placement);
    Ok(placement)
}

fn log_placement(source: &TileItemHolder, placement: &Placement) {
    tracing::debug!(
        source = %source.id,
        index = placement.index,
        x = placement.position.x(),
        y = placement.position.y(),
        strategy = ?placement.strategy,
        "placed tile copy"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::find_overlap;
    use crate::flow::test_support::tile;

    fn with_copy(items: &[TileItemHolder], placement: &Placement) -> Vec<TileItemHolder> {
        let mut out = items.to_vec();
        out.insert(placement.index, tile("copy", 0, 0, 1, 1).with_position(placement.position));
        out
    }

    #[test]
    fn prefers_space_right_of_source() {
        let items = vec![tile("a", 0, 0, 2, 1)];
        let placement = find_best_new_position(&items, &items[0], 12).unwrap();
        assert_eq!(placement.strategy, PlacementStrategy::RightOfSource);
        assert_eq!(placement.index, 1);
        assert_eq!(placement.position, TilePosition::new(2, 0, 2, 1).unwrap());
    }

    #[test]
    fn right_placement_stops_at_next_tile_on_row() {
        let items = vec![tile("a", 0, 0, 4, 1), tile("b", 6, 0, 6, 1)];
        let placement = find_best_new_position(&items, &items[0], 12).unwrap();
        assert_ne!(placement.strategy, PlacementStrategy::RightOfSource);

        let items = vec![tile("a", 0, 0, 3, 1), tile("b", 6, 0, 6, 1)];
        let placement = find_best_new_position(&items, &items[0], 12).unwrap();
        assert_eq!(placement.strategy, PlacementStrategy::RightOfSource);
        assert_eq!(placement.position.x(), 3);
        assert_eq!(placement.index, 1);
    }

    #[test]
    fn flush_right_source_goes_below() {
        let items = vec![tile("a", 10, 0, 2, 1)];
        let placement = find_best_new_position(&items, &items[0], 12).unwrap();
        assert_eq!(placement.strategy, PlacementStrategy::BelowSource);
        assert_eq!(placement.index, 1);
        assert_eq!(placement.position, TilePosition::new(10, 1, 2, 1).unwrap());
    }

    #[test]
    fn below_placement_joins_next_row_when_left_side_is_free() {
        let items = vec![
            tile("a", 0, 0, 6, 2),
            tile("b", 6, 0, 6, 2),
            tile("c", 8, 2, 4, 1),
        ];
        let placement = find_best_new_position(&items, &items[0], 12).unwrap();
        assert_eq!(placement.strategy, PlacementStrategy::BelowSource);
        assert_eq!(placement.index, 2);
        assert_eq!(placement.position, TilePosition::new(0, 2, 6, 2).unwrap());
    }

    #[test]
    fn occupied_space_below_falls_back_to_bottom() {
        let items = vec![tile("a", 10, 0, 2, 1), tile("b", 10, 1, 2, 1)];
        let placement = find_best_new_position(&items, &items[0], 12).unwrap();
        assert_eq!(placement.strategy, PlacementStrategy::Bottom);
        assert_eq!(placement.index, 2);
        assert_eq!(placement.position, TilePosition::new(0, 2, 2, 1).unwrap());
    }

    #[test]
    fn full_width_source_never_goes_right() {
        let items = vec![tile("a", 0, 0, 12, 2), tile("b", 0, 2, 12, 1)];
        let placement = find_best_new_position(&items, &items[0], 12).unwrap();
        assert_eq!(placement.strategy, PlacementStrategy::Bottom);
        assert_eq!(placement.position.y(), 3);
    }

    #[test]
    fn unknown_source_is_rejected() {
        let items = vec![tile("a", 0, 0, 2, 1)];
        let stranger = tile("z", 0, 0, 2, 1);
        let err = find_best_new_position(&items, &stranger, 12).unwrap_err();
        assert_eq!(err, LayoutError::HolderNotFound("z".into()));
    }

    #[test]
    fn placement_is_deterministic() {
        let items = vec![
            tile("a", 0, 0, 4, 1),
            tile("b", 4, 0, 8, 1),
            tile("c", 0, 1, 12, 1),
        ];
        let first = find_best_new_position(&items, &items[1], 12).unwrap();
        for _ in 0..10 {
            assert_eq!(find_best_new_position(&items, &items[1], 12).unwrap(), first);
        }
    }

    #[test]
    fn right_candidate_blocked_by_tall_tile_is_skipped() {
        let items = vec![
            tile("x", 0, 0, 2, 1),
            tile("tall", 2, 0, 2, 3),
            tile("src", 0, 1, 2, 1),
        ];
        let placement = find_best_new_position(&items, &items[2], 12).unwrap();
        assert_eq!(placement.strategy, PlacementStrategy::BelowSource);
        assert_eq!(placement.index, 3);
        assert_eq!(placement.position, TilePosition::new(0, 2, 2, 1).unwrap());
        assert_eq!(find_overlap(&with_copy(&items, &placement)), None);
    }

    #[test]
    fn below_placement_skips_occupied_rows() {
        // The blocker comes earlier in the sequence, so no row break follows
        // the source, yet it still occupies the cells below it.
        let items = vec![tile("blocker", 0, 1, 4, 2), tile("src", 0, 0, 8, 1)];
        let placement = find_best_new_position(&items, &items[1], 12).unwrap();
        assert_eq!(placement.strategy, PlacementStrategy::BelowSource);
        assert_eq!(placement.index, 2);
        assert_eq!(placement.position, TilePosition::new(0, 3, 8, 1).unwrap());
        assert_eq!(find_overlap(&with_copy(&items, &placement)), None);
    }

    #[test]
    fn solver_output_never_overlaps_committed_tiles() {
        let layouts = vec![
            vec![tile("a", 0, 0, 2, 3), tile("b", 4, 0, 2, 1), tile("c", 4, 1, 2, 1)],
            vec![tile("a", 0, 5, 2, 1), tile("b", 0, 0, 2, 1)],
            vec![
                tile("a", 0, 0, 6, 2),
                tile("b", 6, 0, 6, 2),
                tile("c", 0, 2, 3, 4),
                tile("d", 8, 2, 4, 1),
            ],
        ];
        for items in layouts {
            assert_eq!(find_overlap(&items), None);
            for source in &items {
                let placement = find_best_new_position(&items, source, 12).unwrap();
                assert!(placement.position.fits_within(12));
                assert_eq!(
                    find_overlap(&with_copy(&items, &placement)),
                    None,
                    "copy of {} at {:?}",
                    source.id,
                    placement.position
                );
            }
        }
    }
}
