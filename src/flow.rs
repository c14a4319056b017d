use crate::error::LayoutError;
use crate::position::TilePosition;
use crate::tile::TileItemHolder;

// A tile that starts left of its predecessor's right edge in the sequence
// begins a new visual row.
pub fn starts_new_row(previous: &TileItemHolder, current: &TileItemHolder) -> bool {
    current.position.x() < previous.position.right_edge()
}

/// Index of the first tile after `after` that begins a new visual row.
pub fn next_row_start(items: &[TileItemHolder], after: usize) -> Option<usize> {
    (after + 1..items.len()).find(|&idx| starts_new_row(&items[idx - 1], &items[idx]))
}

pub fn grid_bottom(items: &[TileItemHolder]) -> u32 {
    items
        .iter()
        .map(|item| item.position.bottom_edge())
        .max()
        .unwrap_or(0)
}

/// Lowest row at or below `from_y` where `block`'s span, kept at its column,
/// overlaps none of `placed`.
pub fn lowest_free_y<'a, I>(placed: I, block: &TilePosition, from_y: u32) -> u32
where
    I: Iterator<Item = &'a TilePosition> + Clone,
{
    let left = block.x();
    let right = block.right_edge();
    let mut y = from_y;
    loop {
        let bottom = y.saturating_add(block.row_count());
        let blocker = placed
            .clone()
            .filter(|p| {
                left < p.right_edge() && p.x() < right && y < p.bottom_edge() && p.y() < bottom
            })
            .map(|p| p.bottom_edge())
            .max();
        match blocker {
            Some(next) => y = next,
            None => return y,
        }
    }
}

/// Settles the tiles around the one at `pinned` after it was moved or resized.
///
/// The pinned tile keeps its position. The others are visited top to bottom
/// and a tile is pushed down only as far as needed to clear the tiles already
/// settled. Tiles never move up or change column, so a tile that collides with
/// nothing keeps its position. Sequence order is preserved.
pub fn reflow(
    items: Vec<TileItemHolder>,
    pinned: usize,
) -> Result<Vec<TileItemHolder>, LayoutError> {
    let mut positions: Vec<TilePosition> = items.iter().map(|item| item.position).collect();
    let mut order: Vec<usize> = (0..items.len()).filter(|&idx| idx != pinned).collect();
    order.sort_by_key(|&idx| (positions[idx].y(), positions[idx].x()));

    let mut settled: Vec<TilePosition> = Vec::with_capacity(items.len());
    settled.extend(positions.get(pinned).copied());
    let mut moved = 0usize;
    for idx in order {
        let position = positions[idx];
        let y = lowest_free_y(settled.iter(), &position, position.y());
        if y != position.y() {
            moved += 1;
            positions[idx] = position.with_y(y)?;
        }
        settled.push(positions[idx]);
    }

    if moved > 0 {
        tracing::trace!(moved, "reflow pushed tiles down");
    }
    Ok(items
        .into_iter()
        .zip(positions)
        .map(|(item, position)| TileItemHolder { position, ..item })
        .collect())
}

pub fn find_overlap(items: &[TileItemHolder]) -> Option<(usize, usize)> {
    for (i, a) in items.iter().enumerate() {
        for (offset, b) in items[i + 1..].iter().enumerate() {
            if a.position.overlaps(&b.position) {
                return Some((i, i + 1 + offset));
            }
        }
    }
    None
}


#[cfg(test)]
mod tests {
    use super::test_support::tile;
    use super::*;

    #[test]
    fn detects_row_breaks_from_sequence_order() {
        let items = vec![
            tile("a", 0, 0, 4, 1),
            tile("b", 4, 0, 4, 1),
            tile("c", 2, 1, 4, 1),
        ];
        assert!(!starts_new_row(&items[0], &items[1]));
        assert!(starts_new_row(&items[1], &items[2]));
        assert_eq!(next_row_start(&items, 0), Some(2));
        assert_eq!(next_row_start(&items, 2), None);
    }

    #[test]
    fn reflow_pushes_only_colliding_tiles() {
        let items = vec![
            tile("a", 0, 0, 4, 3),
            tile("b", 4, 0, 4, 1),
            tile("c", 0, 1, 4, 1),
        ];
        let out = reflow(items, 0).unwrap();
        assert_eq!(out[0].position.y(), 0);
        assert_eq!(out[1].position.y(), 0);
        assert_eq!(out[2].position.y(), 3);
        assert_eq!(find_overlap(&out), None);
    }

    #[test]
    fn reflow_cascades_down_a_column() {
        let items = vec![
            tile("a", 0, 0, 4, 3),
            tile("b", 0, 1, 4, 2),
            tile("c", 0, 3, 4, 1),
            tile("d", 8, 1, 4, 1),
        ];
        let out = reflow(items, 0).unwrap();
        let ys: Vec<u32> = out.iter().map(|item| item.position.y()).collect();
        assert_eq!(ys, vec![0, 3, 5, 1]);
        assert_eq!(find_overlap(&out), None);
    }

    #[test]
    fn reflow_keeps_free_standing_tiles_in_place() {
        let items = vec![
            tile("a", 0, 0, 2, 3),
            tile("b", 4, 0, 2, 1),
            tile("c", 4, 1, 2, 1),
            tile("d", 0, 5, 2, 1),
        ];
        let out = reflow(items.clone(), 1).unwrap();
        assert_eq!(out, items);
    }

    #[test]
    fn reflow_never_moves_tiles_up() {
        let items = vec![tile("a", 0, 5, 2, 1), tile("b", 0, 9, 2, 1)];
        let out = reflow(items, 0).unwrap();
        assert_eq!(out[0].position.y(), 5);
        assert_eq!(out[1].position.y(), 9);
    }

    #[test]
    fn lowest_free_y_skips_past_blockers() {
        let items = vec![tile("a", 0, 0, 4, 2), tile("b", 2, 2, 4, 3), tile("c", 8, 0, 4, 9)];
        let block = TilePosition::new(1, 0, 2, 1).unwrap();
        let placed = items.iter().map(|item| &item.position);
        assert_eq!(lowest_free_y(placed.clone(), &block, 0), 5);
        let narrow = TilePosition::new(6, 0, 2, 4).unwrap();
        assert_eq!(lowest_free_y(placed, &narrow, 0), 0);
    }

    #[test]
    fn grid_bottom_of_empty_sequence_is_zero() {
        assert_eq!(grid_bottom(&[]), 0);
        assert_eq!(grid_bottom(&[tile("a", 0, 2, 1, 3)]), 5);
    }

    #[test]
    fn find_overlap_reports_first_pair() {
        let items = vec![
            tile("a", 0, 0, 4, 2),
            tile("b", 6, 0, 2, 1),
            tile("c", 2, 1, 2, 1),
        ];
        assert_eq!(find_overlap(&items), Some((0, 2)));
    }
}
