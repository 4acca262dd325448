use glam::Vec2;
use log::warn;

use crate::item::ItemCatalog;
use crate::persistence::{GridSave, SaveError, SlotSave};
use crate::ui::draw::{DrawList, Rect};
use crate::ui::style::UiStyle;

use super::stack::Stack;

/// A 2D grid of item slots with screen-space layout.
///
/// Slots are indexed `[column][row]`. The layout fields exist only to map a
/// pointer position to a slot index and to emit draw commands; they carry no
/// interaction state of their own.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: usize,
    rows: usize,
    slots: Vec<Vec<Option<Stack>>>,
    origin: Vec2,
    cell_size: f32,
    cell_gap: f32,
}

impl Grid {
    pub fn new(columns: usize, rows: usize, origin: Vec2, style: &UiStyle) -> Self {
        Self {
            columns,
            rows,
            slots: vec![vec![None; rows]; columns],
            origin,
            cell_size: style.slot_size,
            cell_gap: style.slot_gap,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    fn pitch(&self) -> f32 {
        self.cell_size + self.cell_gap
    }

    /// Bounding rectangle used for pointer claims (half-open, so a pointer
    /// exactly on the far edge is outside)
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.pitch() * self.columns as f32,
            self.pitch() * self.rows as f32,
        )
    }

    /// Map a pointer position to a slot index. Pure geometry: never panics,
    /// returns `None` for anything outside the grid.
    pub fn slot_at(&self, pointer: Vec2) -> Option<(usize, usize)> {
        if !self.bounds().contains(pointer) {
            return None;
        }
        let rel = pointer - self.origin;
        let col = (rel.x / self.pitch()) as usize;
        let row = (rel.y / self.pitch()) as usize;
        if col >= self.columns || row >= self.rows {
            return None;
        }
        Some((col, row))
    }

    /// Screen rectangle of one cell (used for tooltip and popup anchoring)
    pub fn slot_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(
            self.origin.x + self.pitch() * col as f32 + self.cell_gap,
            self.origin.y + self.pitch() * row as f32 + self.cell_gap,
            self.cell_size,
            self.cell_size,
        )
    }

    pub fn stack_at(&self, col: usize, row: usize) -> Option<&Stack> {
        self.slots.get(col)?.get(row)?.as_ref()
    }

    /// Remove and return the stack in a slot
    pub fn take(&mut self, col: usize, row: usize) -> Option<Stack> {
        self.slots.get_mut(col)?.get_mut(row)?.take()
    }

    /// Put a stack into a slot, returning whatever was there before
    pub fn place(&mut self, col: usize, row: usize, stack: Stack) -> Option<Stack> {
        match self.slots.get_mut(col).and_then(|c| c.get_mut(row)) {
            Some(slot) => slot.replace(stack),
            None => {
                warn!("place into out-of-range slot ({}, {})", col, row);
                Some(stack)
            }
        }
    }

    /// Add a stack wherever it fits: merge into matching stacks first, then
    /// the first empty slot. Returns what did not fit.
    pub fn insert(&mut self, stack: Stack) -> Option<Stack> {
        let mut remaining = stack;
        for col in &mut self.slots {
            for slot in col.iter_mut() {
                if let Some(existing) = slot {
                    if existing.same_item(&remaining) {
                        let leftover = existing.absorb(remaining.count());
                        match remaining.with_count(leftover) {
                            Some(rest) => remaining = rest,
                            None => return None,
                        }
                    }
                }
            }
        }
        for col in &mut self.slots {
            for slot in col.iter_mut() {
                if slot.is_none() {
                    *slot = Some(remaining);
                    return None;
                }
            }
        }
        Some(remaining)
    }

    /// Apply one left click against the cursor carry.
    ///
    /// carry + same item  => merge into the slot, capped at max_stack, the
    ///                       remainder stays on the cursor
    /// carry + other item => swap
    /// carry + empty slot => place
    /// no carry + stack   => pick up
    /// no carry + empty   => nothing
    pub fn left_click(&mut self, col: usize, row: usize, carry: &mut Option<Stack>) {
        if col >= self.columns || row >= self.rows {
            return;
        }
        match (carry.take(), self.slots[col][row].take()) {
            (Some(held), Some(mut in_slot)) if held.same_item(&in_slot) => {
                let leftover = in_slot.absorb(held.count());
                self.slots[col][row] = Some(in_slot);
                *carry = held.with_count(leftover);
            }
            (Some(held), Some(in_slot)) => {
                self.slots[col][row] = Some(held);
                *carry = Some(in_slot);
            }
            (Some(held), None) => {
                self.slots[col][row] = Some(held);
            }
            (None, in_slot) => {
                *carry = in_slot;
            }
        }
    }

    /// Whether a right click on this slot may open the split popup
    pub fn can_split(&self, col: usize, row: usize, carry: &Option<Stack>) -> bool {
        carry.is_none()
            && self
                .stack_at(col, row)
                .map_or(false, |stack| stack.count() > 1)
    }

    /// Peel `take` items off a slot. Taking everything empties the slot;
    /// taking nothing returns `None` and changes nothing.
    pub fn split_off(&mut self, col: usize, row: usize, take: u32) -> Option<Stack> {
        if take == 0 {
            return None;
        }
        let slot = self.slots.get_mut(col)?.get_mut(row)?;
        let stack = slot.as_mut()?;
        if take >= stack.count() {
            return slot.take();
        }
        stack.shrink(take);
        slot.as_ref().and_then(|s| s.with_count(take))
    }

    /// Consume one item from a slot (e.g. eating a consumable), removing the
    /// stack when it runs out. Returns the item consumed.
    pub fn consume_one(&mut self, col: usize, row: usize) -> Option<std::sync::Arc<crate::item::Item>> {
        let slot = self.slots.get_mut(col)?.get_mut(row)?;
        let stack = slot.as_mut()?;
        let item = std::sync::Arc::clone(stack.item());
        if stack.count() == 1 {
            *slot = None;
        } else {
            stack.shrink(1);
        }
        Some(item)
    }

    /// Iterate occupied slots in column-major order
    pub fn occupied(&self) -> impl Iterator<Item = ((usize, usize), &Stack)> {
        self.slots.iter().enumerate().flat_map(|(col, column)| {
            column
                .iter()
                .enumerate()
                .filter_map(move |(row, slot)| slot.as_ref().map(|stack| ((col, row), stack)))
        })
    }

    /// Total number of items of one id held in this grid
    pub fn total_count(&self, id: &str) -> u32 {
        self.occupied()
            .filter(|(_, stack)| stack.id() == id)
            .map(|(_, stack)| stack.count())
            .sum()
    }

    /// Total number of items across all slots
    pub fn total_items(&self) -> u32 {
        self.occupied().map(|(_, stack)| stack.count()).sum()
    }

    /// Emit the grid's slots, items and count labels
    pub fn draw(&self, list: &mut DrawList, style: &UiStyle) {
        list.draw_rect(
            Rect::new(
                self.origin.x,
                self.origin.y,
                self.pitch() * self.columns as f32 + self.cell_gap,
                self.pitch() * self.rows as f32 + self.cell_gap,
            ),
            style.slot_border_color,
        );

        for col in 0..self.columns {
            for row in 0..self.rows {
                let rect = self.slot_rect(col, row);
                list.draw_rect(rect, style.slot_color);

                if let Some(stack) = self.stack_at(col, row) {
                    list.draw_sprite(&stack.item().icon, rect);
                    if stack.count() > 1 {
                        list.draw_text(
                            &stack.count().to_string(),
                            rect.x + self.cell_size - 20.0,
                            rect.y + self.cell_size - 20.0,
                            style.count_font_size,
                            style.count_font_color,
                        );
                    }
                }
            }
        }
    }

    /// Serialize as `[column][row]` of optional `{id, count}` entries
    pub fn to_save(&self) -> GridSave {
        self.slots
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|slot| {
                        slot.as_ref().map(|stack| SlotSave {
                            id: stack.id().to_string(),
                            count: stack.count(),
                        })
                    })
                    .collect()
            })
            .collect()
    }

    /// Restore slot contents from saved data, resolving every id through the
    /// catalog. The saved shape must match this grid's shape.
    pub fn restore(&mut self, save: &GridSave, catalog: &ItemCatalog) -> Result<(), SaveError> {
        if save.len() != self.columns || save.iter().any(|column| column.len() != self.rows) {
            return Err(SaveError::Format(format!(
                "grid shape mismatch: expected {}x{}",
                self.columns, self.rows
            )));
        }
        for (col, column) in save.iter().enumerate() {
            for (row, entry) in column.iter().enumerate() {
                self.slots[col][row] = match entry {
                    Some(slot_save) => {
                        let item = catalog.create_item(&slot_save.id)?;
                        Some(Stack::new(item, slot_save.count).ok_or_else(|| {
                            SaveError::Format(format!(
                                "slot ({}, {}) has zero count for '{}'",
                                col, row, slot_save.id
                            ))
                        })?)
                    }
                    None => None,
                };
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCatalog;

    fn test_grid() -> (Grid, ItemCatalog) {
        let style = UiStyle::default();
        let grid = Grid::new(8, 4, Vec2::new(100.0, 100.0), &style);
        (grid, ItemCatalog::with_default_items())
    }

    fn apples(catalog: &ItemCatalog, count: u32) -> Stack {
        Stack::new(catalog.create_item("apple").unwrap(), count).unwrap()
    }

    #[test]
    fn test_slot_at_maps_cells() {
        let (grid, _) = test_grid();
        // pitch is 73; the center of cell (2, 1)
        assert_eq!(grid.slot_at(Vec2::new(100.0 + 73.0 * 2.5, 100.0 + 73.0 * 1.5)), Some((2, 1)));
        assert_eq!(grid.slot_at(Vec2::new(100.0, 100.0)), Some((0, 0)));
    }

    #[test]
    fn test_slot_at_edge_pixel_is_outside() {
        let (grid, _) = test_grid();
        let bounds = grid.bounds();
        assert_eq!(grid.slot_at(Vec2::new(bounds.right(), 120.0)), None);
        assert_eq!(grid.slot_at(Vec2::new(120.0, bounds.bottom())), None);
        assert_eq!(grid.slot_at(Vec2::new(99.9, 120.0)), None);
        assert_eq!(grid.slot_at(Vec2::new(-1e9, -1e9)), None);
        assert_eq!(grid.slot_at(Vec2::new(1e9, 1e9)), None);
    }

    #[test]
    fn test_pick_up_clears_slot() {
        let (mut grid, catalog) = test_grid();
        grid.place(0, 0, apples(&catalog, 5));
        let mut carry = None;

        grid.left_click(0, 0, &mut carry);
        assert_eq!(carry.as_ref().map(|s| s.count()), Some(5));
        assert!(grid.stack_at(0, 0).is_none());
    }

    #[test]
    fn test_place_into_empty_slot() {
        let (mut grid, catalog) = test_grid();
        let mut carry = Some(apples(&catalog, 5));

        grid.left_click(2, 1, &mut carry);
        assert!(carry.is_none());
        assert_eq!(grid.stack_at(2, 1).map(|s| s.count()), Some(5));
    }

    #[test]
    fn test_merge_same_item() {
        let (mut grid, catalog) = test_grid();
        grid.place(1, 1, apples(&catalog, 10));
        let mut carry = Some(apples(&catalog, 3));

        grid.left_click(1, 1, &mut carry);
        assert!(carry.is_none());
        assert_eq!(grid.stack_at(1, 1).map(|s| s.count()), Some(13));
    }

    #[test]
    fn test_merge_caps_and_keeps_remainder_on_cursor() {
        let (mut grid, catalog) = test_grid();
        grid.place(1, 1, apples(&catalog, 40));
        let mut carry = Some(apples(&catalog, 40));

        grid.left_click(1, 1, &mut carry);
        assert_eq!(grid.stack_at(1, 1).map(|s| s.count()), Some(64));
        assert_eq!(carry.map(|s| s.count()), Some(16));
    }

    #[test]
    fn test_swap_different_items() {
        let (mut grid, catalog) = test_grid();
        let sword = Stack::single(catalog.create_item("dull_sword").unwrap());
        grid.place(0, 0, sword);
        let mut carry = Some(apples(&catalog, 5));

        grid.left_click(0, 0, &mut carry);
        assert_eq!(carry.as_ref().map(|s| s.id().to_string()), Some("dull_sword".into()));
        assert_eq!(grid.stack_at(0, 0).map(|s| s.id().to_string()), Some("apple".into()));
    }

    #[test]
    fn test_click_empty_with_no_carry_is_noop() {
        let (mut grid, _) = test_grid();
        let mut carry = None;
        grid.left_click(3, 3, &mut carry);
        assert!(carry.is_none());
        assert!(grid.stack_at(3, 3).is_none());
    }

    #[test]
    fn test_split_off_partial_and_full() {
        let (mut grid, catalog) = test_grid();
        grid.place(1, 1, apples(&catalog, 10));

        let taken = grid.split_off(1, 1, 4).expect("partial split");
        assert_eq!(taken.count(), 4);
        assert_eq!(grid.stack_at(1, 1).map(|s| s.count()), Some(6));

        let rest = grid.split_off(1, 1, 6).expect("full split");
        assert_eq!(rest.count(), 6);
        assert!(grid.stack_at(1, 1).is_none());
    }

    #[test]
    fn test_can_split_rules() {
        let (mut grid, catalog) = test_grid();
        grid.place(0, 0, apples(&catalog, 2));
        grid.place(0, 1, apples(&catalog, 1));

        assert!(grid.can_split(0, 0, &None));
        assert!(!grid.can_split(0, 1, &None));
        assert!(!grid.can_split(0, 0, &Some(apples(&catalog, 1))));
        assert!(!grid.can_split(5, 0, &None));
    }

    #[test]
    fn test_insert_merges_then_fills_empty() {
        let (mut grid, catalog) = test_grid();
        grid.place(0, 0, apples(&catalog, 60));

        assert!(grid.insert(apples(&catalog, 10)).is_none());
        assert_eq!(grid.stack_at(0, 0).map(|s| s.count()), Some(64));
        // the overflow landed in the first empty slot
        assert_eq!(grid.total_count("apple"), 70);
    }

    #[test]
    fn test_consume_one_removes_empty_stack() {
        let (mut grid, catalog) = test_grid();
        grid.place(0, 0, apples(&catalog, 1));

        let item = grid.consume_one(0, 0).expect("consumed");
        assert_eq!(item.id, "apple");
        assert!(grid.stack_at(0, 0).is_none());
    }
}
