use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;
use log::{debug, info, warn};

use crate::item::Item;
use crate::ui::draw::{DrawList, Rect};
use crate::ui::style::UiStyle;

use super::grid::Grid;
use super::stack::Stack;
use super::wallet::Wallet;

/// Shop grid dimensions, matching the classic 4x4 stall
const SHOP_COLUMNS: usize = 4;
const SHOP_ROWS: usize = 4;

/// A grid of purchasable items with a per-item price table.
///
/// Stock is infinite: buying hands the player a copy and leaves the slot
/// untouched. The backing grid is never structurally mutated by trade.
#[derive(Debug, Clone)]
pub struct ShopGrid {
    grid: Grid,
    prices: HashMap<String, i64>,
}

impl ShopGrid {
    /// Build a shop from `(template, price)` pairs, filled row-major into a
    /// 4x4 grid. Stock beyond 16 entries is dropped with a warning.
    pub fn new(stock: Vec<(Arc<Item>, i64)>, origin: Vec2, style: &UiStyle) -> Self {
        let mut grid = Grid::new(SHOP_COLUMNS, SHOP_ROWS, origin, style);
        let mut prices = HashMap::new();

        for (i, (item, price)) in stock.into_iter().enumerate() {
            let col = i % SHOP_COLUMNS;
            let row = i / SHOP_COLUMNS;
            if row >= SHOP_ROWS {
                warn!("shop stock overflows {}x{} grid, dropping '{}'", SHOP_COLUMNS, SHOP_ROWS, item.id);
                continue;
            }
            prices.insert(item.id.clone(), price);
            grid.place(col, row, Stack::single(item));
        }

        Self { grid, prices }
    }

    /// Build a shop pricing every item at its catalog price
    pub fn from_items(stock: Vec<Arc<Item>>, origin: Vec2, style: &UiStyle) -> Self {
        let stock = stock
            .into_iter()
            .map(|item| {
                let price = item.price;
                (item, price)
            })
            .collect();
        Self::new(stock, origin, style)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.grid.set_origin(origin);
    }

    pub fn bounds(&self) -> Rect {
        self.grid.bounds()
    }

    /// Price for one unit of an item. Items the shop does not know sell for
    /// 0 rather than minting money.
    pub fn price_of(&self, id: &str) -> i64 {
        self.prices.get(id).copied().unwrap_or(0)
    }

    /// Attempt to buy the item under the pointer. The carry must be empty.
    /// Hands out a fresh copy of the template so later mutation of the
    /// player's instance can never touch shop stock. Insufficient funds is a
    /// silent no-op.
    pub fn buy(&self, pointer: Vec2, wallet: &mut Wallet, carry: &mut Option<Stack>) {
        debug_assert!(carry.is_none());
        let Some((col, row)) = self.grid.slot_at(pointer) else {
            return;
        };
        let Some(stack) = self.grid.stack_at(col, row) else {
            return;
        };

        let template = stack.item();
        let price = self.price_of(&template.id);
        if !wallet.can_afford(price) {
            debug!(
                "cannot afford '{}' (price {}, balance {})",
                template.id,
                price,
                wallet.balance()
            );
            return;
        }

        wallet.debit(price);
        let copy = Arc::new(Item::clone(template));
        *carry = Some(Stack::single(copy));
        info!("bought '{}' for {}", template.id, price);
    }

    /// Sell the entire carry. Any click inside the shop's bounds while
    /// holding something sells it, whether or not it lands on a slot.
    pub fn sell(&self, wallet: &mut Wallet, carry: &mut Option<Stack>) {
        let Some(stack) = carry.take() else {
            return;
        };
        let total = self.price_of(stack.id()) * stack.count() as i64;
        wallet.credit(total);
        info!("sold {}x '{}' for {}", stack.count(), stack.id(), total);
    }

    /// Emit the shop panel, its grid, and a price tag per stocked slot
    pub fn draw(&self, list: &mut DrawList, style: &UiStyle) {
        let bounds = self.grid.bounds();
        list.draw_rect(
            Rect::new(
                bounds.x - style.panel_padding,
                bounds.y - style.panel_padding,
                bounds.width + style.panel_padding * 2.0 + style.slot_gap,
                bounds.height + style.panel_padding * 2.0 + style.slot_gap,
            ),
            style.panel_background,
        );

        self.grid.draw(list, style);

        for ((col, row), stack) in self.grid.occupied() {
            let rect = self.grid.slot_rect(col, row);
            list.draw_text(
                &format!("${}", self.price_of(stack.id())),
                rect.x + 5.0,
                rect.bottom() - 20.0,
                style.count_font_size,
                style.price_font_color,
            );
        }
    }
}
