use glam::Vec2;
use log::{info, warn};

use crate::input::{InputEvent, MouseButton};
use crate::item::{EffectTarget, ItemCatalog};
use crate::persistence::{SaveError, SaveManager, SaveResult};
use crate::ui::draw::{DrawList, Rect};
use crate::ui::split_popup::{PopupAction, SplitPopup};
use crate::ui::style::UiStyle;
use crate::ui::tooltip::Tooltip;

use super::grid::Grid;
use super::shop::ShopGrid;
use super::stack::Stack;
use super::wallet::Wallet;

/// Handle to a grid registered with the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridId(usize);

/// Which top-level view is currently open. Single source of truth: the plain
/// inventory view and the trade view can never be open at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Closed,
    Inventory,
    Trade,
}

#[derive(Debug)]
enum Registered {
    Player(Grid),
    Shop(ShopGrid),
}

impl Registered {
    fn bounds(&self) -> Rect {
        match self {
            Registered::Player(grid) => grid.bounds(),
            Registered::Shop(shop) => shop.bounds(),
        }
    }

    fn as_grid(&self) -> &Grid {
        match self {
            Registered::Player(grid) => grid,
            Registered::Shop(shop) => shop.grid(),
        }
    }
}

/// Central arbiter for all inventory interaction.
///
/// Owns the one cursor carry, the wallet, the set of visible grids, the one
/// active split popup and the tooltip. Carry and wallet are mutated only from
/// the handlers here: exactly one carry exists at a time, and money moves
/// only through a buy or sell transaction.
#[derive(Debug)]
pub struct InventoryManager {
    style: UiStyle,
    grids: Vec<Registered>,
    visible: Vec<GridId>,
    carry: Option<Stack>,
    wallet: Wallet,
    view: ViewState,
    popup: Option<(GridId, SplitPopup)>,
    tooltip: Tooltip,
    pointer: Vec2,
    bag: Option<GridId>,
    equipment: Option<GridId>,
    saved_bag_origin: Option<Vec2>,
}

impl InventoryManager {
    pub fn new(style: UiStyle, starting_money: i64) -> Self {
        Self {
            style,
            grids: Vec::new(),
            visible: Vec::new(),
            carry: None,
            wallet: Wallet::new(starting_money),
            view: ViewState::default(),
            popup: None,
            tooltip: Tooltip::new(),
            pointer: Vec2::ZERO,
            bag: None,
            equipment: None,
            saved_bag_origin: None,
        }
    }

    pub fn style(&self) -> &UiStyle {
        &self.style
    }

    pub fn register_grid(&mut self, grid: Grid) -> GridId {
        self.grids.push(Registered::Player(grid));
        GridId(self.grids.len() - 1)
    }

    pub fn register_shop(&mut self, shop: ShopGrid) -> GridId {
        self.grids.push(Registered::Shop(shop));
        GridId(self.grids.len() - 1)
    }

    /// Name the bag and equipment grids used by the toggle key, the money
    /// readout and the save contract
    pub fn set_player_grids(&mut self, bag: GridId, equipment: GridId) {
        self.bag = Some(bag);
        self.equipment = Some(equipment);
    }

    pub fn grid(&self, id: GridId) -> Option<&Grid> {
        self.grids.get(id.0).map(Registered::as_grid)
    }

    /// Mutable access to a player grid (shops are not mutated from outside)
    pub fn grid_mut(&mut self, id: GridId) -> Option<&mut Grid> {
        match self.grids.get_mut(id.0) {
            Some(Registered::Player(grid)) => Some(grid),
            _ => None,
        }
    }

    pub fn shop(&self, id: GridId) -> Option<&ShopGrid> {
        match self.grids.get(id.0) {
            Some(Registered::Shop(shop)) => Some(shop),
            _ => None,
        }
    }

    pub fn carry(&self) -> Option<&Stack> {
        self.carry.as_ref()
    }

    pub fn wallet(&self) -> Wallet {
        self.wallet
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn is_open(&self) -> bool {
        self.view != ViewState::Closed
    }

    pub fn visible_grids(&self) -> &[GridId] {
        &self.visible
    }

    pub fn has_popup(&self) -> bool {
        self.popup.is_some()
    }

    /// The active split popup, if any (frontends may hit-test against it)
    pub fn popup(&self) -> Option<&SplitPopup> {
        self.popup.as_ref().map(|(_, popup)| popup)
    }

    /// Open or close the plain inventory view (bag + equipment). Calling it
    /// twice restores the visible list and the open flag exactly. Refused
    /// while a trade is running.
    pub fn toggle_inventory(&mut self, bag: GridId, equipment: GridId) {
        match self.view {
            ViewState::Trade => {
                warn!("ignoring inventory toggle during trade");
            }
            ViewState::Inventory => {
                self.visible.retain(|&id| id != bag && id != equipment);
                self.view = ViewState::Closed;
                self.popup = None;
                info!("inventory closed");
            }
            ViewState::Closed => {
                self.visible.push(bag);
                self.visible.push(equipment);
                self.view = ViewState::Inventory;
                info!("inventory opened");
            }
        }
    }

    /// Open or close the trade view (bag + shop). An open inventory view is
    /// closed first so the two views never coexist. While trading, the bag is
    /// relocated next to the shop; its origin is restored on close.
    pub fn toggle_trade(&mut self, bag: GridId, shop: GridId) {
        match self.view {
            ViewState::Trade => {
                if let Some(origin) = self.saved_bag_origin.take() {
                    if let Some(grid) = self.grid_mut(bag) {
                        grid.set_origin(origin);
                    }
                }
                self.visible.clear();
                self.view = ViewState::Closed;
                self.popup = None;
                info!("trade closed");
            }
            view => {
                if view == ViewState::Inventory {
                    self.visible.clear();
                    self.popup = None;
                }
                let trade_player_origin = self.style.trade_player_origin;
                let trade_shop_origin = self.style.trade_shop_origin;

                self.saved_bag_origin = self.grid(bag).map(|grid| grid.origin());
                if let Some(grid) = self.grid_mut(bag) {
                    grid.set_origin(trade_player_origin);
                }
                if let Some(Registered::Shop(shop_grid)) = self.grids.get_mut(shop.0) {
                    shop_grid.set_origin(trade_shop_origin);
                } else {
                    warn!("toggle_trade called with a non-shop grid");
                }
                self.visible.push(bag);
                self.visible.push(shop);
                self.view = ViewState::Trade;
                info!("trade opened");
            }
        }
    }

    /// Feed one input event through the arbitration rules: an active popup
    /// captures everything; otherwise the first visible grid whose bounds
    /// contain the pointer claims the click.
    pub fn route_event(&mut self, event: InputEvent) {
        if let InputEvent::PointerMoved(position) = event {
            self.pointer = position;
        }

        if self.popup.is_some() {
            self.route_to_popup(event);
            return;
        }

        match event {
            InputEvent::ButtonPressed { button, position } => {
                self.route_click(button, position);
            }
            InputEvent::ToggleInventory => {
                if let (Some(bag), Some(equipment)) = (self.bag, self.equipment) {
                    self.toggle_inventory(bag, equipment);
                } else {
                    warn!("inventory toggle before player grids were registered");
                }
            }
            _ => {}
        }
    }

    fn route_to_popup(&mut self, event: InputEvent) {
        let Some((grid_id, popup)) = self.popup.as_mut() else {
            return;
        };
        let grid_id = *grid_id;
        let action = popup.handle_event(&event);
        let (col, row) = popup.source_slot();

        match action {
            PopupAction::None => {}
            PopupAction::Dismissed => {
                self.popup = None;
            }
            PopupAction::Confirmed { take } => {
                self.popup = None;
                match self.grids.get_mut(grid_id.0) {
                    Some(Registered::Player(grid)) => {
                        // the popup only opens while the carry is empty
                        self.carry = grid.split_off(col, row, take);
                        if let Some(stack) = &self.carry {
                            info!("split {}x '{}' onto cursor", stack.count(), stack.id());
                        }
                    }
                    _ => warn!("split popup pointed at a missing grid"),
                }
            }
        }
    }

    fn route_click(&mut self, button: MouseButton, position: Vec2) {
        let visible = self.visible.clone();
        for id in visible {
            let Some(registered) = self.grids.get(id.0) else {
                continue;
            };
            if !registered.bounds().contains(position) {
                continue;
            }

            match self.grids.get_mut(id.0) {
                Some(Registered::Player(grid)) => match button {
                    MouseButton::Left => {
                        if let Some((col, row)) = grid.slot_at(position) {
                            grid.left_click(col, row, &mut self.carry);
                        }
                    }
                    MouseButton::Right => {
                        if let Some((col, row)) = grid.slot_at(position) {
                            if grid.can_split(col, row, &self.carry) {
                                let total = grid
                                    .stack_at(col, row)
                                    .map(|stack| stack.count())
                                    .unwrap_or(0);
                                let anchor = grid.slot_rect(col, row);
                                self.popup = Some((
                                    id,
                                    SplitPopup::open((col, row), total, anchor, &self.style),
                                ));
                            }
                        }
                    }
                    MouseButton::Middle => {}
                },
                Some(Registered::Shop(shop)) => {
                    if button == MouseButton::Left {
                        if self.carry.is_some() {
                            shop.sell(&mut self.wallet, &mut self.carry);
                        } else {
                            shop.buy(position, &mut self.wallet, &mut self.carry);
                        }
                    }
                }
                None => {}
            }
            return;
        }
    }

    /// Per-frame bookkeeping: tooltip target resolution and its hover timer.
    /// Tooltips only show while nothing is carried.
    pub fn update(&mut self, dt: f32) {
        if self.carry.is_some() || self.popup.is_some() {
            self.tooltip.update_target(None);
            return;
        }

        let mut target = None;
        for &id in &self.visible {
            let Some(registered) = self.grids.get(id.0) else {
                continue;
            };
            let grid = registered.as_grid();
            if let Some((col, row)) = grid.slot_at(self.pointer) {
                if let Some(stack) = grid.stack_at(col, row) {
                    target = Some((grid.slot_rect(col, row), stack.item().tooltip_text()));
                    break;
                }
            }
        }
        self.tooltip.update_target(target);
        self.tooltip.update(dt, self.pointer, &self.style);
    }

    pub fn tooltip_visible(&self) -> bool {
        self.tooltip.is_active()
    }

    /// Effective attack damage: base plus the damage of every occupied
    /// equipment slot, recomputed from current contents on each call
    pub fn effective_attack_damage(&self, base_damage: i32, equipment: GridId) -> i32 {
        let Some(grid) = self.grid(equipment) else {
            return base_damage;
        };
        base_damage
            + grid
                .occupied()
                .map(|(_, stack)| stack.item().attack_damage())
                .sum::<i32>()
    }

    /// Use the item in a slot on a target (eat, drink, ...). Consumes one
    /// unit when the item reports it was consumed.
    pub fn use_item(
        &mut self,
        id: GridId,
        col: usize,
        row: usize,
        target: &mut dyn EffectTarget,
    ) -> bool {
        let Some(grid) = self.grid_mut(id) else {
            return false;
        };
        let Some(stack) = grid.stack_at(col, row) else {
            return false;
        };
        let item = std::sync::Arc::clone(stack.item());
        if !item.use_on(target) {
            return false;
        }
        grid.consume_one(col, row);
        info!("used '{}'", item.id);
        true
    }

    /// Snapshot wallet and player grids into a save slot
    pub fn save_to(&self, saves: &SaveManager, slot: &str) -> SaveResult<()> {
        let (bag, equipment) = self.player_grids()?;
        saves.save_game(slot, self.wallet, bag, equipment)
    }

    /// Restore wallet and player grids from a save slot
    pub fn load_from(
        &mut self,
        saves: &SaveManager,
        slot: &str,
        catalog: &ItemCatalog,
    ) -> SaveResult<()> {
        let state = saves.load_game(slot)?;
        let (bag_id, equipment_id) = (self.bag, self.equipment);
        let bag_id = bag_id.ok_or_else(|| SaveError::Format("player grids not registered".into()))?;
        let equipment_id =
            equipment_id.ok_or_else(|| SaveError::Format("player grids not registered".into()))?;

        self.grid_mut(bag_id)
            .ok_or_else(|| SaveError::Format("bag grid missing".into()))?
            .restore(&state.inventory, catalog)?;
        self.grid_mut(equipment_id)
            .ok_or_else(|| SaveError::Format("equipment grid missing".into()))?
            .restore(&state.equipment, catalog)?;
        self.wallet = state.money;
        self.carry = None;
        Ok(())
    }

    fn player_grids(&self) -> SaveResult<(&Grid, &Grid)> {
        let missing = || SaveError::Format("player grids not registered".into());
        let bag = self.bag.and_then(|id| self.grid(id)).ok_or_else(missing)?;
        let equipment = self
            .equipment
            .and_then(|id| self.grid(id))
            .ok_or_else(missing)?;
        Ok((bag, equipment))
    }

    /// Emit the whole inventory UI for this frame: visible grids, money
    /// readout, the carried stack at the pointer, tooltip, popup on top
    pub fn draw(&self, list: &mut DrawList) {
        let style = &self.style;

        for &id in &self.visible {
            match self.grids.get(id.0) {
                Some(Registered::Player(grid)) => {
                    let bounds = grid.bounds();
                    list.draw_rect(
                        Rect::new(
                            bounds.x - style.panel_padding,
                            bounds.y - style.panel_padding,
                            bounds.width + style.panel_padding * 2.0 + style.slot_gap,
                            bounds.height + style.panel_padding * 2.0 + style.slot_gap,
                        ),
                        style.panel_background,
                    );
                    grid.draw(list, style);

                    if self.bag == Some(id) {
                        list.draw_text(
                            &format!("Money: {}", self.wallet.balance()),
                            bounds.x,
                            bounds.y - style.panel_padding - style.money_font_size,
                            style.money_font_size,
                            style.money_font_color,
                        );
                    }
                }
                Some(Registered::Shop(shop)) => shop.draw(list, style),
                None => {}
            }
        }

        if let Some(stack) = &self.carry {
            let half = style.slot_size / 2.0;
            let rect = Rect::new(
                self.pointer.x - half,
                self.pointer.y - half,
                style.slot_size,
                style.slot_size,
            );
            list.draw_sprite(&stack.item().icon, rect);
            if stack.count() > 1 {
                list.draw_text(
                    &stack.count().to_string(),
                    self.pointer.x + half - 20.0,
                    self.pointer.y + half - 20.0,
                    style.count_font_size,
                    style.count_font_color,
                );
            }
        }

        self.tooltip.draw(list, &style.tooltip);

        if let Some((_, popup)) = &self.popup {
            popup.draw(list, style);
        }
    }
}
