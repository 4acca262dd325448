/// Headless demo session for the inventory core.
///
/// Drives a scripted sequence of pointer events through the manager the same
/// way a windowed frontend would, narrating the results through the logger.
use anyhow::Result;
use glam::Vec2;

use loot_engine::{
    DrawList, Grid, GridId, InputEvent, InventoryManager, ItemCatalog, MouseButton, ShopGrid,
    Stack, UiStyle,
};

fn slot_center(manager: &InventoryManager, id: GridId, col: usize, row: usize) -> Vec2 {
    let rect = manager
        .grid(id)
        .expect("grid is registered")
        .slot_rect(col, row);
    Vec2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

fn click(manager: &mut InventoryManager, button: MouseButton, position: Vec2) {
    manager.route_event(InputEvent::PointerMoved(position));
    manager.route_event(InputEvent::ButtonPressed { button, position });
    manager.route_event(InputEvent::ButtonReleased { button, position });
}

fn main() -> Result<()> {
    env_logger::init();

    let style = UiStyle::default();
    let catalog = ItemCatalog::with_default_items();

    let mut bag = Grid::new(8, 4, style.bag_origin, &style);
    bag.place(
        0,
        0,
        Stack::new(catalog.create_item("apple")?, 10).expect("count > 0"),
    );
    let equipment = Grid::new(2, 4, style.equipment_origin, &style);
    let shop = ShopGrid::from_items(
        vec![
            catalog.create_item("dull_sword")?,
            catalog.create_item("apple")?,
            catalog.create_item("large_health_potion")?,
        ],
        style.trade_shop_origin,
        &style,
    );

    let mut manager = InventoryManager::new(style, 100);
    let bag_id = manager.register_grid(bag);
    let equipment_id = manager.register_grid(equipment);
    let shop_id = manager.register_shop(shop);
    manager.set_player_grids(bag_id, equipment_id);

    // open the bag and move the apples one slot over
    manager.route_event(InputEvent::ToggleInventory);
    let pos = slot_center(&manager, bag_id, 0, 0);
    click(&mut manager, MouseButton::Left, pos);
    let pos = slot_center(&manager, bag_id, 2, 1);
    click(&mut manager, MouseButton::Left, pos);

    // right-click opens the split popup; a click far away dismisses it
    let pos = slot_center(&manager, bag_id, 2, 1);
    click(&mut manager, MouseButton::Right, pos);
    log::info!("split popup open: {}", manager.has_popup());
    click(&mut manager, MouseButton::Left, Vec2::new(5.0, 5.0));
    log::info!("split popup after outside click: {}", manager.has_popup());

    // pick the apples back up and take them to the shop
    let pos = slot_center(&manager, bag_id, 2, 1);
    click(&mut manager, MouseButton::Left, pos);
    manager.toggle_trade(bag_id, shop_id);
    let pos = slot_center(&manager, shop_id, 3, 3);
    click(&mut manager, MouseButton::Left, pos);
    log::info!("after selling the apples: money {}", manager.wallet().balance());

    // buy a sword and stash it in the bag
    let pos = slot_center(&manager, shop_id, 0, 0);
    click(&mut manager, MouseButton::Left, pos);
    log::info!(
        "after buying: money {}, carrying {:?}",
        manager.wallet().balance(),
        manager.carry().map(|stack| stack.id().to_string())
    );
    let pos = slot_center(&manager, bag_id, 4, 0);
    click(&mut manager, MouseButton::Left, pos);
    manager.toggle_trade(bag_id, shop_id);

    // equip the sword and report effective damage
    manager.route_event(InputEvent::ToggleInventory);
    let pos = slot_center(&manager, bag_id, 4, 0);
    click(&mut manager, MouseButton::Left, pos);
    let pos = slot_center(&manager, equipment_id, 0, 0);
    click(&mut manager, MouseButton::Left, pos);
    log::info!(
        "effective attack damage: {}",
        manager.effective_attack_damage(1, equipment_id)
    );

    // render one frame's worth of draw directives
    manager.update(1.0 / 60.0);
    let mut frame = DrawList::new();
    manager.draw(&mut frame);
    log::info!("frame emitted {} draw commands", frame.len());

    Ok(())
}
