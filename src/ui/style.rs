use glam::Vec2;

use super::draw::Color;

/// Tooltip styling and timing
#[derive(Debug, Clone)]
pub struct TooltipStyle {
    pub background: Color,
    pub border: Color,
    pub font_size: f32,
    pub font_color: Color,
    /// Hover time in seconds before the tooltip appears
    pub delay: f32,
    pub padding: f32,
    /// Distance between the pointer and the tooltip box
    pub offset: f32,
}

/// Split popup styling
#[derive(Debug, Clone)]
pub struct PopupStyle {
    pub background: Color,
    pub border: Color,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    /// Gap between the anchor slot and the popup panel
    pub margin: f32,
}

/// All presentation constants for the inventory UI, built once and passed by
/// reference into grids, popups and the manager.
#[derive(Debug, Clone)]
pub struct UiStyle {
    pub screen_width: f32,
    pub screen_height: f32,

    pub slot_size: f32,
    pub slot_gap: f32,
    pub slot_color: Color,
    pub slot_border_color: Color,
    pub panel_background: Color,
    pub panel_padding: f32,

    pub count_font_size: f32,
    pub count_font_color: Color,
    pub price_font_color: Color,
    pub money_font_size: f32,
    pub money_font_color: Color,

    pub tooltip: TooltipStyle,
    pub popup: PopupStyle,

    /// Bag grid origin while the plain inventory view is open
    pub bag_origin: Vec2,
    /// Equipment grid origin while the plain inventory view is open
    pub equipment_origin: Vec2,
    /// Bag grid origin while the trade view is open
    pub trade_player_origin: Vec2,
    /// Shop grid origin while the trade view is open
    pub trade_shop_origin: Vec2,
}

impl UiStyle {
    /// Layout for a given screen size. Anchors follow the original layout:
    /// bag centered in the lower half, equipment to its right, trade view
    /// split left (bag) / right (shop).
    pub fn for_screen(width: f32, height: f32) -> Self {
        let slot_size = 70.0;
        let slot_gap = 3.0;
        let pitch = slot_size + slot_gap;

        let bag_origin = Vec2::new(width / 2.0 - pitch * 4.0, height / 2.0);
        let equipment_origin = Vec2::new(bag_origin.x + pitch * 3.0, bag_origin.y - 310.0);

        Self {
            screen_width: width,
            screen_height: height,
            slot_size,
            slot_gap,
            slot_color: Color::rgb8(216, 223, 203),
            slot_border_color: Color::rgb8(33, 41, 48),
            panel_background: Color::rgb8(109, 125, 123),
            panel_padding: 15.0,
            count_font_size: 15.0,
            count_font_color: Color::BLACK,
            price_font_color: Color::YELLOW,
            money_font_size: 20.0,
            money_font_color: Color::WHITE,
            tooltip: TooltipStyle {
                background: Color::rgb8(50, 50, 50),
                border: Color::rgb8(200, 200, 200),
                font_size: 20.0,
                font_color: Color::WHITE,
                delay: 0.7,
                padding: 8.0,
                offset: 20.0,
            },
            popup: PopupStyle {
                background: Color::rgb8(50, 50, 50),
                border: Color::rgb8(200, 200, 200),
                width: 220.0,
                height: 110.0,
                font_size: 15.0,
                margin: 10.0,
            },
            bag_origin,
            equipment_origin,
            trade_player_origin: Vec2::new(width * 0.25 - pitch * 4.0, height / 2.0),
            trade_shop_origin: Vec2::new(width * 0.75 - pitch * 2.0, height / 2.0 - pitch * 2.0),
        }
    }
}

impl Default for UiStyle {
    fn default() -> Self {
        Self::for_screen(1920.0, 1080.0)
    }
}
