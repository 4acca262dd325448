use glam::Vec2;

use crate::input::{InputEvent, MouseButton};

use super::draw::{DrawList, Rect};
use super::style::UiStyle;

/// Horizontal slider mapping a drag position to a normalized `[0, 1]` value
#[derive(Debug, Clone)]
pub struct Slider {
    track: Rect,
    value: f32,
    dragging: bool,
}

impl Slider {
    pub fn new(track: Rect) -> Self {
        Self {
            track,
            value: 0.0,
            dragging: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn knob_rect(&self) -> Rect {
        let knob_w = 12.0;
        let knob_h = 20.0;
        Rect::new(
            self.track.x + self.value * self.track.width - knob_w / 2.0,
            self.track.y + self.track.height / 2.0 - knob_h / 2.0,
            knob_w,
            knob_h,
        )
    }

    fn set_from_pointer(&mut self, x: f32) {
        let rel = ((x - self.track.x) / self.track.width).clamp(0.0, 1.0);
        self.value = rel;
    }

    /// Begin a drag if the press lands on the knob or the track
    pub fn handle_press(&mut self, position: Vec2) {
        if self.knob_rect().contains(position) || self.track.contains(position) {
            self.dragging = true;
            self.set_from_pointer(position.x);
        }
    }

    pub fn handle_release(&mut self) {
        self.dragging = false;
    }

    /// Update the value while a drag is in progress
    pub fn handle_motion(&mut self, position: Vec2) {
        if self.dragging {
            self.set_from_pointer(position.x);
        }
    }

    pub fn draw(&self, list: &mut DrawList, style: &UiStyle) {
        let mid_y = self.track.y + self.track.height / 2.0;
        list.draw_rect(
            Rect::new(self.track.x, mid_y - 2.0, self.track.width, 4.0),
            style.tooltip.border,
        );
        list.draw_rect(
            Rect::new(self.track.x, mid_y - 2.0, self.value * self.track.width, 4.0),
            style.money_font_color,
        );
        list.draw_rect(self.knob_rect(), style.slot_color);
    }
}

/// What a routed event did to the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    None,
    /// Commit: peel `take` items off the source slot onto the cursor
    Confirmed { take: u32 },
    /// Close without touching anything
    Dismissed,
}

/// The transient "how many to take" popup opened by right-clicking a stack.
///
/// While one is open it captures all input. Nothing is mutated until the
/// confirm button commits; a click outside the panel dismisses it.
#[derive(Debug, Clone)]
pub struct SplitPopup {
    source_slot: (usize, usize),
    total: u32,
    slider: Slider,
    rect: Rect,
}

impl SplitPopup {
    /// Open beside `anchor`, flipping to its other side when the panel would
    /// run off screen.
    pub fn open(source_slot: (usize, usize), total: u32, anchor: Rect, style: &UiStyle) -> Self {
        let popup = &style.popup;
        let mut x = anchor.right() + popup.margin;
        if x + popup.width > style.screen_width {
            x = anchor.x - popup.margin - popup.width;
        }
        let y = anchor
            .y
            .min(style.screen_height - popup.height)
            .max(0.0);

        let rect = Rect::new(x, y, popup.width, popup.height);
        let track = Rect::new(
            rect.x + 16.0,
            rect.y + popup.height * 0.42,
            popup.width - 32.0,
            16.0,
        );

        Self {
            source_slot,
            total,
            slider: Slider::new(track),
            rect,
        }
    }

    pub fn source_slot(&self) -> (usize, usize) {
        self.source_slot
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Amount currently selected by the slider, always within `[1, total]`
    pub fn take(&self) -> u32 {
        let span = self.total.saturating_sub(1);
        let take = 1 + (self.slider.value() * span as f32) as u32;
        take.clamp(1, self.total.max(1))
    }

    /// Slider track in screen space
    pub fn slider_track(&self) -> Rect {
        self.slider.track
    }

    /// Confirm button in screen space
    pub fn confirm_rect(&self) -> Rect {
        Rect::new(
            self.rect.right() - 70.0 - 12.0,
            self.rect.bottom() - 24.0 - 10.0,
            70.0,
            24.0,
        )
    }

    /// Route one captured event. The caller applies `Confirmed`/`Dismissed`.
    pub fn handle_event(&mut self, event: &InputEvent) -> PopupAction {
        match *event {
            InputEvent::ButtonPressed {
                button: MouseButton::Left,
                position,
            } => {
                if !self.rect.contains(position) {
                    return PopupAction::Dismissed;
                }
                if self.confirm_rect().contains(position) {
                    return PopupAction::Confirmed { take: self.take() };
                }
                self.slider.handle_press(position);
                PopupAction::None
            }
            InputEvent::ButtonReleased {
                button: MouseButton::Left,
                ..
            } => {
                self.slider.handle_release();
                PopupAction::None
            }
            InputEvent::PointerMoved(position) => {
                self.slider.handle_motion(position);
                PopupAction::None
            }
            _ => PopupAction::None,
        }
    }

    pub fn draw(&self, list: &mut DrawList, style: &UiStyle) {
        list.draw_rect(self.rect, style.popup.background);
        list.draw_rect_outline(self.rect, style.popup.border, 3.0);

        list.draw_text(
            &format!("Take {} / {}", self.take(), self.total),
            self.rect.x + 16.0,
            self.rect.y + 12.0,
            style.popup.font_size,
            style.tooltip.font_color,
        );

        self.slider.draw(list, style);

        let confirm = self.confirm_rect();
        list.draw_rect(confirm, style.slot_color);
        list.draw_text(
            "OK",
            confirm.x + confirm.width / 2.0 - 10.0,
            confirm.y + 5.0,
            style.popup.font_size,
            style.count_font_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popup(total: u32) -> SplitPopup {
        let style = UiStyle::default();
        let anchor = Rect::new(500.0, 500.0, 70.0, 70.0);
        SplitPopup::open((1, 1), total, anchor, &style)
    }

    fn drag_to(popup: &mut SplitPopup, fraction: f32) {
        let track = popup.slider.track;
        let knob = popup.slider.knob_rect();
        let start = Vec2::new(knob.x + knob.width / 2.0, knob.y + knob.height / 2.0);
        popup.handle_event(&InputEvent::ButtonPressed {
            button: MouseButton::Left,
            position: start,
        });
        popup.handle_event(&InputEvent::PointerMoved(Vec2::new(
            track.x + fraction * track.width,
            start.y,
        )));
        popup.handle_event(&InputEvent::ButtonReleased {
            button: MouseButton::Left,
            position: start,
        });
    }

    #[test]
    fn test_take_spans_full_range() {
        let mut popup = popup(10);
        assert_eq!(popup.take(), 1);

        drag_to(&mut popup, 1.0);
        assert_eq!(popup.take(), 10);

        drag_to(&mut popup, 0.37);
        assert_eq!(popup.take(), 4);
    }

    #[test]
    fn test_click_outside_dismisses() {
        let mut popup = popup(5);
        let action = popup.handle_event(&InputEvent::ButtonPressed {
            button: MouseButton::Left,
            position: Vec2::new(0.0, 0.0),
        });
        assert_eq!(action, PopupAction::Dismissed);
    }

    #[test]
    fn test_confirm_reports_selected_take() {
        let mut popup = popup(8);
        drag_to(&mut popup, 1.0);

        let confirm = popup.confirm_rect();
        let action = popup.handle_event(&InputEvent::ButtonPressed {
            button: MouseButton::Left,
            position: Vec2::new(confirm.x + 5.0, confirm.y + 5.0),
        });
        assert_eq!(action, PopupAction::Confirmed { take: 8 });
    }

    #[test]
    fn test_motion_without_drag_changes_nothing() {
        let mut popup = popup(10);
        popup.handle_event(&InputEvent::PointerMoved(Vec2::new(10_000.0, 10_000.0)));
        assert_eq!(popup.take(), 1);
    }

    #[test]
    fn test_flips_when_near_screen_edge() {
        let style = UiStyle::default();
        let anchor = Rect::new(1880.0, 500.0, 70.0, 70.0);
        let popup = SplitPopup::open((0, 0), 5, anchor, &style);
        assert!(popup.rect().right() <= anchor.x);
    }
}
