use glam::Vec2;

use super::draw::{DrawList, Rect};
use super::style::{TooltipStyle, UiStyle};

/// Rough text-box measurement; the host renderer owns real font metrics, so
/// layout here only needs to be close enough for placement decisions.
fn measure_text(text: &str, font_size: f32) -> Vec2 {
    let line_height = font_size * 1.2;
    let mut width: f32 = 0.0;
    let mut lines = 0;
    for line in text.split('\n') {
        width = width.max(line.chars().count() as f32 * font_size * 0.55);
        lines += 1;
    }
    Vec2::new(width, lines as f32 * line_height)
}

/// Hover tooltip with an appear delay.
///
/// The delay timer is advanced with frame `dt` and resets whenever the
/// hovered target changes. The box is placed on the side of the pointer that
/// keeps it on screen (flipped per screen half, like the original).
#[derive(Debug, Default)]
pub struct Tooltip {
    anchor: Option<Rect>,
    text: String,
    hover_time: f32,
    active: bool,
    rect: Option<Rect>,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the tooltip at a new hovered slot (or nothing). A changed
    /// anchor restarts the delay.
    pub fn update_target(&mut self, target: Option<(Rect, String)>) {
        match target {
            Some((anchor, text)) => {
                if self.anchor != Some(anchor) {
                    self.anchor = Some(anchor);
                    self.text = text;
                    self.reset_hover();
                }
            }
            None => {
                if self.anchor.is_some() {
                    self.anchor = None;
                    self.text.clear();
                    self.reset_hover();
                }
            }
        }
    }

    fn reset_hover(&mut self) {
        self.hover_time = 0.0;
        self.active = false;
        self.rect = None;
    }

    /// Advance the hover timer and materialize the box once the delay passes
    pub fn update(&mut self, dt: f32, pointer: Vec2, style: &UiStyle) {
        if self.anchor.is_none() {
            return;
        }
        self.hover_time += dt;
        if self.active || self.hover_time <= style.tooltip.delay {
            return;
        }

        let tip = &style.tooltip;
        let size = measure_text(&self.text, tip.font_size);
        let box_w = size.x + tip.padding * 2.0;
        let box_h = size.y + tip.padding * 2.0;

        let x = if pointer.x > style.screen_width / 2.0 {
            pointer.x - box_w - tip.offset
        } else {
            pointer.x + tip.offset
        };
        let y = if pointer.y > style.screen_height / 2.0 {
            pointer.y - box_h - tip.offset
        } else {
            pointer.y + tip.offset
        };

        self.rect = Some(Rect::new(x, y, box_w, box_h));
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn draw(&self, list: &mut DrawList, style: &TooltipStyle) {
        let Some(rect) = self.rect.filter(|_| self.active) else {
            return;
        };
        list.draw_rect(rect, style.background);
        list.draw_rect_outline(rect, style.border, 3.0);

        let line_height = style.font_size * 1.2;
        for (i, line) in self.text.split('\n').enumerate() {
            list.draw_text(
                line,
                rect.x + style.padding,
                rect.y + style.padding + i as f32 * line_height,
                style.font_size,
                style.font_color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appears_after_delay() {
        let style = UiStyle::default();
        let mut tooltip = Tooltip::new();
        let anchor = Rect::new(100.0, 100.0, 70.0, 70.0);
        tooltip.update_target(Some((anchor, "Apple\nAn apple.".into())));

        tooltip.update(0.5, Vec2::new(120.0, 120.0), &style);
        assert!(!tooltip.is_active());

        tooltip.update(0.3, Vec2::new(120.0, 120.0), &style);
        assert!(tooltip.is_active());
    }

    #[test]
    fn test_changing_target_resets_delay() {
        let style = UiStyle::default();
        let mut tooltip = Tooltip::new();
        tooltip.update_target(Some((Rect::new(0.0, 0.0, 70.0, 70.0), "a".into())));
        tooltip.update(1.0, Vec2::new(10.0, 10.0), &style);
        assert!(tooltip.is_active());

        tooltip.update_target(Some((Rect::new(73.0, 0.0, 70.0, 70.0), "b".into())));
        assert!(!tooltip.is_active());

        tooltip.update(0.2, Vec2::new(80.0, 10.0), &style);
        assert!(!tooltip.is_active());
    }

    #[test]
    fn test_flips_to_stay_on_screen() {
        let style = UiStyle::default();
        let mut tooltip = Tooltip::new();
        let pointer = Vec2::new(1900.0, 1060.0);
        tooltip.update_target(Some((Rect::new(1850.0, 1010.0, 70.0, 70.0), "x".into())));
        tooltip.update(1.0, pointer, &style);

        let mut list = DrawList::new();
        tooltip.draw(&mut list, &style.tooltip);
        // the box was placed up-left of the pointer
        match &list.commands()[0] {
            crate::ui::draw::DrawCommand::Rect { rect, .. } => {
                assert!(rect.right() < pointer.x);
                assert!(rect.bottom() < pointer.y);
            }
            other => panic!("expected rect, got {:?}", other),
        }
    }
}
