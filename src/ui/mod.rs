//! Presentation: draw directives, styling, tooltip and the split popup

pub mod draw;
pub mod split_popup;
pub mod style;
pub mod tooltip;

pub use draw::{Color, DrawCommand, DrawList, Rect};
pub use split_popup::{PopupAction, SplitPopup};
pub use style::UiStyle;
pub use tooltip::Tooltip;
