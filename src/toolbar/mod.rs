mod color;
mod geometry;
mod link;
mod view;

pub(crate) use color::{hsb_to_hex, hue_pick, square_pick, SWATCHES};
pub(crate) use geometry::{color_picker_position, toolbar_position, Point, Rect, Size};
pub(crate) use link::{normalize_link_url, LinkDialog};
pub(crate) use view::{ColorPicker, FormattingToolbar};
