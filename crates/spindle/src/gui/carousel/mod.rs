pub mod model;
pub mod view;

pub use model::{Frame, Stage};
pub use view::draw;

pub const CORNER_RADIUS: f64 = 14.0;
pub const BORDER_WIDTH: f64 = 3.0;
pub const LABEL_FONT_SIZE: f64 = 48.0; // placeholder numbers at full scale
pub const PIXBUF_OVERSAMPLE: f64 = 2.0; // decode above card size for HiDPI
