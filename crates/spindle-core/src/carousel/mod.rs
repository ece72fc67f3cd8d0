pub mod gesture;
pub mod layout;
pub mod state;

pub use gesture::{CommitPolicy, DragPhase, GestureConfig, GestureOutcome};
pub use layout::{LayoutConfig, Placement, VisualTransform};
pub use state::{CarouselError, CarouselState, offset_index};

pub const DEFAULT_SENSITIVITY: f64 = 200.0; // pixels of drag per index step
pub const DEFAULT_THRESHOLD: f64 = 50.0; // minimum drag for a threshold commit
pub const DEFAULT_CLICK_SLOP: f64 = 4.0; // drags shorter than this are taps
pub const DEFAULT_SPREAD: f64 = 220.0; // pixels between adjacent item centers
pub const DEFAULT_MIN_SCALE: f64 = 0.55;
pub const DEFAULT_MAX_SCALE: f64 = 1.0;
pub const DEFAULT_SCALE_SPREAD: f64 = 1.5;
pub const DEFAULT_MAX_VISIBLE_OFFSET: f64 = 3.0;
pub const DEFAULT_ARC_ANGLE_DEG: f64 = 30.0;
pub const DEFAULT_STACK_BASE: u32 = 100;
pub const STACK_STEP: f64 = 10.0; // stack units lost per index of distance
pub const DEPTH_RISE: f64 = 0.2; // vertical lift per pixel of arc depth
