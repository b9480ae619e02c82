pub mod handler;
pub mod touch;

pub use handler::{InputHandler, KeyAction};
pub use touch::{ControlPad, PAD_HEIGHT, SwipeTracker};
