pub mod renderer;

pub use renderer::{Hud, Renderer, ScreenLayout, body_brightness, food_pulse};
