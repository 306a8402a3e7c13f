// src/render/mod.rs
pub mod html;
pub mod presets;

pub use html::render_document;
pub use presets::{custom_preset, get_preset, ScreenPreset, DEFAULT_PRESET, SCREEN_PRESETS};
