//! Procedural drawing of the icon, favicon and splash assets of a mobile app
//! bundle.

pub mod bitmap_font;
pub mod canvas;
pub mod generator;
pub mod heart;
pub mod logging;
pub mod manifest;
pub mod paint;
pub mod presets;
pub mod text;

pub use generator::{generate_assets, remediation, Args, GeneratedAsset};
pub use presets::Preset;
