//! Lumina UI Layer
//!
//! Provides:
//! - egui-based GUI components
//! - wgpu rendering pipeline
//! - Native file picker wrappers

pub mod components;
pub mod pickers;
pub mod renderer;
pub mod theme;

pub use renderer::Renderer;
pub use theme::Theme;
