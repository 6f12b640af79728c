//! Binder UI Layer
//!
//! Provides:
//! - egui-based GUI components
//! - wgpu rendering pipeline
//! - Input handling

pub mod components;
pub mod input;
pub mod renderer;
pub mod theme;

pub use input::InputHandler;
pub use renderer::Renderer;
pub use theme::Theme;
