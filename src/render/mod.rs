pub mod animation;
pub mod renderer;

pub use renderer::Renderer;
