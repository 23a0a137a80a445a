mod framebuffer;
mod render_options;
mod renderer;

pub use framebuffer::FrameBuffer;
pub use render_options::{RenderOptions, RenderOptionsBuilder};
pub use renderer::Renderer;
