pub mod display_state;
pub mod dither_pool;
pub mod image_pipeline;
pub mod image_store;
pub mod palette_loader;

pub use display_state::DisplayState;
pub use dither_pool::DitherPool;
pub use image_pipeline::ImagePipeline;
pub use image_store::ImageStore;
pub use palette_loader::PaletteLoader;
