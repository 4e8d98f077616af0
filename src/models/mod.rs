pub mod config;
pub mod display_event;
pub mod fit;

pub use config::{AppConfig, CanvasConfig, DitherConfig};
pub use display_event::DisplayEvent;
pub use fit::FitPolicy;
