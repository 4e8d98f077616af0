pub mod bitmap;
pub mod normalize;

pub use bitmap::{encode_bmp, write_bmp};
pub use normalize::normalize;
