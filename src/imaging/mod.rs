pub mod png_io;
pub mod resize;

pub use png_io::{decode_png, decode_png_limited, encode_mask_png, encode_png};
pub use resize::resize_nearest;
