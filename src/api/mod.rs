pub mod colorize;
pub mod mask;

pub use colorize::{handle_colorize, ColorizeRequest, __path_handle_colorize};
pub use colorize::{ITERATIONS_HEADER, MARKED_HEADER, QUALITY_HEADER};
pub use mask::{handle_mask, MaskResponse, __path_handle_mask};
