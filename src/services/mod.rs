pub mod colorize_service;
pub mod file_job;

pub use colorize_service::{decode_base64_png, ColorizeOutcome, ColorizeService};
pub use file_job::{default_output_path, FileJob};
