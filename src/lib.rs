//! Huebrush - colorize grayscale images from a few color scribbles
//!
//! Command line and HTTP front end for the `scribble-colorize` engine.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod models;
pub mod server;
pub mod services;
