pub mod config;

pub use config::{
    AppConfig, ColorizeConfig, ColorizeOverrides, InputConfig, ServerConfig, SolverName,
};
