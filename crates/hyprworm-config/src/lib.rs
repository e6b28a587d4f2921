//! Configuration parsing for hyprworm
//!
//! This crate handles locating and parsing the line-oriented
//! `~/.config/hyprworm/config` file into a [`Config`].

mod error;
mod location;
mod model;
mod parser;

pub use error::ConfigError;
pub use location::{default_config_path, home_dir};
pub use model::*;
pub use parser::{load_config, parse_config, parse_config_str};
