pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod icon;
pub mod iconset;
pub mod logger;

pub use color::Color;
pub use error::{Error, Result};
pub use icon::{IconStyle, MASTER_SIZE, render_master};
pub use iconset::{GenerateOptions, GeneratedIcon, OUTPUT_SIZES, generate};
