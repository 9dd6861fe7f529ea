use std::path::PathBuf;

use clap::Parser;

use crate::config::{Settings, parse_sizes};

/// Draws the two-arrow sort icon and writes it as a browser-extension icon set.
#[derive(Parser, Debug)]
#[command(name = "sorticon", version, about, long_about = None)]
pub struct Cli {
    /// Background color (hex, rgb(), hsl() or a CSS name) [default: #4A90E2]
    #[arg(long, value_name = "COLOR")]
    pub background_color: Option<String>,

    /// Arrow color [default: white]
    #[arg(long, value_name = "COLOR")]
    pub arrow_color: Option<String>,

    /// Directory the icons are written to [default: icons]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Comma separated edge lengths [default: 16,32,48,128]
    #[arg(long, value_name = "SIZES", value_parser = parse_size_list)]
    pub sizes: Option<SizeList>,

    /// key=value config file [default: ./sorticon.conf if present]
    #[arg(short, long, env = "SORTICON_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the manifest.json "icons" entry for the written files
    #[arg(long)]
    pub manifest: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeList(pub Vec<u32>);

fn parse_size_list(value: &str) -> Result<SizeList, String> {
    parse_sizes(value).map(SizeList)
}

impl Cli {
    /// The settings given on the command line, highest precedence.
    pub fn settings(&self) -> Settings {
        Settings {
            background_color: self.background_color.clone(),
            arrow_color: self.arrow_color.clone(),
            output_dir: self.output_dir.clone(),
            sizes: self.sizes.clone().map(|s| s.0),
            log_level: None,
            unknown_keys: Vec::new(),
            loaded_from: None,
        }
    }
}
