use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, Rgba32FImage, RgbaImage};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::icon::{self, IconStyle, MASTER_SIZE};

/// Sizes required for a browser-extension icon set.
pub const OUTPUT_SIZES: [u32; 4] = [16, 32, 48, 128];

/// Record of one written icon file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub style: IconStyle,
    pub output_dir: PathBuf,
    pub sizes: Vec<u32>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            style: IconStyle::default(),
            output_dir: PathBuf::from("icons"),
            sizes: OUTPUT_SIZES.to_vec(),
        }
    }
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon{}.png", size)
}

pub fn icon_path(dir: &Path, size: u32) -> PathBuf {
    dir.join(icon_file_name(size))
}

/// Downsample the master with Lanczos3; nearest and box filters wash out
/// the arrows at 16px. Filtering happens on premultiplied alpha so the
/// transparent surround does not darken the edge pixels.
pub fn resample(master: &RgbaImage, size: u32) -> RgbaImage {
    if master.dimensions() == (size, size) {
        return master.clone();
    }
    let premultiplied = premultiply(master);
    let small = imageops::resize(&premultiplied, size, size, FilterType::Lanczos3);
    unpremultiply(&small)
}

fn premultiply(img: &RgbaImage) -> Rgba32FImage {
    let (w, h) = img.dimensions();
    Rgba32FImage::from_fn(w, h, |x, y| {
        let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
        let alpha = a as f32 / 255.0;
        let c = |v: u8| v as f32 / 255.0 * alpha;
        Rgba([c(r), c(g), c(b), alpha])
    })
}

fn unpremultiply(img: &Rgba32FImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    RgbaImage::from_fn(w, h, |x, y| {
        let Rgba([r, g, b, a]) = *img.get_pixel(x, y);
        let alpha = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
        if alpha == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let c = |v: f32| ((v / a).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([c(r), c(g), c(b), alpha])
    })
}

/// Sort, dedupe and range check the requested sizes.
pub fn normalize_sizes(sizes: &[u32]) -> Result<Vec<u32>> {
    let mut out = sizes.to_vec();
    out.sort_unstable();
    out.dedup();
    if let Some(&size) = out.iter().find(|&&s| s == 0 || s > MASTER_SIZE) {
        return Err(Error::InvalidSize {
            size,
            max: MASTER_SIZE,
        });
    }
    Ok(out)
}

/// Write one PNG per size into `dir`, creating it if needed. Existing files
/// are overwritten. Stops at the first failure; files already written stay.
pub fn write_iconset(master: &RgbaImage, dir: &Path, sizes: &[u32]) -> Result<Vec<GeneratedIcon>> {
    fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreateFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let path = icon_path(dir, size);
        debug!(size, path = %path.display(), "resampling master");
        resample(master, size)
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| Error::WriteFailed {
                path: path.clone(),
                source,
            })?;
        info!(size, path = %path.display(), "generated icon");
        written.push(GeneratedIcon { size, path });
    }
    Ok(written)
}

/// Render the master canvas and write the whole icon set.
pub fn generate(options: &GenerateOptions) -> Result<Vec<GeneratedIcon>> {
    let sizes = normalize_sizes(&options.sizes)?;
    debug!(
        background = %options.style.background,
        arrow = %options.style.arrow,
        "rendering master canvas"
    );
    let master = icon::render_master(&options.style);
    write_iconset(&master, &options.output_dir, &sizes)
}

/// The `"icons"` object of a WebExtension manifest for the written files.
/// Paths are relative to the parent of the output directory, which is where
/// `manifest.json` is expected to live.
pub fn manifest_icons(icons: &[GeneratedIcon]) -> serde_json::Value {
    let map = icons
        .iter()
        .map(|icon| {
            let file = icon_file_name(icon.size);
            let dir = icon.path.parent().and_then(Path::file_name);
            let path = match dir {
                Some(dir) => format!("{}/{}", dir.to_string_lossy(), file),
                None => file,
            };
            (icon.size.to_string(), serde_json::Value::String(path))
        })
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(map)
}
