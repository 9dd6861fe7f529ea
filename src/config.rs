use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::icon::IconStyle;
use crate::iconset::{GenerateOptions, OUTPUT_SIZES};

/// Picked up from the working directory when no config file is named.
pub const DEFAULT_CONFIG_FILE: &str = "sorticon.conf";

/// Raw settings before colors are parsed. Every field is optional so that
/// file values and command line values can be layered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub background_color: Option<String>,
    pub arrow_color: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub sizes: Option<Vec<u32>>,
    pub log_level: Option<String>,
    /// Keys seen in a config file that mean nothing to us.
    pub unknown_keys: Vec<String>,
    /// The config file these settings were read from, if any.
    pub loaded_from: Option<PathBuf>,
}

impl Settings {
    /// Fill unset fields from `lower`.
    pub fn or(self, lower: Settings) -> Settings {
        Settings {
            background_color: self.background_color.or(lower.background_color),
            arrow_color: self.arrow_color.or(lower.arrow_color),
            output_dir: self.output_dir.or(lower.output_dir),
            sizes: self.sizes.or(lower.sizes),
            log_level: self.log_level.or(lower.log_level),
            unknown_keys: [self.unknown_keys, lower.unknown_keys].concat(),
            loaded_from: self.loaded_from.or(lower.loaded_from),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Parse colors and fill defaults. Fails before anything touches disk.
    pub fn resolve(&self) -> Result<GenerateOptions> {
        let defaults = IconStyle::default();
        let background = match &self.background_color {
            Some(spec) => Color::parse(spec)?,
            None => defaults.background,
        };
        let arrow = match &self.arrow_color {
            Some(spec) => Color::parse(spec)?,
            None => defaults.arrow,
        };
        Ok(GenerateOptions {
            style: IconStyle { background, arrow },
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("icons")),
            sizes: self.sizes.clone().unwrap_or_else(|| OUTPUT_SIZES.to_vec()),
        })
    }
}

pub fn parse_sizes(value: &str) -> std::result::Result<Vec<u32>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().map_err(|_| format!("invalid size '{}'", s)))
        .collect::<std::result::Result<Vec<_>, _>>()
        .and_then(|sizes| {
            if sizes.is_empty() {
                Err("no sizes given".to_string())
            } else {
                Ok(sizes)
            }
        })
}

/// Parse `key=value` lines. `#` starts a comment line.
pub fn parse_config(content: &str) -> Result<Settings> {
    let mut cfg = Settings::default();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((k, v)) = line.split_once('=') else {
            return Err(Error::ConfigInvalid {
                line: idx + 1,
                message: format!("expected key=value, got '{}'", line),
            });
        };
        let v = v.trim();
        match k.trim() {
            "background_color" => cfg.background_color = Some(v.to_string()),
            "arrow_color" => cfg.arrow_color = Some(v.to_string()),
            "output_dir" => cfg.output_dir = Some(PathBuf::from(v)),
            "log_level" => cfg.log_level = Some(v.to_string()),
            "sizes" => {
                let sizes = parse_sizes(v).map_err(|message| Error::ConfigInvalid {
                    line: idx + 1,
                    message,
                })?;
                cfg.sizes = Some(sizes);
            }
            other => cfg.unknown_keys.push(other.to_string()),
        }
    }
    Ok(cfg)
}

/// Read settings from `path`, or from `sorticon.conf` in `cwd` when no path
/// is given. A missing default file is not an error.
///
/// This runs before logging is set up, so nothing is logged here; the caller
/// reports `unknown_keys` and `loaded_from` once the subscriber exists.
pub fn read_config(path: Option<&Path>, cwd: &Path) -> Result<Settings> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (cwd.join(DEFAULT_CONFIG_FILE), false),
    };
    let content = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if !explicit && e.kind() == io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        }
        Err(source) => return Err(Error::ConfigRead { path, source }),
    };
    let mut cfg = parse_config(&content)?;
    cfg.loaded_from = Some(path);
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{DEFAULT_ARROW, DEFAULT_BACKGROUND};

    #[test]
    fn test_parse_config() {
        let cfg = parse_config(
            "# sort icon\n\
             background_color = #2196F3\n\
             arrow_color=black\n\
             \n\
             output_dir = build/icons\n\
             sizes = 16, 48\n\
             log_level = debug\n\
             unknown = 1\n",
        )
        .unwrap();
        assert_eq!(cfg.background_color.as_deref(), Some("#2196F3"));
        assert_eq!(cfg.arrow_color.as_deref(), Some("black"));
        assert_eq!(cfg.output_dir, Some(PathBuf::from("build/icons")));
        assert_eq!(cfg.sizes, Some(vec![16, 48]));
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.unknown_keys, vec!["unknown".to_string()]);
    }

    #[test]
    fn test_malformed_lines() {
        match parse_config("background_color=#fff\njust words\n") {
            Err(Error::ConfigInvalid { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            parse_config("sizes=16,big"),
            Err(Error::ConfigInvalid { line: 1, .. })
        ));
        assert!(parse_config("sizes=").is_err());
    }

    #[test]
    fn test_defaults_resolve() {
        let options = Settings::default().resolve().unwrap();
        assert_eq!(options.style.background, DEFAULT_BACKGROUND);
        assert_eq!(options.style.arrow, DEFAULT_ARROW);
        assert_eq!(options.output_dir, PathBuf::from("icons"));
        assert_eq!(options.sizes, OUTPUT_SIZES.to_vec());
    }

    #[test]
    fn test_command_line_wins() {
        let cli = Settings {
            arrow_color: Some("red".into()),
            ..Default::default()
        };
        let file = Settings {
            background_color: Some("navy".into()),
            arrow_color: Some("white".into()),
            ..Default::default()
        };
        let merged = cli.or(file);
        assert_eq!(merged.background_color.as_deref(), Some("navy"));
        assert_eq!(merged.arrow_color.as_deref(), Some("red"));
    }

    #[test]
    fn test_invalid_color_fails_resolve() {
        let settings = Settings {
            background_color: Some("not-a-color".into()),
            ..Default::default()
        };
        assert!(matches!(settings.resolve(), Err(Error::InvalidColor { .. })));
    }

    #[test]
    fn test_invalid_color_writes_no_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("icons");
        let settings = Settings {
            arrow_color: Some("not-a-color".into()),
            output_dir: Some(out.clone()),
            ..Default::default()
        };
        let result = settings.resolve().and_then(|options| crate::iconset::generate(&options));
        assert!(matches!(result, Err(Error::InvalidColor { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn test_read_config_locations() {
        let tmp = tempfile::tempdir().unwrap();
        // no default file present
        assert_eq!(read_config(None, tmp.path()).unwrap(), Settings::default());

        fs::write(tmp.path().join(DEFAULT_CONFIG_FILE), "arrow_color=black\n").unwrap();
        let cfg = read_config(None, tmp.path()).unwrap();
        assert_eq!(cfg.arrow_color.as_deref(), Some("black"));
        assert_eq!(cfg.loaded_from, Some(tmp.path().join(DEFAULT_CONFIG_FILE)));

        let missing = tmp.path().join("missing.conf");
        match read_config(Some(&missing), tmp.path()) {
            Err(Error::ConfigRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
