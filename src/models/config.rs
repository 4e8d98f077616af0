use epaper_dither::Rgb;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Display canvas every upload is normalized to
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Adobe color table (.act) describing the panel's colors
    #[serde(default = "default_palette")]
    pub palette: PathBuf,

    /// Directory holding processed bitmaps
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// File recording the current image across restarts
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Dithering worker pool settings
    #[serde(default)]
    pub dither: DitherConfig,

    /// Largest accepted upload body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Events buffered per subscriber before it is dropped
    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer: usize,
}

fn default_palette() -> PathBuf {
    PathBuf::from("color_profiles/N-color.act")
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("processed")
}

fn default_state_file() -> PathBuf {
    PathBuf::from("data/currentImage.txt")
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_subscriber_buffer() -> usize {
    16
}

/// Target canvas for normalization
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Padding color for `contain`, as `#RRGGBB` or `#RGB`
    #[serde(
        default = "default_background",
        deserialize_with = "deserialize_color"
    )]
    pub background: Rgb,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    480
}

fn default_background() -> Rgb {
    Rgb::new(255, 255, 255)
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Rgb, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse()
        .map_err(|e| serde::de::Error::custom(format!("invalid color '{s}': {e}")))
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

/// Dithering worker pool settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DitherConfig {
    /// Error diffusion divisor multiplier (1 = classic Atkinson)
    #[serde(default = "default_step")]
    pub step: u32,

    /// Dedicated dithering threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Jobs allowed to wait for a free worker
    #[serde(default = "default_queue")]
    pub queue: usize,
}

fn default_step() -> u32 {
    1
}

fn default_workers() -> usize {
    2
}

fn default_queue() -> usize {
    8
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            workers: default_workers(),
            queue: default_queue(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        width = config.canvas.width,
                        height = config.canvas.height,
                        palette = %config.palette.display(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            palette: default_palette(),
            images_dir: default_images_dir(),
            state_file: default_state_file(),
            dither: DitherConfig::default(),
            max_upload_bytes: default_max_upload_bytes(),
            subscriber_buffer: default_subscriber_buffer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.canvas.height, 480);
        assert_eq!(config.canvas.background, Rgb::new(255, 255, 255));
        assert_eq!(config.palette, PathBuf::from("color_profiles/N-color.act"));
        assert_eq!(config.images_dir, PathBuf::from("processed"));
        assert_eq!(config.state_file, PathBuf::from("data/currentImage.txt"));
        assert_eq!(config.dither, DitherConfig::default());
        assert_eq!(config.max_upload_bytes, 26_214_400);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r##"
canvas:
  width: 640
  height: 384
  background: "#000"
palette: profiles/6-color.act
dither:
  step: 2
  workers: 4
"##;

        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.canvas.width, 640);
        assert_eq!(config.canvas.height, 384);
        assert_eq!(config.canvas.background, Rgb::new(0, 0, 0));
        assert_eq!(config.palette, PathBuf::from("profiles/6-color.act"));
        assert_eq!(config.dither.step, 2);
        assert_eq!(config.dither.workers, 4);
        // Unset fields keep their defaults
        assert_eq!(config.dither.queue, 8);
        assert_eq!(config.images_dir, PathBuf::from("processed"));
        assert_eq!(config.subscriber_buffer, 16);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config.canvas, CanvasConfig::default());
    }

    #[test]
    fn test_invalid_background_rejected() {
        let yaml = "canvas:\n  background: \"#GG0000\"\n";
        assert!(AppConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/inkframe.yaml")));
        assert_eq!(config.canvas.width, 800);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "images_dir: /srv/frames\n").unwrap();

        let config = AppConfig::load(Some(&path));
        assert_eq!(config.images_dir, PathBuf::from("/srv/frames"));
    }
}
