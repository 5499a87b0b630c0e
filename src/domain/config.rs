use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::chart::ChartLayout;

/// Configuration for the portal's presentation.
///
/// Currently this only controls the size of the vitals chart canvas; the
/// margins inside it are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Width of the vitals chart canvas, in pixels.
    canvas_width: u32,

    /// Height of the vitals chart canvas, in pixels.
    canvas_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the TOML content is
    /// invalid, or if the canvas is too small to hold the chart.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the canvas leaves room for a plot inside the fixed margins.
    ///
    /// # Errors
    ///
    /// Returns an error naming the canvas size if it is too small.
    pub fn validate(&self) -> Result<(), String> {
        if self.layout().has_plot_area() {
            Ok(())
        } else {
            Err(format!(
                "Canvas {}x{} is too small for the chart margins",
                self.canvas_width, self.canvas_height
            ))
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))
    }

    /// Width of the chart canvas.
    #[must_use]
    pub const fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    /// Height of the chart canvas.
    #[must_use]
    pub const fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    /// Sets the chart canvas size.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the configuration unchanged, if the size
    /// fails [`Config::validate`].
    pub fn set_canvas_size(&mut self, width: u32, height: u32) -> Result<(), String> {
        let resized = Self {
            canvas_width: width,
            canvas_height: height,
        };
        resized.validate()?;
        *self = resized;
        Ok(())
    }

    /// The chart layout for the configured canvas.
    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        ChartLayout::with_size(f64::from(self.canvas_width), f64::from(self.canvas_height))
    }
}

const fn default_canvas_width() -> u32 {
    640
}

const fn default_canvas_height() -> u32 {
    260
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_canvas_width")]
        canvas_width: u32,

        #[serde(default = "default_canvas_height")]
        canvas_height: u32,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                canvas_width,
                canvas_height,
            } => Self {
                canvas_width,
                canvas_height,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use test_case::test_case;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ncanvas_width = 800\ncanvas_height = 300\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.canvas_width(), 800);
        assert_eq!(config.canvas_height(), 300);
        assert_eq!(config.layout().plot_width(), 740.0);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ncanvas_width = \"wide\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let mut config = Config::default();
        config.set_canvas_size(1024, 400).unwrap();

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test_case(0, 260; "zero width")]
    #[test_case(60, 260; "width within margins")]
    #[test_case(640, 0; "zero height")]
    #[test_case(640, 60; "height within margins")]
    fn load_rejects_canvas_without_plot_area(width: u32, height: u32) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "_version = \"1\"\ncanvas_width = {width}\ncanvas_height = {height}\n"
        )
        .unwrap();

        let error = Config::load(file.path()).unwrap_err();

        assert_eq!(
            error,
            format!("Canvas {width}x{height} is too small for the chart margins")
        );
    }

    #[test]
    fn rejected_resize_leaves_config_unchanged() {
        let mut config = Config::default();

        assert!(config.set_canvas_size(640, 10).is_err());

        assert_eq!(config, Config::default());
    }
}
