use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::clock::parse_hhmm;
use crate::error::ConfigError;
use crate::layout::GridConfig;

/// Contents of a `timetable.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridConfig,
}

impl Settings {
    /// Defaults when no path is given; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), grid = ?settings.grid, "loaded config");
        Ok(settings)
    }
}

/// Per-run replacements for individual grid settings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridOverrides {
    pub window_start: Option<u32>,
    pub window_end: Option<u32>,
    pub slot_minutes: Option<u32>,
    pub slot_px: Option<f64>,
    pub minimum_visible_px: Option<f64>,
}

impl GridOverrides {
    pub fn apply(&self, grid: GridConfig) -> GridConfig {
        GridConfig {
            window_start: self.window_start.unwrap_or(grid.window_start),
            window_end: self.window_end.unwrap_or(grid.window_end),
            slot_minutes: self.slot_minutes.unwrap_or(grid.slot_minutes),
            slot_px: self.slot_px.unwrap_or(grid.slot_px),
            minimum_visible_px: self.minimum_visible_px.unwrap_or(grid.minimum_visible_px),
        }
    }
}

/// Loads the file (if any), applies overrides and validates the result.
pub fn resolve_grid(path: Option<&Path>, overrides: &GridOverrides) -> Result<GridConfig, ConfigError> {
    let grid = overrides.apply(Settings::load(path)?.grid);
    grid.validate()?;
    Ok(grid)
}

/// clap value parser for window bounds.
pub fn parse_window_bound(text: &str) -> Result<u32, ConfigError> {
    parse_hhmm(text).ok_or_else(|| ConfigError::Clock(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_means_defaults() {
        let grid = resolve_grid(None, &GridOverrides::default()).unwrap();
        assert_eq!(grid, GridConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nwindow_start = \"7:00\"\nslot_px = 20.0").unwrap();

        let overrides = GridOverrides {
            slot_px: Some(15.0),
            ..GridOverrides::default()
        };
        let grid = resolve_grid(Some(file.path()), &overrides).unwrap();
        assert_eq!(grid.window_start, 420);
        assert_eq!(grid.window_end, 1140);
        assert_eq!(grid.slot_px, 15.0);
    }

    #[test]
    fn invalid_result_is_rejected() {
        let overrides = GridOverrides {
            window_start: Some(1200),
            ..GridOverrides::default()
        };
        assert!(matches!(
            resolve_grid(None, &overrides),
            Err(ConfigError::EmptyWindow { .. })
        ));
    }

    #[test]
    fn bad_toml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nwindow_start = \"noon\"").unwrap();
        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn window_bound_flag_parses_clock_and_minutes() {
        assert_eq!(parse_window_bound("8:30").unwrap(), 510);
        assert_eq!(parse_window_bound("600").unwrap(), 600);
        assert!(parse_window_bound("late").is_err());
    }
}
