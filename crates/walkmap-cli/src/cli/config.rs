//! Config files and layering.
//!
//! Settings are applied lowest to highest: built-in defaults, preset,
//! config file, command-line flags. Config files are YAML unless they end
//! in `.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkmap::{Preset, UnknownPreset, WalkConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error(transparent)]
    UnknownPreset(#[from] UnknownPreset),
}

/// Partial walk settings. Unset fields leave the layer below untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigOverrides {
    /// Preset to start from (only meaningful in config files)
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub cutoff_area: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    /// Apply the set fields on top of `base`.
    pub fn apply(&self, mut base: WalkConfig) -> WalkConfig {
        if let Some(density) = self.density {
            base.density = density;
        }
        if let Some(scale) = self.scale {
            base.scale = scale;
        }
        if let Some(cutoff_area) = self.cutoff_area {
            base.cutoff_area = cutoff_area;
        }
        if let Some(seed) = self.seed {
            base.seed = Some(seed);
        }
        base
    }
}

/// Load a YAML or JSON config file.
pub fn load_overrides(path: &Path) -> Result<ConfigOverrides, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_overrides(&content, is_json(path)).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_overrides(content: &str, json: bool) -> Result<ConfigOverrides, String> {
    if json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

/// Build the final config from every layer.
///
/// A preset given on the command line beats one named in the file.
pub fn resolve(
    preset: Option<Preset>,
    file: Option<&ConfigOverrides>,
    flags: &ConfigOverrides,
) -> Result<WalkConfig, ConfigError> {
    let file_preset = match file.and_then(|f| f.preset.as_deref()) {
        Some(name) => Some(name.parse::<Preset>()?),
        None => None,
    };

    let mut config = preset
        .or(file_preset)
        .map(|p| p.config())
        .unwrap_or_default();

    if let Some(file) = file {
        config = file.apply(config);
    }
    Ok(flags.apply(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_given() {
        let config = resolve(None, None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, WalkConfig::default());
    }

    #[test]
    fn layers_apply_in_order() {
        let file = parse_overrides("preset: minnesota\nscale: 4\nseed: 9\n", false).unwrap();
        let flags = ConfigOverrides {
            seed: Some(11),
            ..Default::default()
        };

        let config = resolve(None, Some(&file), &flags).unwrap();
        assert_eq!(config.density, 1.5); // from the preset
        assert_eq!(config.scale, 4.0); // from the file
        assert_eq!(config.cutoff_area, 10.0); // from the preset
        assert_eq!(config.seed, Some(11)); // flag wins
    }

    #[test]
    fn command_line_preset_beats_file_preset() {
        let file = parse_overrides(r#"{ "preset": "hawaii" }"#, true).unwrap();
        let config = resolve(Some(Preset::Vietnam), Some(&file), &ConfigOverrides::default()).unwrap();
        assert_eq!(config, Preset::Vietnam.config());
    }

    #[test]
    fn unknown_preset_in_file() {
        let file = parse_overrides("preset: atlantis\n", false).unwrap();
        let err = resolve(None, Some(&file), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(_)));
        assert_eq!(err.to_string(), "unknown preset 'atlantis'");
    }

    #[test]
    fn legacy_region_configs_parse() {
        // Extra keys from older configs are ignored
        let json = r#"{ "density": 2.3, "scale": 2.6, "careful": true, "smooth": true, "cutoff_area": 20 }"#;
        let file = parse_overrides(json, true).unwrap();
        let config = resolve(None, Some(&file), &ConfigOverrides::default()).unwrap();
        assert_eq!(config, Preset::Vietnam.config());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_overrides(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn json_detection() {
        assert!(is_json(Path::new("a/b.JSON")));
        assert!(!is_json(Path::new("a/b.yaml")));
        assert!(!is_json(Path::new("noext")));
    }
}
