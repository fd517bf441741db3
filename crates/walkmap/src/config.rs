//! Walk configuration and the built-in region presets.

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Parameters for one region's walks.
///
/// Unknown keys are ignored when deserializing, so older region configs
/// carrying extra flags still load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Steps per unit of projected area (higher = longer walks)
    #[serde(default = "default_density")]
    pub density: f64,

    /// Upper bound on step length, in display units
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Polygons with a smaller projected area get no walk at all
    #[serde(default)]
    pub cutoff_area: f64,

    /// Seed for reproducible walks (None = random each run)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_density() -> f64 {
    2.0
}

fn default_scale() -> f64 {
    2.0
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            scale: default_scale(),
            cutoff_area: 0.0,
            seed: None,
        }
    }
}

impl WalkConfig {
    pub fn new(density: f64, scale: f64, cutoff_area: f64) -> Self {
        Self { density, scale, cutoff_area, seed: None }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_cutoff_area(mut self, cutoff_area: f64) -> Self {
        self.cutoff_area = cutoff_area;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// RNG for this config: seeded when `seed` is set, OS-seeded otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Built-in per-region settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Hawaii,
    Minnesota,
    Vietnam,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[Preset::Hawaii, Preset::Minnesota, Preset::Vietnam]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Hawaii => "hawaii",
            Preset::Minnesota => "minnesota",
            Preset::Vietnam => "vietnam",
        }
    }

    pub fn config(&self) -> WalkConfig {
        match self {
            // Islands are small, so every one of them gets a walk
            Preset::Hawaii => WalkConfig::new(5.0, 2.0, 0.0),
            Preset::Minnesota => WalkConfig::new(1.5, 3.0, 10.0),
            Preset::Vietnam => WalkConfig::new(2.3, 2.6, 20.0),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a preset name doesn't match any built-in region.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset '{0}'")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Preset::all()
            .iter()
            .copied()
            .find(|p| p.name() == lower)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn preset_lookup_is_case_insensitive() {
        assert_eq!("hawaii".parse::<Preset>(), Ok(Preset::Hawaii));
        assert_eq!("Vietnam".parse::<Preset>(), Ok(Preset::Vietnam));
        assert_eq!(
            "atlantis".parse::<Preset>(),
            Err(UnknownPreset("atlantis".to_string()))
        );
    }

    #[test]
    fn preset_values() {
        let mn = Preset::Minnesota.config();
        assert_eq!((mn.density, mn.scale, mn.cutoff_area), (1.5, 3.0, 10.0));
        assert_eq!(Preset::Hawaii.config().cutoff_area, 0.0);
        for preset in Preset::all() {
            assert_eq!(preset.to_string().parse::<Preset>(), Ok(*preset));
        }
    }

    #[test]
    fn builder_methods_override() {
        let cfg = Preset::Vietnam.config().with_density(9.0).with_seed(3);
        assert_eq!(cfg.density, 9.0);
        assert_eq!(cfg.scale, 2.6);
        assert_eq!(cfg.seed, Some(3));
    }

    #[test]
    fn seeded_rng_repeats() {
        let cfg = WalkConfig::default().with_seed(42);
        let mut a = cfg.rng();
        let mut b = cfg.rng();
        for _ in 0..8 {
            assert_eq!(a.random::<u32>(), b.random::<u32>());
        }
    }

    #[test]
    fn deserializes_with_defaults_and_extra_keys() {
        let json = r#"{ "density": 5, "scale": 2, "careful": true, "smooth": true }"#;
        let cfg: WalkConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.density, 5.0);
        assert_eq!(cfg.cutoff_area, 0.0);
        assert_eq!(cfg.seed, None);
    }
}
