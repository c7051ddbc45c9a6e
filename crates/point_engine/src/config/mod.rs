//! Configuration system
//!
//! Config files are TOML or RON, picked by extension.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
pub use serde::{Deserialize, Serialize};

use crate::ecs::ComponentValue;
use crate::scene::Template;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        debug!("Loading config from {}", path.display());

        match Format::of(path)? {
            Format::Toml => Self::from_toml(&contents),
            Format::Ron => Self::from_ron(&contents),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => self.to_toml()?,
            Format::Ron => self.to_ron()?,
        };
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Parse from a TOML document
    fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse from a RON document
    fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Render as a TOML document
    fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Render as a RON document
    fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Runtime settings for a scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Ticks between renders of a spawned root
    pub render_interval: u32,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            render_interval: 1,
            log_level: "info".to_string(),
        }
    }
}

impl Config for SceneConfig {}

/// Default component values loaded from a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateDefaults {
    /// Component values by key
    pub components: BTreeMap<String, ComponentValue>,
}

impl TemplateDefaults {
    /// Register every value as a default on `template`
    pub fn apply_to<W: 'static>(&self, template: &mut Template<W>) {
        for (key, value) in &self.components {
            template.set_default(key.clone(), value.clone());
        }
    }
}

impl Config for TemplateDefaults {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_scene_config_partial_toml_uses_defaults() {
        let config = SceneConfig::from_toml("render_interval = 4\n").unwrap();
        assert_eq!(config.render_interval, 4);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_scene_config_round_trips() {
        let config = SceneConfig {
            render_interval: 2,
            log_level: "debug".to_string(),
        };
        assert_eq!(SceneConfig::from_toml(&config.to_toml().unwrap()).unwrap(), config);
        assert_eq!(SceneConfig::from_ron(&config.to_ron().unwrap()).unwrap(), config);
    }

    #[test]
    fn test_template_defaults_from_ron() {
        let defaults = TemplateDefaults::from_ron(
            r#"{ "hp": Int(3), "name": Text("probe"), "velocity": Vector((1.0, 0.0, 0.0)) }"#,
        )
        .unwrap();
        assert_eq!(defaults.components["hp"], ComponentValue::Int(3));
        assert_eq!(
            defaults.components["velocity"],
            ComponentValue::Vector(Vec3::new(1.0, 0.0, 0.0))
        );

        let mut template = Template::<()>::new();
        defaults.apply_to(&mut template);
        assert_eq!(template.defaults().len(), 3);
        assert_eq!(template.defaults()["name"], ComponentValue::Text("probe".into()));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = SceneConfig::default().save_to_file("scene.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("point_engine_scene_{}.toml", std::process::id()));
        let config = SceneConfig {
            render_interval: 7,
            ..SceneConfig::default()
        };
        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
