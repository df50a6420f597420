// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::rendering::{RenderConfig, Rgb};

/// Paired per-atom overrides: `values[i]` applies to atom `indices[i]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Overrides<T> {
  pub indices: Vec<usize>,
  pub values: Vec<T>,
}

// --- Style file ---

/// Everything `cview-pictures` needs to know about how a structure should look.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Style {
  #[serde(default)]
  pub radii: BTreeMap<String, f64>,
  #[serde(default)]
  pub colors: BTreeMap<String, Rgb>,
  #[serde(default)]
  pub textures: BTreeMap<String, String>,

  /// Global settings passed through as-is (rotation, bbox, canvas_width, ...).
  #[serde(default)]
  pub options: Map<String, Value>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub atom_colors: Option<Overrides<Rgb>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub atom_textures: Option<Overrides<String>>,
}

impl Default for Style {
  fn default() -> Self {
    let radii = [("Zn", 1.2), ("O", 0.74), ("H", 0.4), ("C", 0.68), ("N", 0.65)];
    let colors = [
      ("Zn", [0.87, 0.87, 0.9]),
      ("O", [1.0, 0.0, 0.0]),
      ("H", [1.0, 1.0, 1.0]),
      ("N", [0.188, 0.314, 0.973]),
      ("C", [0.25, 0.25, 0.25]),
    ];

    let mut options = Map::new();
    options.insert("rotation".into(), Value::from("0x,0y,0z"));
    options.insert("canvas_width".into(), Value::from(200));

    Self {
      radii: radii.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
      colors: colors.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
      textures: radii.iter().map(|(k, _)| (k.to_string(), "jmol".to_string())).collect(),
      options,
      atom_colors: None,
      atom_textures: None,
    }
  }
}

impl Style {
  /// Loads the style from `path`, or from the user config directory
  /// (e.g. ~/.config/cview-tools/style.json) when no path is given.
  /// Falls back to the built-in defaults if neither exists.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let path = match path {
      Some(p) => p.to_path_buf(),
      None => {
        let p = Self::get_path();
        if !p.exists() {
          log::debug!("No style file found at {:?}. Using defaults.", p);
          return Ok(Self::default());
        }
        p
      }
    };

    let file = File::open(&path).map_err(|e| Error::io(path.display().to_string(), e))?;
    let style = serde_json::from_reader(BufReader::new(file))?;
    log::info!("Style loaded from {:?}", path);
    Ok(style)
  }

  pub fn save(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|e| Error::io(parent.display().to_string(), e))?;
    }
    let file = File::create(path).map_err(|e| Error::io(path.display().to_string(), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), self)?;
    log::info!("Style saved to {:?}", path);
    Ok(())
  }

  /// Feeds the style into a render configuration builder.
  pub fn apply(&self, cfg: &mut RenderConfig) -> Result<()> {
    cfg.set_radii(self.radii.iter().map(|(k, v)| (k.clone(), *v)))
      .set_colors(self.colors.iter().map(|(k, v)| (k.clone(), *v)))
      .set_textures(self.textures.iter().map(|(k, v)| (k.clone(), v.clone())));

    for (key, value) in &self.options {
      cfg.set_global_option(key.clone(), value.clone());
    }

    if let Some(o) = &self.atom_colors {
      cfg.set_specific_colors(&o.indices, &o.values)?;
    }
    if let Some(o) = &self.atom_textures {
      cfg.set_specific_textures(&o.indices, &o.values)?;
    }
    Ok(())
  }

  fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "cview-tools") {
      proj.config_dir().join("style.json")
    } else {
      PathBuf::from("style.json")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rendering::config::{ATOM_COLORS, COLORS, RADII, TEXTURES};
  use serde_json::json;

  #[test]
  fn test_defaults_apply() {
    let mut cfg = RenderConfig::new();
    Style::default().apply(&mut cfg).unwrap();

    assert_eq!(cfg.get(RADII).unwrap()["Zn"], json!(1.2));
    assert_eq!(cfg.get(COLORS).unwrap()["O"], json!([1.0, 0.0, 0.0]));
    assert_eq!(cfg.get(TEXTURES).unwrap()["N"], json!("jmol"));
    assert_eq!(cfg.get("rotation"), Some(&json!("0x,0y,0z")));
    assert_eq!(cfg.get("canvas_width"), Some(&json!(200)));
    assert!(!cfg.contains_key(ATOM_COLORS));
  }

  #[test]
  fn test_parse_style_with_overrides() {
    let text = r#"{
      "radii": {"O": 0.7},
      "options": {"bbox": [15, 12, 32, 27], "transparent": false},
      "atom_colors": {"indices": [568, 569], "values": [[1.0, 0.5, 0.0], [0.5, 0.2, 0.05]]}
    }"#;
    let style: Style = serde_json::from_str(text).unwrap();
    assert!(style.colors.is_empty());

    let mut cfg = RenderConfig::new();
    style.apply(&mut cfg).unwrap();
    assert_eq!(cfg.get("bbox"), Some(&json!([15, 12, 32, 27])));
    assert_eq!(cfg.get(ATOM_COLORS).unwrap()["569"], json!([0.5, 0.2, 0.05]));
  }

  #[test]
  fn test_mismatched_overrides_abort() {
    let text = r#"{"atom_textures": {"indices": [1, 2], "values": ["glass"]}}"#;
    let style: Style = serde_json::from_str(text).unwrap();
    let mut cfg = RenderConfig::new();
    assert!(matches!(style.apply(&mut cfg), Err(Error::LengthMismatch { indices: 2, values: 1 })));
  }

  #[test]
  fn test_unknown_fields_rejected() {
    assert!(serde_json::from_str::<Style>(r#"{"radius": {"O": 1.0}}"#).is_err());
  }

  #[test]
  fn test_save_and_load() {
    let path = std::env::temp_dir().join(format!("cview-tools-style-{}.json", std::process::id()));
    let style = Style::default();
    style.save(&path).unwrap();
    let back = Style::load(Some(path.as_path())).unwrap();
    assert_eq!(back, style);
    std::fs::remove_file(&path).unwrap();
  }
}
