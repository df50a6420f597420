// src/rendering/config.rs

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Red, green, blue in [0, 1]. Not clamped anywhere on the way to the writer.
pub type Rgb = [f64; 3];

/// Flat setting-name -> value map handed to a writer.
pub type Settings = Map<String, Value>;

// Keys the builder fills through its dedicated setters.
pub const RADII: &str = "radii";
pub const COLORS: &str = "colors";
pub const TEXTURES: &str = "textures";
pub const ATOM_COLORS: &str = "atom_colors";
pub const ATOM_TEXTURES: &str = "atom_textures";

/// Accumulates per-species attributes, per-atom overrides and global render
/// settings, then hands each consumer the subset of keys it accepts.
///
/// Nothing is validated here apart from the index/value pairing of the
/// per-atom overrides; value shapes, texture names and atom indices are
/// checked by the writer that consumes them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderConfig {
    settings: Settings,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a configuration with a per-species radius table.
    pub fn with_radii<I, K>(radii: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut cfg = Self::new();
        cfg.set_radii(radii);
        cfg
    }

    /// Per-species radii in Angstrom. Species absent from the structure are
    /// kept and simply never used.
    pub fn set_radii<I, K>(&mut self, radii: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.merge(RADII, radii.into_iter().map(|(k, r)| (k.into(), Value::from(r))));
        self
    }

    pub fn set_colors<I, K>(&mut self, colors: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Rgb)>,
        K: Into<String>,
    {
        self.merge(COLORS, colors.into_iter().map(|(k, c)| (k.into(), rgb_value(c))));
        self
    }

    pub fn set_textures<I, K, T>(&mut self, textures: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        self.merge(
            TEXTURES,
            textures.into_iter().map(|(k, t)| (k.into(), Value::String(t.into()))),
        );
        self
    }

    /// Colors for individual atoms, overriding the species color.
    ///
    /// `indices` refer to the structure that is finally written (after any
    /// periodic replication). On a length mismatch nothing is stored.
    pub fn set_specific_colors(&mut self, indices: &[usize], colors: &[Rgb]) -> Result<&mut Self> {
        check_lengths(indices.len(), colors.len())?;
        self.merge(
            ATOM_COLORS,
            indices.iter().zip(colors).map(|(i, c)| (i.to_string(), rgb_value(*c))),
        );
        Ok(self)
    }

    pub fn set_specific_textures<T: AsRef<str>>(
        &mut self,
        indices: &[usize],
        textures: &[T],
    ) -> Result<&mut Self> {
        check_lengths(indices.len(), textures.len())?;
        self.merge(
            ATOM_TEXTURES,
            indices
                .iter()
                .zip(textures)
                .map(|(i, t)| (i.to_string(), Value::String(t.as_ref().to_string()))),
        );
        Ok(self)
    }

    /// Any renderer-level setting: `rotation`, `bbox`, `canvas_width`,
    /// `transparent`, `run_povray`, ... Replaces a previous value.
    pub fn set_global_option(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Copy of the accumulated settings restricted to `accepted_keys`.
    ///
    /// Does not touch the builder, so it can be called once per consumer and
    /// accumulation may continue afterwards.
    pub fn finalize_for_write<I>(&self, accepted_keys: I) -> Settings
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let accepted: BTreeSet<String> = accepted_keys
            .into_iter()
            .map(|k| k.as_ref().to_string())
            .collect();

        let filtered: Settings = self
            .settings
            .iter()
            .filter(|(k, _)| accepted.contains(k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let dropped: Vec<&str> = self
            .settings
            .keys()
            .filter(|k| !accepted.contains(k.as_str()))
            .map(String::as_str)
            .collect();
        if !dropped.is_empty() {
            log::debug!("Dropping settings not accepted by writer: {}", dropped.join(", "));
        }

        filtered
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    // Inserts entries into the table stored under `key`, creating it (or
    // replacing a non-table value) first.
    fn merge(&mut self, key: &str, entries: impl Iterator<Item = (String, Value)>) {
        let slot = self
            .settings
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            log::warn!("Replacing non-table value stored under {:?}", key);
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(table) = slot {
            table.extend(entries);
        }
    }
}

fn check_lengths(indices: usize, values: usize) -> Result<()> {
    if indices != values {
        return Err(Error::LengthMismatch { indices, values });
    }
    Ok(())
}

fn rgb_value(c: Rgb) -> Value {
    Value::from(c.to_vec())
}
