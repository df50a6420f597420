// src/rendering/launch.rs

use std::io::Write;
use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use serde_json::Value;

use super::config::Settings;
use crate::error::{Error, Result};

/// Keys that control the `povray` run rather than the scene itself.
pub const LAUNCH_KEYS: &[&str] = &[
  "canvas_width",
  "canvas_height",
  "transparent",
  "antialias",
  "run_povray",
  "display",
  "pause",
];

const DEFAULT_WIDTH: u32 = 640;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchOptions {
  pub canvas_width: Option<u32>,
  pub canvas_height: Option<u32>,
  pub transparent: bool,
  pub antialias: Option<f64>,
  pub run_povray: bool,
  pub display: bool,
  pub pause: bool,
}

impl Default for LaunchOptions {
  fn default() -> Self {
    Self {
      canvas_width: None,
      canvas_height: None,
      transparent: true,
      antialias: Some(0.1),
      run_povray: false,
      display: false,
      pause: false,
    }
  }
}

impl LaunchOptions {
  pub fn from_settings(settings: &Settings) -> Result<Self> {
    serde_json::from_value(Value::Object(settings.clone()))
      .map_err(|e| Error::InvalidOption(e.to_string()))
  }

  /// Pixel size of the picture. A missing dimension follows the aspect
  /// ratio (`height / width`) of the scene.
  pub fn canvas(&self, aspect: f64) -> (u32, u32) {
    match (self.canvas_width, self.canvas_height) {
      (Some(w), Some(h)) => (w, h),
      (None, Some(h)) => (((h as f64) / aspect).round().max(1.0) as u32, h),
      (Some(w), None) => (w, ((w as f64) * aspect).round().max(1.0) as u32),
      (None, None) => (DEFAULT_WIDTH, ((DEFAULT_WIDTH as f64) * aspect).round().max(1.0) as u32),
    }
  }
}

fn on_off(b: bool) -> &'static str {
  if b { "True" } else { "False" }
}

/// Writes the POV-Ray control (`.ini`) file for rendering `pov_name` to `png_name`.
pub fn write_ini<W: Write>(
  out: &mut W,
  pov_name: &str,
  png_name: &str,
  opts: &LaunchOptions,
  aspect: f64,
) -> std::io::Result<()> {
  let (width, height) = opts.canvas(aspect);

  writeln!(out, "Input_File_Name={}", pov_name)?;
  writeln!(out, "Output_to_File=True")?;
  writeln!(out, "Output_File_Type=N")?;
  writeln!(out, "Output_File_Name={}", png_name)?;
  writeln!(out, "Output_Alpha={}", on_off(opts.transparent))?;
  writeln!(out, "Width={}", width)?;
  writeln!(out, "Height={}", height)?;
  match opts.antialias {
    Some(threshold) => {
      writeln!(out, "Antialias=True")?;
      writeln!(out, "Antialias_Threshold={}", threshold)?;
    }
    None => writeln!(out, "Antialias=False")?,
  }
  writeln!(out, "Display={}", on_off(opts.display))?;
  writeln!(out, "Pause_When_Done={}", on_off(opts.pause))?;
  writeln!(out, "Verbose=False")?;
  Ok(())
}

/// Runs `povray` on a control file, from the directory the file lives in.
pub fn run_povray(ini_path: &Path) -> Result<()> {
  let dir = ini_path.parent().filter(|d| !d.as_os_str().is_empty());
  let file = ini_path.file_name().unwrap_or(ini_path.as_os_str());

  let mut cmd = Command::new("povray");
  cmd.arg(file);
  if let Some(dir) = dir {
    cmd.current_dir(dir);
  }

  log::info!("Running povray {}", ini_path.display());
  let status = cmd.status().map_err(|e| Error::io("povray", e))?;
  if !status.success() {
    return Err(Error::PovRay(status.to_string()));
  }
  Ok(())
}
