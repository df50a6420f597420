// src/rendering/pov.rs

use std::collections::BTreeMap;
use std::io::Write;

use serde::Deserialize;
use serde_json::Value;

use super::config::{Rgb, Settings};
use super::scene::{self, BBox, Projection};
use crate::error::{Error, Result};
use crate::model::{get_atom_properties, Structure};

/// Keys the scene writer understands. Anything else must be filtered out
/// before [`write_pov`] is called.
pub const SCENE_KEYS: &[&str] = &[
  "radii",
  "colors",
  "textures",
  "atom_colors",
  "atom_textures",
  "transmittances",
  "rotation",
  "bbox",
  "show_unit_cell",
  "cell_line_width",
  "background",
  "camera_type",
  "camera_dist",
];

pub const DEFAULT_TEXTURE: &str = "ase3";

/// Finish presets declared at the top of every scene.
pub const TEXTURES: &[(&str, &str)] = &[
  ("simple", "finish {phong 0.7}"),
  ("pale", "finish {ambient 0.5 diffuse 0.85 roughness 0.001 specular 0.200}"),
  ("intermediate", "finish {ambient 0.3 diffuse 0.6 specular 0.1 roughness 0.04}"),
  ("vmd", "finish {ambient 0.0 diffuse 0.65 phong 0.1 phong_size 40.0 specular 0.5}"),
  ("jmol", "finish {ambient 0.2 diffuse 0.6 specular 1 roughness 0.001 metallic}"),
  ("ase2", "finish {ambient 0.05 brilliance 3 diffuse 0.6 metallic specular 0.7 roughness 0.04 reflection 0.15}"),
  ("ase3", "finish {ambient 0.15 brilliance 2 diffuse 0.6 metallic specular 1.0 roughness 0.001 reflection 0.0}"),
  ("glass", "finish {ambient 0.05 diffuse 0.3 specular 1.0 roughness 0.001}"),
  ("glass2", "finish {ambient 0.01 diffuse 0.3 specular 1.0 reflection 0.25 roughness 0.001}"),
];

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraType {
  Orthographic,
  Perspective,
}

/// Typed view of the scene keys. Unknown keys are rejected.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneOptions {
  pub radii: BTreeMap<String, f64>,
  pub colors: BTreeMap<String, Rgb>,
  pub textures: BTreeMap<String, String>,
  pub atom_colors: BTreeMap<usize, Rgb>,
  pub atom_textures: BTreeMap<usize, String>,
  pub transmittances: BTreeMap<String, f64>,
  pub rotation: String,
  pub bbox: Option<[f64; 4]>,
  pub show_unit_cell: bool,
  pub cell_line_width: f64,
  pub background: Rgb,
  pub camera_type: CameraType,
  pub camera_dist: f64,
}

impl Default for SceneOptions {
  fn default() -> Self {
    Self {
      radii: BTreeMap::new(),
      colors: BTreeMap::new(),
      textures: BTreeMap::new(),
      atom_colors: BTreeMap::new(),
      atom_textures: BTreeMap::new(),
      transmittances: BTreeMap::new(),
      rotation: String::new(),
      bbox: None,
      show_unit_cell: true,
      cell_line_width: 0.05,
      background: [1.0, 1.0, 1.0],
      camera_type: CameraType::Orthographic,
      camera_dist: 50.0,
    }
  }
}

impl SceneOptions {
  pub fn from_settings(settings: &Settings) -> Result<Self> {
    serde_json::from_value(Value::Object(settings.clone()))
      .map_err(|e| Error::InvalidOption(e.to_string()))
  }
}

/// Per-atom look after species defaults and overrides are resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomStyle {
  pub radius: f64,
  pub color: Rgb,
  pub texture: String,
  pub transmit: f64,
}

/// Resolves every atom's look: override > species table > element default.
pub fn resolve_styles(structure: &Structure, opts: &SceneOptions) -> Result<Vec<AtomStyle>> {
  let count = structure.len();
  for &index in opts.atom_colors.keys().chain(opts.atom_textures.keys()) {
    if index >= count {
      return Err(Error::AtomIndexOutOfRange { index, count });
    }
  }

  let mut styles = Vec::with_capacity(count);
  for (i, atom) in structure.atoms.iter().enumerate() {
    let (default_radius, (r, g, b)) = get_atom_properties(&atom.element);

    let radius = opts.radii.get(&atom.element).copied().unwrap_or(default_radius);
    let color = opts
      .atom_colors
      .get(&i)
      .or_else(|| opts.colors.get(&atom.element))
      .copied()
      .unwrap_or([r, g, b]);
    let texture = opts
      .atom_textures
      .get(&i)
      .or_else(|| opts.textures.get(&atom.element))
      .map(String::as_str)
      .unwrap_or(DEFAULT_TEXTURE);

    if !TEXTURES.iter().any(|(name, _)| *name == texture) {
      return Err(Error::UnknownTexture(texture.to_string()));
    }

    styles.push(AtomStyle {
      radius,
      color,
      texture: texture.to_string(),
      transmit: opts.transmittances.get(&atom.element).copied().unwrap_or(0.0),
    });
  }
  Ok(styles)
}

/// What was written, for the render control file and the log.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSummary {
  pub atoms: usize,
  pub bbox: BBox,
}

impl SceneSummary {
  /// height / width of the visible box.
  pub fn aspect(&self) -> f64 {
    self.bbox.height() / self.bbox.width()
  }
}

/// Writes a POV-Ray scene for `structure` using the scene keys in
/// `settings`. Keys outside [`SCENE_KEYS`] and malformed values are errors.
/// `name` labels write failures on `out`.
pub fn write_pov<W: Write>(out: &mut W, name: &str, structure: &Structure, settings: &Settings) -> Result<SceneSummary> {
  let opts = SceneOptions::from_settings(settings)?;
  let styles = resolve_styles(structure, &opts)?;
  let rotation = scene::parse_rotation(&opts.rotation)?;

  let positions: Vec<[f64; 3]> = structure.atoms.iter().map(|a| a.position).collect();
  let radii: Vec<f64> = styles.iter().map(|s| s.radius).collect();
  let proj = scene::project(&positions, &radii, structure.lattice, &rotation, opts.bbox)?;

  write_header(out, &opts, &proj.bbox).map_err(|e| Error::io(name, e))?;
  write_body(out, &proj, &styles, opts.show_unit_cell).map_err(|e| Error::io(name, e))?;

  Ok(SceneSummary {
    atoms: structure.len(),
    bbox: proj.bbox,
  })
}

// Corner indices follow linalg::cell_corners (bit 0 = a, bit 1 = b, bit 2 = c).
const CELL_EDGES: [(usize, usize); 12] = [
  (0, 1), (2, 3), (4, 5), (6, 7),
  (0, 2), (1, 3), (4, 6), (5, 7),
  (0, 4), (1, 5), (2, 6), (3, 7),
];

fn write_header<W: Write>(out: &mut W, opts: &SceneOptions, bbox: &BBox) -> std::io::Result<()> {
  let [br, bg, bb] = opts.background;
  let (w, h) = (bbox.width(), bbox.height());

  writeln!(out, "#include \"colors.inc\"")?;
  writeln!(out, "#include \"finish.inc\"")?;
  writeln!(out)?;
  writeln!(out, "global_settings {{assumed_gamma 1 max_trace_level 6}}")?;
  writeln!(out, "background {{color rgb <{:.2}, {:.2}, {:.2}>}}", br, bg, bb)?;

  let camera = match opts.camera_type {
    CameraType::Orthographic => "orthographic\n  angle 0",
    CameraType::Perspective => "perspective",
  };
  writeln!(out, "camera {{{}", camera)?;
  writeln!(out, "  right -{:.2}*x up {:.2}*y", w, h)?;
  writeln!(out, "  direction 1.00*z")?;
  writeln!(out, "  location <0,0,{:.2}> look_at <0,0,0>}}", opts.camera_dist)?;
  writeln!(out, "light_source {{<{:.2},{:.2},{:.2}> color White", 2.0, 3.0, 40.0)?;
  writeln!(out, "  area_light <0.70, 0, 0>, <0, 0.70, 0>, 3, 3")?;
  writeln!(out, "  adaptive 1 jitter}}")?;
  writeln!(out)?;

  for (name, finish) in TEXTURES {
    writeln!(out, "#declare {} = {}", name, finish)?;
  }
  writeln!(out, "#declare Rcell = {:.3};", opts.cell_line_width)?;
  writeln!(out)?;
  writeln!(out, "#macro atom(LOC, R, COL, TRANS, FIN)")?;
  writeln!(out, "  sphere{{LOC, R texture{{pigment{{color COL transmit TRANS}} finish{{FIN}}}}}}")?;
  writeln!(out, "#end")?;
  writeln!(out)?;
  Ok(())
}

fn write_body<W: Write>(
  out: &mut W,
  proj: &Projection,
  styles: &[AtomStyle],
  show_unit_cell: bool,
) -> std::io::Result<()> {
  for (i, (p, style)) in proj.positions.iter().zip(styles).enumerate() {
    writeln!(
      out,
      "atom(<{:8.2},{:8.2},{:8.2}>, {:4.2}, rgb <{:4.2}, {:4.2}, {:4.2}>, {:.1}, {}) // #{}",
      p[0], p[1], p[2], style.radius, style.color[0], style.color[1], style.color[2],
      style.transmit, style.texture, i
    )?;
  }

  if show_unit_cell {
    writeln!(out)?;
    writeln!(out, "merge {{")?;
    let c = &proj.cell_corners;
    for (a, b) in CELL_EDGES {
      writeln!(
        out,
        "  cylinder {{<{:6.2},{:6.2},{:6.2}>, <{:6.2},{:6.2},{:6.2}>, Rcell pigment {{Black}}}}",
        c[a][0], c[a][1], c[a][2], c[b][0], c[b][1], c[b][2]
      )?;
    }
    writeln!(out, "}}")?;
  }
  Ok(())
}
