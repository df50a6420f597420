// src/rendering/scene.rs

use nalgebra::{Matrix3, Vector3};

use crate::error::{Error, Result};
use crate::utils::linalg;

/// Parses a rotation string such as `"10x,-20y,5z"` (degrees, applied left
/// to right) into the matrix `R` that rotates row vectors as `p * R`.
/// An empty string is the identity.
pub fn parse_rotation(rotation: &str) -> Result<Matrix3<f64>> {
  let mut rot = Matrix3::identity();
  if rotation.trim().is_empty() {
    return Ok(rot);
  }

  for token in rotation.split(',') {
    let token = token.trim();
    let bad = || Error::InvalidRotation(rotation.to_string());

    let axis = token.chars().last().ok_or_else(bad)?;
    let angle: f64 = token[..token.len() - axis.len_utf8()]
      .trim()
      .parse()
      .map_err(|_| bad())?;
    let (s, c) = angle.to_radians().sin_cos();

    let step = match axis.to_ascii_lowercase() {
      'x' => Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c),
      'y' => Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c),
      'z' => Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0),
      _ => return Err(bad()),
    };
    rot *= step;
  }
  Ok(rot)
}

/// Image-plane extent `(xmin, ymin, xmax, ymax)` in Angstrom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
  pub xmin: f64,
  pub ymin: f64,
  pub xmax: f64,
  pub ymax: f64,
}

impl BBox {
  pub fn from_array(b: [f64; 4]) -> Result<Self> {
    let bbox = Self { xmin: b[0], ymin: b[1], xmax: b[2], ymax: b[3] };
    if !(bbox.width() > 0.0 && bbox.height() > 0.0) {
      return Err(Error::InvalidOption(format!("degenerate bbox {:?}", b)));
    }
    Ok(bbox)
  }

  pub fn width(&self) -> f64 {
    self.xmax - self.xmin
  }

  pub fn height(&self) -> f64 {
    self.ymax - self.ymin
  }

  pub fn center(&self) -> (f64, f64) {
    ((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
  }
}

/// Atoms and cell corners after rotation, in the frame the camera sees.
pub struct Projection {
  pub positions: Vec<[f64; 3]>,
  pub cell_corners: [[f64; 3]; 8],
  pub bbox: BBox,
}

/// Rotates everything and works out the visible box.
///
/// Without an explicit `bbox` the box is the tight fit around the atom
/// spheres and the cell corners. The result is shifted so the box centre
/// sits on the camera axis.
pub fn project(
  positions: &[[f64; 3]],
  radii: &[f64],
  lattice: [[f64; 3]; 3],
  rotation: &Matrix3<f64>,
  bbox: Option<[f64; 4]>,
) -> Result<Projection> {
  let rotate = |p: [f64; 3]| -> [f64; 3] {
    let v = rotation.transpose() * Vector3::from(p);
    [v.x, v.y, v.z]
  };

  let rotated: Vec<[f64; 3]> = positions.iter().map(|p| rotate(*p)).collect();
  let corners = linalg::cell_corners(lattice).map(rotate);

  let bbox = match bbox {
    Some(b) => BBox::from_array(b)?,
    None => {
      let mut min_x = f64::MAX;
      let mut max_x = f64::MIN;
      let mut min_y = f64::MAX;
      let mut max_y = f64::MIN;

      for (p, r) in rotated.iter().zip(radii) {
        min_x = min_x.min(p[0] - r);
        max_x = max_x.max(p[0] + r);
        min_y = min_y.min(p[1] - r);
        max_y = max_y.max(p[1] + r);
      }
      for c in &corners {
        min_x = min_x.min(c[0]);
        max_x = max_x.max(c[0]);
        min_y = min_y.min(c[1]);
        max_y = max_y.max(c[1]);
      }
      BBox::from_array([min_x, min_y, max_x, max_y])?
    }
  };

  let (cx, cy) = bbox.center();
  let shift = |p: [f64; 3]| [p[0] - cx, p[1] - cy, p[2]];

  Ok(Projection {
    positions: rotated.into_iter().map(shift).collect(),
    cell_corners: corners.map(shift),
    bbox,
  })
}
