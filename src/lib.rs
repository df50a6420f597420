//! POV-Ray pictures and space-group lookup for crystal structures.
//!
//! `cview-pictures` reads a POSCAR, repeats it, assembles a
//! [`RenderConfig`](rendering::RenderConfig) from a style and writes a
//! POV-Ray scene. `cview-spg` prints the space group of a POSCAR.

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod rendering;
pub mod utils;

pub use error::{Error, Result};
