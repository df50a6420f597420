// src/io/mod.rs
pub mod poscar;

use crate::error::Result;
use crate::model::Structure;

/// Loads a structure, picking the reader from the file name.
///
/// Only the VASP family (POSCAR, CONTCAR, *.vasp) is supported; anything
/// else is handed to the POSCAR reader as well.
pub fn load_structure(path: &str) -> Result<Structure> {
    let p = path.to_lowercase();

    if !(p.ends_with(".vasp") || p.contains("poscar") || p.contains("contcar")) {
        log::debug!("Unrecognised extension for {}, reading as POSCAR", path);
    }
    let structure = poscar::parse(path)?;
    log::info!("Loaded {} atoms from {}", structure.len(), path);
    Ok(structure)
}
