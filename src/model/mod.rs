//src/model/mod.rs
pub mod elements;
pub mod structure;

pub use elements::{get_atom_properties, get_atomic_number};
pub use structure::{Atom, Structure};
