use crate::utils::linalg;

#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub element: String,
    /// Cartesian position in Angstroms.
    pub position: [f64; 3],
    // Index in the cell the atom was read from. Replicated copies keep the
    // index of the atom they were copied from.
    pub original_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Structure {
    // Lattice vectors: [a_vec, b_vec, c_vec]
    pub lattice: [[f64; 3]; 3],
    pub atoms: Vec<Atom>,
    // Free-form title, e.g. the POSCAR comment line
    pub formula: String,
}

impl Structure {
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Species labels in order of first appearance.
    pub fn species(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for atom in &self.atoms {
            if !out.contains(&atom.element) {
                out.push(atom.element.clone());
            }
        }
        out
    }

    /// Fractional coordinates of every atom, or `None` for a singular lattice.
    pub fn scaled_positions(&self) -> Option<Vec<[f64; 3]>> {
        self.atoms
            .iter()
            .map(|a| linalg::cart_to_frac(a.position, self.lattice))
            .collect()
    }

    pub fn volume(&self) -> f64 {
        linalg::determinant(self.lattice).abs()
    }
}
