use crate::error::{Error, Result};
use crate::model::structure::{Atom, Structure};

/// Periodic replication of `structure` by `[na, nb, nc]`.
///
/// Atoms are emitted block by block with `a` as the outermost loop and `c`
/// the innermost, each block a full copy of the input in its original order,
/// so per-atom indices into the result follow [`replicated_index`].
pub fn repeat(structure: &Structure, reps: [u32; 3]) -> Result<Structure> {
    if reps.iter().any(|&n| n == 0) {
        return Err(Error::InvalidRepeat(reps));
    }
    let total = replicated_len(structure.len(), reps).ok_or(Error::InvalidRepeat(reps))?;
    let [nx, ny, nz] = reps;

    let vec_a = structure.lattice[0];
    let vec_b = structure.lattice[1];
    let vec_c = structure.lattice[2];

    let mut new_atoms = Vec::with_capacity(total);

    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                let translation = [
                    vec_a[0] * x as f64 + vec_b[0] * y as f64 + vec_c[0] * z as f64,
                    vec_a[1] * x as f64 + vec_b[1] * y as f64 + vec_c[1] * z as f64,
                    vec_a[2] * x as f64 + vec_b[2] * y as f64 + vec_c[2] * z as f64,
                ];

                for atom in &structure.atoms {
                    let mut new_atom = atom.clone();
                    new_atom.position[0] += translation[0];
                    new_atom.position[1] += translation[1];
                    new_atom.position[2] += translation[2];
                    new_atoms.push(new_atom);
                }
            }
        }
    }

    let new_lattice = [
        [vec_a[0] * nx as f64, vec_a[1] * nx as f64, vec_a[2] * nx as f64],
        [vec_b[0] * ny as f64, vec_b[1] * ny as f64, vec_b[2] * ny as f64],
        [vec_c[0] * nz as f64, vec_c[1] * nz as f64, vec_c[2] * nz as f64],
    ];

    log::debug!(
        "Repeated {} atoms {}x{}x{} -> {} atoms",
        structure.len(),
        nx,
        ny,
        nz,
        new_atoms.len()
    );

    Ok(Structure {
        lattice: new_lattice,
        atoms: new_atoms,
        formula: format!("{} ({}x{}x{} Supercell)", structure.formula, nx, ny, nz),
    })
}

// Atom count of the replicated cell, or None when it cannot be allocated.
fn replicated_len(n_atoms: usize, reps: [u32; 3]) -> Option<usize> {
    let total = reps
        .iter()
        .try_fold(n_atoms, |acc, &n| acc.checked_mul(n as usize))?;
    let bytes = total.checked_mul(std::mem::size_of::<Atom>())?;
    (bytes <= isize::MAX as usize).then_some(total)
}

/// Index in the repeated structure of atom `atom` of the original cell,
/// copied into block `cell`. `n_atoms` is the original atom count.
pub fn replicated_index(n_atoms: usize, reps: [u32; 3], cell: [u32; 3], atom: usize) -> usize {
    let [_, ny, nz] = reps;
    let [ia, ib, ic] = cell;
    let block = (ia as usize * ny as usize + ib as usize) * nz as usize + ic as usize;
    block * n_atoms + atom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_atom_cell() -> Structure {
        Structure {
            lattice: [[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]],
            atoms: vec![
                Atom { element: "Zn".into(), position: [0.0, 0.0, 0.0], original_index: 0 },
                Atom { element: "O".into(), position: [1.0, 1.5, 2.0], original_index: 1 },
            ],
            formula: "ZnO".into(),
        }
    }

    #[test]
    fn test_repeat_counts_and_lattice() {
        let s = repeat(&two_atom_cell(), [2, 2, 1]).unwrap();
        assert_eq!(s.len(), 8);
        assert_eq!(s.lattice[0], [4.0, 0.0, 0.0]);
        assert_eq!(s.lattice[1], [0.0, 6.0, 0.0]);
        assert_eq!(s.lattice[2], [0.0, 0.0, 4.0]);
        assert_eq!(s.formula, "ZnO (2x2x1 Supercell)");
    }

    #[test]
    fn test_ordering_matches_replicated_index() {
        let base = two_atom_cell();
        let reps = [2, 3, 2];
        let s = repeat(&base, reps).unwrap();
        for ia in 0..2 {
            for ib in 0..3 {
                for ic in 0..2 {
                    for (i, atom) in base.atoms.iter().enumerate() {
                        let idx = replicated_index(base.len(), reps, [ia, ib, ic], i);
                        let got = &s.atoms[idx];
                        assert_eq!(got.element, atom.element);
                        assert_eq!(got.original_index, i);
                        let expect = [
                            atom.position[0] + 2.0 * ia as f64,
                            atom.position[1] + 3.0 * ib as f64,
                            atom.position[2] + 4.0 * ic as f64,
                        ];
                        assert_eq!(got.position, expect);
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_factor_rejected() {
        assert!(matches!(
            repeat(&two_atom_cell(), [1, 0, 1]),
            Err(Error::InvalidRepeat([1, 0, 1]))
        ));
    }

    #[test]
    fn test_oversized_repeat_rejected() {
        let reps = [u32::MAX, u32::MAX, 2];
        assert!(matches!(
            repeat(&two_atom_cell(), reps),
            Err(Error::InvalidRepeat(r)) if r == reps
        ));
        assert_eq!(replicated_len(2, [u32::MAX, u32::MAX, u32::MAX]), None);
        assert_eq!(replicated_len(2, [2, 3, 4]), Some(48));
    }
}
