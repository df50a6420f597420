use std::fmt;

use moyo::base::{AngleTolerance, Cell, Lattice};
use moyo::data::Setting;
use moyo::MoyoDataset;
use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::model::elements::{get_atomic_number, SYMBOLS};
use crate::model::Structure;
use crate::utils::linalg;

/// The `(lattice, positions, numbers)` triple a symmetry search works on.
/// Lattice rows are the cell vectors, positions are fractional.
#[derive(Clone, Debug, PartialEq)]
pub struct SpgCell {
    pub lattice: [[f64; 3]; 3],
    pub positions: Vec<[f64; 3]>,
    pub numbers: Vec<i32>,
}

impl SpgCell {
    pub fn from_structure(structure: &Structure) -> Result<Self> {
        let positions = structure.scaled_positions().ok_or_else(|| {
            Error::InvalidLattice("determinant is zero".to_string())
        })?;

        // Unknown labels still need distinct type ids, or two different
        // species would be treated as the same one.
        let mut unknown: Vec<String> = Vec::new();
        let mut numbers = Vec::with_capacity(structure.len());
        for atom in &structure.atoms {
            let z = get_atomic_number(&atom.element);
            if z > 0 {
                numbers.push(z);
                continue;
            }
            let slot = match unknown.iter().position(|e| *e == atom.element) {
                Some(i) => i,
                None => {
                    log::warn!("Unknown element {:?}, using a placeholder type", atom.element);
                    unknown.push(atom.element.clone());
                    unknown.len() - 1
                }
            };
            numbers.push((SYMBOLS.len() + slot) as i32);
        }

        Ok(Self {
            lattice: structure.lattice,
            positions,
            numbers,
        })
    }
}

// --- Structs for Analysis Results ---
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceGroup {
    pub number: i32,
    pub symbol: String,
    pub system: String,
}

/// Same text spglib's `get_spacegroup` produces, e.g. `Fm-3m (225)`.
impl fmt::Display for SpaceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.number)
    }
}

/// Space group of `cell` at tolerance `symprec` (Angstrom).
pub fn get_spacegroup(cell: &SpgCell, symprec: f64) -> Result<SpaceGroup> {
    if !(symprec > 0.0) {
        return Err(Error::SymmetryNotFound { symprec });
    }
    if cell.positions.len() != cell.numbers.len() || cell.positions.is_empty() {
        return Err(Error::InvalidLattice(format!(
            "{} positions but {} atomic numbers",
            cell.positions.len(),
            cell.numbers.len()
        )));
    }

    let lattice_mat = linalg::lattice_matrix(cell.lattice);
    if lattice_mat.determinant().abs() < 1e-8 {
        return Err(Error::InvalidLattice("determinant is zero".to_string()));
    }

    let positions: Vec<Vector3<f64>> = cell.positions.iter().map(|p| Vector3::from(*p)).collect();
    let moyo_cell = Cell::new(Lattice::new(lattice_mat), positions, cell.numbers.clone());

    let dataset = MoyoDataset::new(&moyo_cell, symprec, AngleTolerance::Default, Setting::Spglib, true)
        .map_err(|e| {
            log::debug!("Moyo symmetry search failed: {:?}", e);
            Error::SymmetryNotFound { symprec }
        })?;

    let number = dataset.number;
    if !(1..=230).contains(&number) {
        return Err(Error::SymmetryNotFound { symprec });
    }

    Ok(SpaceGroup {
        number,
        symbol: SG_SYMBOLS[number as usize].to_string(),
        system: crystal_system(number).to_string(),
    })
}

/// Convenience wrapper: structure in, space group out.
pub fn analyze(structure: &Structure, symprec: f64) -> Result<SpaceGroup> {
    get_spacegroup(&SpgCell::from_structure(structure)?, symprec)
}

pub fn crystal_system(number: i32) -> &'static str {
    match number {
        1..=2 => "Triclinic",
        3..=15 => "Monoclinic",
        16..=74 => "Orthorhombic",
        75..=142 => "Tetragonal",
        143..=167 => "Trigonal",
        168..=194 => "Hexagonal",
        195..=230 => "Cubic",
        _ => "Unknown",
    }
}

// =========================================================================
// DATA: Short Hermann-Mauguin symbols, spglib spelling, indexed by number
// =========================================================================
const SG_SYMBOLS: [&str; 231] = [
    "",
    // Triclinic, monoclinic
    "P1", "P-1", "P2", "P2_1", "C2", "Pm", "Pc", "Cm", "Cc", "P2/m",
    "P2_1/m", "C2/m", "P2/c", "P2_1/c", "C2/c",
    // Orthorhombic
    "P222", "P222_1", "P2_12_12", "P2_12_12_1", "C222_1", "C222", "F222", "I222", "I2_12_12_1", "Pmm2",
    "Pmc2_1", "Pcc2", "Pma2", "Pca2_1", "Pnc2", "Pmn2_1", "Pba2", "Pna2_1", "Pnn2", "Cmm2",
    "Cmc2_1", "Ccc2", "Amm2", "Aem2", "Ama2", "Aea2", "Fmm2", "Fdd2", "Imm2", "Iba2",
    "Ima2", "Pmmm", "Pnnn", "Pccm", "Pban", "Pmma", "Pnna", "Pmna", "Pcca", "Pbam",
    "Pccn", "Pbcm", "Pnnm", "Pmmn", "Pbcn", "Pbca", "Pnma", "Cmcm", "Cmce", "Cmmm",
    "Cccm", "Cmme", "Ccce", "Fmmm", "Fddd", "Immm", "Ibam", "Ibca", "Imma",
    // Tetragonal
    "P4", "P4_1", "P4_2", "P4_3", "I4", "I4_1", "P-4", "I-4", "P4/m", "P4_2/m",
    "P4/n", "P4_2/n", "I4/m", "I4_1/a", "P422", "P42_12", "P4_122", "P4_12_12", "P4_222", "P4_22_12",
    "P4_322", "P4_32_12", "I422", "I4_122", "P4mm", "P4bm", "P4_2cm", "P4_2nm", "P4cc", "P4nc",
    "P4_2mc", "P4_2bc", "I4mm", "I4cm", "I4_1md", "I4_1cd", "P-42m", "P-42c", "P-42_1m", "P-42_1c",
    "P-4m2", "P-4c2", "P-4b2", "P-4n2", "I-4m2", "I-4c2", "I-42m", "I-42d", "P4/mmm", "P4/mcc",
    "P4/nbm", "P4/nnc", "P4/mbm", "P4/mnc", "P4/nmm", "P4/ncc", "P4_2/mmc", "P4_2/mcm", "P4_2/nbc", "P4_2/nnm",
    "P4_2/mbc", "P4_2/mnm", "P4_2/nmc", "P4_2/ncm", "I4/mmm", "I4/mcm", "I4_1/amd", "I4_1/acd",
    // Trigonal
    "P3", "P3_1", "P3_2", "R3", "P-3", "R-3", "P312", "P321", "P3_112", "P3_121",
    "P3_212", "P3_221", "R32", "P3m1", "P31m", "P3c1", "P31c", "R3m", "R3c", "P-31m",
    "P-31c", "P-3m1", "P-3c1", "R-3m", "R-3c",
    // Hexagonal
    "P6", "P6_1", "P6_5", "P6_2", "P6_4", "P6_3", "P-6", "P6/m", "P6_3/m", "P622",
    "P6_122", "P6_522", "P6_222", "P6_422", "P6_322", "P6mm", "P6cc", "P6_3cm", "P6_3mc", "P-6m2",
    "P-6c2", "P-62m", "P-62c", "P6/mmm", "P6/mcc", "P6_3/mcm", "P6_3/mmc",
    // Cubic
    "P23", "F23", "I23", "P2_13", "I2_13", "Pm-3", "Pn-3", "Fm-3", "Fd-3", "Im-3",
    "Pa-3", "Ia-3", "P432", "P4_232", "F432", "F4_132", "I432", "P4_332", "P4_132", "I4_132",
    "P-43m", "F-43m", "I-43m", "P-43n", "F-43c", "I-43d", "Pm-3m", "Pn-3n", "Pm-3n", "Pn-3m",
    "Fm-3m", "Fm-3c", "Fd-3m", "Fd-3c", "Im-3m", "Ia-3d",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Atom;

    fn cubic(a: f64, sites: &[(&str, [f64; 3])]) -> Structure {
        let lattice = [[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]];
        let atoms = sites
            .iter()
            .enumerate()
            .map(|(i, (el, frac))| Atom {
                element: el.to_string(),
                position: linalg::frac_to_cart(*frac, lattice),
                original_index: i,
            })
            .collect();
        Structure { lattice, atoms, formula: String::new() }
    }

    fn rocksalt() -> Structure {
        cubic(
            5.64,
            &[
                ("Na", [0.0, 0.0, 0.0]),
                ("Na", [0.0, 0.5, 0.5]),
                ("Na", [0.5, 0.0, 0.5]),
                ("Na", [0.5, 0.5, 0.0]),
                ("Cl", [0.5, 0.0, 0.0]),
                ("Cl", [0.0, 0.5, 0.0]),
                ("Cl", [0.0, 0.0, 0.5]),
                ("Cl", [0.5, 0.5, 0.5]),
            ],
        )
    }

    #[test]
    fn test_symbol_table_lookups() {
        assert_eq!(SG_SYMBOLS[14], "P2_1/c");
        assert_eq!(SG_SYMBOLS[62], "Pnma");
        assert_eq!(SG_SYMBOLS[186], "P6_3mc");
        assert_eq!(SG_SYMBOLS[194], "P6_3/mmc");
        assert_eq!(SG_SYMBOLS[225], "Fm-3m");
        assert_eq!(SG_SYMBOLS[230], "Ia-3d");
    }

    #[test]
    fn test_crystal_system() {
        assert_eq!(crystal_system(1), "Triclinic");
        assert_eq!(crystal_system(186), "Hexagonal");
        assert_eq!(crystal_system(225), "Cubic");
        assert_eq!(crystal_system(0), "Unknown");
    }

    #[test]
    fn test_cell_from_structure() {
        let cell = SpgCell::from_structure(&rocksalt()).unwrap();
        assert_eq!(cell.numbers[0], 11);
        assert_eq!(cell.numbers[7], 17);
        assert!((cell.positions[7][2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_species_stay_distinct() {
        let s = cubic(3.0, &[("Aa", [0.0, 0.0, 0.0]), ("Bb", [0.5, 0.5, 0.5]), ("Aa", [0.5, 0.0, 0.0])]);
        let cell = SpgCell::from_structure(&s).unwrap();
        assert_eq!(cell.numbers[0], cell.numbers[2]);
        assert_ne!(cell.numbers[0], cell.numbers[1]);
        assert!(cell.numbers.iter().all(|&n| n > 118));
    }

    #[test]
    fn test_rocksalt_is_fm3m() {
        let sg = analyze(&rocksalt(), 1e-3).unwrap();
        assert_eq!(sg.number, 225);
        assert_eq!(sg.to_string(), "Fm-3m (225)");
        assert_eq!(sg.system, "Cubic");
    }

    #[test]
    fn test_cscl_is_pm3m() {
        let s = cubic(4.12, &[("Cs", [0.0, 0.0, 0.0]), ("Cl", [0.5, 0.5, 0.5])]);
        let sg = analyze(&s, 1e-3).unwrap();
        assert_eq!(sg.number, 221);
        assert_eq!(sg.symbol, "Pm-3m");
    }

    #[test]
    fn test_bad_inputs() {
        let mut cell = SpgCell::from_structure(&rocksalt()).unwrap();
        assert!(matches!(get_spacegroup(&cell, 0.0), Err(Error::SymmetryNotFound { .. })));
        cell.numbers.pop();
        assert!(matches!(get_spacegroup(&cell, 1e-3), Err(Error::InvalidLattice(_))));
    }
}
