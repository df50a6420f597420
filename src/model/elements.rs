// src/model/elements.rs

/// Element symbols indexed by atomic number (index 0 is a dummy).
pub const SYMBOLS: [&str; 119] = [
    "X",
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba",
    "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu",
    "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra",
    "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr",
    "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Returns the Atomic Number (Z) for a given element symbol, 0 if unknown.
///
/// POSCAR species lines sometimes carry pseudopotential suffixes
/// (`Fe_pv`, `O_s`, `Ti/abc`); only the leading symbol is looked at.
pub fn get_atomic_number(element: &str) -> i32 {
    let symbol = element
        .split(|c: char| c == '_' || c == '/' || c == '.')
        .next()
        .unwrap_or("")
        .trim();
    SYMBOLS
        .iter()
        .skip(1)
        .position(|s| *s == symbol)
        .map(|i| i as i32 + 1)
        .unwrap_or(0)
}

/// Returns (radius_in_angstroms, (r, g, b)).
/// Radii are covalent radii; colors follow the Jmol/CPK scheme.
/// These are the fallbacks for species missing from a render configuration.
pub fn get_atom_properties(element: &str) -> (f64, (f64, f64, f64)) {
    let z = get_atomic_number(element);
    match SYMBOLS[z as usize] {
        // --- Period 1 ---
        "H"  => (0.31, (1.000, 1.000, 1.000)),
        "He" => (0.28, (0.851, 1.000, 1.000)),

        // --- Period 2 ---
        "Li" => (1.28, (0.800, 0.502, 1.000)),
        "Be" => (0.96, (0.761, 1.000, 0.000)),
        "B"  => (0.84, (1.000, 0.710, 0.710)),
        "C"  => (0.76, (0.565, 0.565, 0.565)),
        "N"  => (0.71, (0.188, 0.314, 0.973)),
        "O"  => (0.66, (1.000, 0.051, 0.051)),
        "F"  => (0.57, (0.565, 0.878, 0.314)),
        "Ne" => (0.58, (0.702, 0.890, 0.961)),

        // --- Period 3 ---
        "Na" => (1.66, (0.671, 0.361, 0.949)),
        "Mg" => (1.41, (0.541, 1.000, 0.000)),
        "Al" => (1.21, (0.749, 0.651, 0.651)),
        "Si" => (1.11, (0.941, 0.784, 0.627)),
        "P"  => (1.07, (1.000, 0.502, 0.000)),
        "S"  => (1.05, (1.000, 1.000, 0.188)),
        "Cl" => (1.02, (0.122, 0.941, 0.122)),
        "Ar" => (1.06, (0.502, 0.820, 0.890)),

        // --- Period 4 ---
        "K"  => (2.03, (0.561, 0.251, 0.831)),
        "Ca" => (1.76, (0.239, 1.000, 0.000)),
        "Sc" => (1.70, (0.902, 0.902, 0.902)),
        "Ti" => (1.60, (0.749, 0.761, 0.780)),
        "V"  => (1.53, (0.651, 0.651, 0.671)),
        "Cr" => (1.39, (0.541, 0.600, 0.780)),
        "Mn" => (1.39, (0.612, 0.478, 0.780)),
        "Fe" => (1.32, (0.878, 0.400, 0.200)),
        "Co" => (1.26, (0.941, 0.565, 0.627)),
        "Ni" => (1.24, (0.314, 0.816, 0.314)),
        "Cu" => (1.32, (0.784, 0.502, 0.200)),
        "Zn" => (1.22, (0.490, 0.502, 0.690)),
        "Ga" => (1.22, (0.761, 0.561, 0.561)),
        "Ge" => (1.20, (0.400, 0.561, 0.561)),
        "As" => (1.19, (0.741, 0.502, 0.890)),
        "Se" => (1.20, (1.000, 0.631, 0.000)),
        "Br" => (1.20, (0.651, 0.161, 0.161)),
        "Kr" => (1.16, (0.361, 0.722, 0.820)),

        // --- Period 5 (Selected) ---
        "Sr" => (1.95, (0.000, 1.000, 0.000)),
        "Zr" => (1.75, (0.580, 0.878, 0.878)),
        "Mo" => (1.54, (0.329, 0.710, 0.710)),
        "Pd" => (1.39, (0.000, 0.412, 0.522)),
        "Ag" => (1.45, (0.753, 0.753, 0.753)),
        "Cd" => (1.44, (1.000, 0.851, 0.561)),
        "In" => (1.42, (0.651, 0.459, 0.451)),
        "Sn" => (1.39, (0.400, 0.502, 0.502)),
        "I"  => (1.39, (0.580, 0.000, 0.580)),

        // --- Period 6 (Selected) ---
        "Cs" => (2.44, (0.341, 0.090, 0.561)),
        "Ba" => (2.15, (0.000, 0.788, 0.000)),
        "La" => (2.07, (0.439, 0.831, 1.000)),
        "W"  => (1.62, (0.129, 0.580, 0.839)),
        "Pt" => (1.36, (0.816, 0.816, 0.878)),
        "Au" => (1.36, (1.000, 0.820, 0.137)),
        "Hg" => (1.32, (0.722, 0.722, 0.816)),
        "Pb" => (1.46, (0.341, 0.349, 0.380)),
        "Bi" => (1.48, (0.620, 0.310, 0.710)),

        // --- Catch-All (Unknown) ---
        _    => (1.00, (1.000, 0.078, 0.576)), // Hot Pink for errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_numbers() {
        assert_eq!(get_atomic_number("H"), 1);
        assert_eq!(get_atomic_number("Zn"), 30);
        assert_eq!(get_atomic_number("Og"), 118);
        assert_eq!(get_atomic_number("Fe_pv"), 26);
        assert_eq!(get_atomic_number("Xx"), 0);
    }

    #[test]
    fn test_unknown_element_is_hot_pink() {
        let (r, col) = get_atom_properties("Qq");
        assert_eq!(r, 1.0);
        assert_eq!(col, (1.0, 0.078, 0.576));
    }

    #[test]
    fn test_oxygen_defaults() {
        let (r, (red, _, _)) = get_atom_properties("O");
        assert!((r - 0.66).abs() < 1e-12);
        assert_eq!(red, 1.0);
    }
}
