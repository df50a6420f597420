// src/utils/report.rs

use crate::model::structure::Structure;
use crate::physics::analysis::symmetry::SpaceGroup;
use std::collections::BTreeMap;

/// Short text description of a loaded structure, logged at debug level.
pub fn structure_summary(structure: &Structure, filename: &str) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for atom in &structure.atoms {
        *counts.entry(atom.element.as_str()).or_insert(0) += 1;
    }

    let formula_str: String = counts
        .iter()
        .map(|(el, count)| format!("{}{}", el, count))
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str(&format!("File: {}\n", filename));
    out.push_str(&format!("Formula: {}\n", formula_str));
    out.push_str(&format!("Volume: {:.4} A^3\n", structure.volume()));
    out.push_str("--------------------------------------------------\n");
    out.push_str(&format!(
        "{:<8} {:<8} {:<10} {:<10} {:<10}\n",
        "Index", "Element", "X", "Y", "Z"
    ));
    out.push_str("--------------------------------------------------\n");

    for (i, atom) in structure.atoms.iter().take(20).enumerate() {
        out.push_str(&format!(
            "{:<8} {:<8} {:<10.4} {:<10.4} {:<10.4}\n",
            i, atom.element, atom.position[0], atom.position[1], atom.position[2]
        ));
    }

    if structure.atoms.len() > 20 {
        out.push_str(&format!("... and {} more atoms.\n", structure.atoms.len() - 20));
    }

    out
}

/// The block `cview-spg` prints on success.
pub fn spacegroup_report(spacegroup: &SpaceGroup) -> String {
    let rule = "-----------------------";
    format!("Spacegroup information.\n{}\n{}\n{}\n", rule, spacegroup, rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Atom;

    #[test]
    fn test_spacegroup_report_framing() {
        let sg = SpaceGroup {
            number: 225,
            symbol: "Fm-3m".into(),
            system: "Cubic".into(),
        };
        let text = spacegroup_report(&sg);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Spacegroup information.",
                "-----------------------",
                "Fm-3m (225)",
                "-----------------------",
            ]
        );
    }

    #[test]
    fn test_structure_summary() {
        let atoms = (0..25)
            .map(|i| Atom {
                element: if i % 5 == 0 { "Zn".into() } else { "O".into() },
                position: [i as f64, 0.0, 0.0],
                original_index: i,
            })
            .collect();
        let s = Structure {
            lattice: [[30.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            atoms,
            formula: String::new(),
        };
        let text = structure_summary(&s, "POSCAR");
        assert!(text.contains("Formula: O20 Zn5\n"));
        assert!(text.contains("... and 5 more atoms."));
    }
}
