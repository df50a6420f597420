// src/io/poscar.rs

use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::error::{Error, Result};
use crate::model::{get_atomic_number, Atom, Structure};
use crate::utils::linalg;

/// Reads a POSCAR/CONTCAR file from disk.
pub fn parse(path: &str) -> Result<Structure> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read(BufReader::new(file), path)
}

/// Reads POSCAR text. `name` is only used in error messages.
///
/// Handles both VASP 5 (species line present) and VASP 4 files. For VASP 4
/// the species are read from the comment line: every word that spells a
/// chemical formula ("ZnO", "Zn-O", "Si") contributes its element symbols,
/// other words are ignored, and the first symbols are paired with the counts.
pub fn read<R: BufRead>(reader: R, name: &str) -> Result<Structure> {
    let mut lines = Lines::new(reader, name);

    let comment = lines.next_line("comment")?;

    // Scale (negative means "target volume")
    let scale_line = lines.next_line("scale factor")?;
    let scale: f64 = lines.number(first_token(&scale_line), "scale factor")?;

    // Lattice
    let mut lattice = [[0.0; 3]; 3];
    for row in lattice.iter_mut() {
        let line = lines.next_line("lattice vector")?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(lines.error("lattice vector needs three components"));
        }
        for k in 0..3 {
            row[k] = lines.number(parts[k], "lattice component")?;
        }
    }

    let factor = if scale < 0.0 {
        let raw_volume = linalg::determinant(lattice).abs();
        if raw_volume < 1e-12 {
            return Err(lines.error("zero-volume lattice with negative scale factor"));
        }
        (-scale / raw_volume).cbrt()
    } else if scale == 0.0 {
        return Err(lines.error("scale factor must be non-zero"));
    } else {
        scale
    };
    for row in lattice.iter_mut() {
        for v in row.iter_mut() {
            *v *= factor;
        }
    }

    // Elements & Counts
    let line6 = lines.next_line("species or counts")?;
    let has_species = line6
        .trim()
        .chars()
        .next()
        .map_or(false, |c| c.is_alphabetic());

    let counts_line = if has_species {
        lines.next_line("atom counts")?
    } else {
        line6.clone()
    };

    let mut counts = Vec::new();
    for tok in counts_line.split('!').next().unwrap_or("").split_whitespace() {
        let n: usize = tok
            .parse()
            .map_err(|_| lines.error(&format!("invalid atom count {:?}", tok)))?;
        counts.push(n);
    }
    if counts.is_empty() || counts.iter().sum::<usize>() == 0 {
        return Err(lines.error("no atoms declared"));
    }

    let species_tokens: Vec<String> = if has_species {
        let labels: Vec<String> = line6.split_whitespace().map(str::to_string).collect();
        if labels.len() != counts.len() {
            return Err(lines.error(&format!(
                "{} species labels but {} atom counts",
                labels.len(),
                counts.len()
            )));
        }
        labels
    } else {
        let mut symbols = species_from_comment(&comment);
        if symbols.len() < counts.len() {
            return Err(lines.error(&format!(
                "VASP 4 file: comment line names {} elements but there are {} atom counts",
                symbols.len(),
                counts.len()
            )));
        }
        symbols.truncate(counts.len());
        symbols
    };

    // Mode (optionally preceded by "Selective dynamics")
    let mut mode_line = lines.next_line("coordinate mode")?;
    if mode_line.trim_start().starts_with(['s', 'S']) {
        mode_line = lines.next_line("coordinate mode")?;
    }
    let is_direct = !mode_line.trim_start().starts_with(['c', 'C', 'k', 'K']);

    // Atoms
    let mut atoms = Vec::new();
    for (elem_name, &count) in species_tokens.iter().zip(&counts) {
        for _ in 0..count {
            let line = lines.next_line("atomic position")?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return Err(lines.error("atomic position needs three components"));
            }
            let mut p = [0.0; 3];
            for k in 0..3 {
                p[k] = lines.number(parts[k], "coordinate")?;
            }

            let position = if is_direct {
                linalg::frac_to_cart(p, lattice)
            } else {
                [p[0] * factor, p[1] * factor, p[2] * factor]
            };

            let idx = atoms.len();
            atoms.push(Atom {
                element: elem_name.clone(),
                position,
                original_index: idx,
            });
        }
    }

    Ok(Structure {
        lattice,
        atoms,
        formula: comment.trim().to_string(),
    })
}

// Element symbols spelled by the words of a VASP 4 comment line.
fn species_from_comment(comment: &str) -> Vec<String> {
    let mut symbols = Vec::new();
    let words = comment
        .split(|c: char| c.is_whitespace() || "-_,.=()".contains(c))
        .map(|w| w.trim_matches(|c: char| c.is_ascii_digit()))
        .filter(|w| !w.is_empty());
    for word in words {
        match formula_symbols(word) {
            Some(found) => symbols.extend(found),
            None => log::debug!("Ignoring {:?} in the POSCAR comment line", word),
        }
    }
    symbols
}

// "ZnO" -> ["Zn", "O"], "Al2O3" -> ["Al", "O"]. None unless every part is a
// known element.
fn formula_symbols(word: &str) -> Option<Vec<String>> {
    let mut symbols: Vec<String> = Vec::new();
    for c in word.chars() {
        if c.is_ascii_uppercase() {
            symbols.push(c.to_string());
        } else if c.is_ascii_lowercase() {
            symbols.last_mut()?.push(c);
        } else if !c.is_ascii_digit() {
            return None;
        }
    }
    if symbols.is_empty() || symbols.iter().any(|s| get_atomic_number(s) == 0) {
        return None;
    }
    Some(symbols)
}

fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

// Line cursor that remembers where it is for error messages.
struct Lines<R> {
    inner: std::io::Lines<R>,
    name: String,
    line_no: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R, name: &str) -> Self {
        Self {
            inner: reader.lines(),
            name: name.to_string(),
            line_no: 0,
        }
    }

    fn next_line(&mut self, what: &str) -> Result<String> {
        self.line_no += 1;
        match self.inner.next() {
            Some(Ok(line)) => Ok(line),
            Some(Err(e)) => Err(Error::io(self.name.clone(), e)),
            None => Err(self.error(&format!("unexpected end of file, expected {}", what))),
        }
    }

    fn number(&self, tok: &str, what: &str) -> Result<f64> {
        tok.parse::<f64>()
            .map_err(|_| self.error(&format!("invalid {} {:?}", what, tok)))
    }

    fn error(&self, message: &str) -> Error {
        Error::Parse {
            path: self.name.clone(),
            line: self.line_no,
            message: message.to_string(),
        }
    }
}
