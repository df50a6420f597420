pub mod supercell;
