use clap::Parser;
use cview_tools::physics::analysis::symmetry::{self, SpgCell};
use cview_tools::utils::{logger, report};
use cview_tools::{io, Result};

/// Print the space group of a crystal structure.
#[derive(Parser)]
#[command(name = "cview-spg")]
#[command(version)]
struct Cli {
    /// Path to input file
    #[arg(short, long, default_value = "POSCAR")]
    file: String,

    /// Precision for symmetry test
    #[arg(short, long, default_value_t = 0.001)]
    prec: f64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let structure = io::load_structure(&cli.file)?;
    log::debug!("{}", report::structure_summary(&structure, &cli.file));

    let cell = SpgCell::from_structure(&structure)?;
    let spacegroup = symmetry::get_spacegroup(&cell, cli.prec)?;
    log::debug!("Crystal system: {}", spacegroup.system);

    print!("{}", report::spacegroup_report(&spacegroup));
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
