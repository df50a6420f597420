use std::path::PathBuf;

use clap::Parser;
use cview_tools::config::Style;
use cview_tools::physics::operations::supercell;
use cview_tools::rendering::{self, RenderConfig};
use cview_tools::utils::{logger, report};
use cview_tools::{io, Result};

/// Write a POV-Ray picture of a (repeated) crystal structure.
#[derive(Parser)]
#[command(name = "cview-pictures")]
#[command(version)]
struct Cli {
    /// Path to input file
    #[arg(short, long, default_value = "POSCAR")]
    file: String,

    /// Repeat factors along a, b and c
    #[arg(short, long, num_args = 3, value_names = ["NA", "NB", "NC"], default_values_t = [2, 2, 1])]
    repeat: Vec<u32>,

    /// Style file (JSON); defaults to the user config directory, then built-ins
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Scene file to write; the .ini and .png share its stem
    #[arg(short, long, default_value = "POSCAR.pov")]
    output: PathBuf,

    /// Run povray after writing the scene
    #[arg(long)]
    run: bool,

    /// Write the effective style to this path and exit
    #[arg(long, value_name = "PATH")]
    write_style: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let style = Style::load(cli.style.as_deref())?;
    if let Some(path) = &cli.write_style {
        return style.save(path);
    }

    let bulk = io::load_structure(&cli.file)?;
    log::debug!("{}", report::structure_summary(&bulk, &cli.file));

    let reps = [cli.repeat[0], cli.repeat[1], cli.repeat[2]];
    let structure = supercell::repeat(&bulk, reps)?;

    let mut config = RenderConfig::new();
    style.apply(&mut config)?;
    if cli.run {
        config.set_global_option("run_povray", true);
    }

    let files = rendering::render_picture(&structure, &config, &cli.output)?;
    if !files.rendered {
        log::info!("Render with: povray {}", files.ini.display());
    }
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
