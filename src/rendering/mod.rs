pub mod config;
pub mod launch;
pub mod pov;
pub mod scene;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Structure;

// Re-export specific items to keep the API clean for the binaries
pub use config::{RenderConfig, Rgb, Settings};
pub use launch::LAUNCH_KEYS;
pub use pov::SCENE_KEYS;

/// Files produced by [`render_picture`].
#[derive(Clone, Debug, PartialEq)]
pub struct PictureFiles {
    pub pov: PathBuf,
    pub ini: PathBuf,
    pub png: PathBuf,
    pub rendered: bool,
}

/// Writes `<stem>.pov` and `<stem>.ini` next to `pov_path` and runs `povray`
/// when `run_povray` is set in `config`.
///
/// Each writer receives only the keys it accepts. Both files are rendered in
/// memory first, so a data error leaves existing files on disk untouched.
pub fn render_picture(structure: &Structure, config: &RenderConfig, pov_path: &Path) -> Result<PictureFiles> {
    let pov = pov_path.with_extension("pov");
    let ini = pov_path.with_extension("ini");
    let png = pov_path.with_extension("png");

    let launch_opts = launch::LaunchOptions::from_settings(&config.finalize_for_write(LAUNCH_KEYS))?;
    let scene_settings = config.finalize_for_write(SCENE_KEYS);

    let mut scene = Vec::new();
    let summary = pov::write_pov(&mut scene, &pov.display().to_string(), structure, &scene_settings)?;

    let mut control = Vec::new();
    launch::write_ini(&mut control, &file_name(&pov), &file_name(&png), &launch_opts, summary.aspect())
        .map_err(|e| Error::io(ini.display().to_string(), e))?;

    write_file(&pov, &scene)?;
    log::info!(
        "Wrote {} ({} atoms, view {:.2} x {:.2} A)",
        pov.display(),
        summary.atoms,
        summary.bbox.width(),
        summary.bbox.height()
    );
    write_file(&ini, &control)?;
    log::info!("Wrote {}", ini.display());

    if launch_opts.run_povray {
        launch::run_povray(&ini)?;
        log::info!("Rendered {}", png.display());
    }

    Ok(PictureFiles {
        pov,
        ini,
        png,
        rendered: launch_opts.run_povray,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::io(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Atom;

    #[test]
    fn test_render_picture_writes_both_files() {
        let structure = Structure {
            lattice: [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]],
            atoms: vec![Atom { element: "O".into(), position: [1.0, 1.0, 1.0], original_index: 0 }],
            formula: String::new(),
        };
        let mut cfg = RenderConfig::with_radii([("O", 0.74)]);
        cfg.set_global_option("canvas_width", 200)
            .set_global_option("rotation", "0x,0y,0z");

        let dir = std::env::temp_dir().join(format!("cview-tools-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let files = render_picture(&structure, &cfg, &dir.join("POSCAR.pov")).unwrap();

        let ini = std::fs::read_to_string(&files.ini).unwrap();
        assert!(ini.contains("Input_File_Name=POSCAR.pov"));
        assert!(ini.contains("Width=200"));
        let pov = std::fs::read_to_string(&files.pov).unwrap();
        assert!(pov.contains("atom(<"));
        assert!(!files.rendered);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_failed_render_keeps_previous_scene() {
        let structure = Structure {
            lattice: [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]],
            atoms: vec![Atom { element: "O".into(), position: [1.0, 1.0, 1.0], original_index: 0 }],
            formula: String::new(),
        };
        let dir = std::env::temp_dir().join(format!("cview-tools-keep-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let target = dir.join("POSCAR.pov");

        let mut cfg = RenderConfig::with_radii([("O", 0.74)]);
        let files = render_picture(&structure, &cfg, &target).unwrap();
        let pov_before = std::fs::read(&files.pov).unwrap();
        let ini_before = std::fs::read(&files.ini).unwrap();
        assert!(!pov_before.is_empty());

        cfg.set_textures([("O", "chrome")]).set_global_option("canvas_width", 640);
        let err = render_picture(&structure, &cfg, &target).unwrap_err();
        assert!(matches!(err, Error::UnknownTexture(ref t) if t == "chrome"));

        assert_eq!(std::fs::read(&files.pov).unwrap(), pov_before);
        assert_eq!(std::fs::read(&files.ini).unwrap(), ini_before);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
