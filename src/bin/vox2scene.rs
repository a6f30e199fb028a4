use voxmesh::image::encode_atlas;
use voxmesh::scene::{convert_file, ConvertConfig, ConvertError, ConvertReport, Scene};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

/// Converts MagicaVoxel .vox files into textured meshes, writing every atlas texture as PNG.
#[derive(Debug, StructOpt)]
#[structopt(name = "vox2scene")]
struct Options {
    /// RON file with conversion options. Missing fields take their defaults.
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Directory for the atlas textures.
    #[structopt(long, parse(from_os_str), default_value = ".")]
    out_dir: PathBuf,

    /// The .vox files to convert.
    #[structopt(parse(from_os_str), required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("failed to write texture: {0}")]
    Image(#[from] image::ImageError),
}

fn main() {
    env_logger::init();

    let options = Options::from_args();

    let config = match &options.config {
        Some(path) => match ConvertConfig::read_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => ConvertConfig::default(),
    };
    if let Err(e) = std::fs::create_dir_all(&options.out_dir) {
        eprintln!("{}: {}", options.out_dir.display(), e);
        std::process::exit(2);
    }

    // Every file gets its own parse and scene, so they convert independently.
    let results: Vec<_> = options
        .inputs
        .par_iter()
        .map(|path| (path, convert_and_write(path, &config, &options.out_dir)))
        .collect();

    let mut num_failed = 0;
    for (path, result) in results {
        match result {
            Ok((scene, report)) => print_summary(path, &scene, &report),
            Err(e) => {
                num_failed += 1;
                eprintln!("{}: {}", path.display(), e);
            }
        }
    }
    if num_failed > 0 {
        std::process::exit(1);
    }
}

fn convert_and_write(
    path: &Path,
    config: &ConvertConfig,
    out_dir: &Path,
) -> Result<(Scene, ConvertReport), Error> {
    let (scene, report) = convert_file(path, config)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene".to_string());
    for texture in scene.textures.iter() {
        let out_path = out_dir.join(format!("{}_{}.png", stem, texture.name));
        encode_atlas(&texture.image).save(&out_path)?;
        tracing::debug!("Wrote {}", out_path.display());
    }

    Ok((scene, report))
}

fn print_summary(path: &Path, scene: &Scene, report: &ConvertReport) {
    let num_triangles: usize = scene.meshes.iter().map(|m| m.mesh.num_triangles()).sum();
    println!(
        "{}: {} meshes, {} triangles from {} faces, {} textures, {} T-junction splits",
        path.display(),
        scene.meshes.len(),
        num_triangles,
        report.num_faces,
        scene.textures.len(),
        report.num_split_edges,
    );
    for skipped in report.skipped.iter() {
        println!(
            "  skipped shape {} frame {}: {}",
            skipped.shape_id, skipped.frame, skipped.reason
        );
    }
}
