//! planetgen CLI - Procedural cube-sphere planet generator.
//!
//! Generates displaced cube-sphere meshes from layered noise and writes them
//! as OBJ files together with the colour ramp as a PNG.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use planetgen::config::{ConfigError, PlanetSettings};
use planetgen::export::{export_planet_obj, export_ramp_png};
use planetgen::geometry::{validate_resolution, FaceMask};
use planetgen::terrain::{Planet, ShapeSettings};

/// Procedural cube-sphere planet generator.
#[derive(Parser)]
#[command(name = "planetgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate planet meshes and the colour ramp.
    Generate {
        /// JSON settings file. Overrides the preset.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Built-in settings used when no config file is given.
        #[arg(short, long, default_value = "earth")]
        preset: Preset,

        /// Noise seed for the preset. Random if omitted.
        #[arg(short, long)]
        seed: Option<i32>,

        /// Vertices along each face edge (2-256).
        #[arg(short, long)]
        resolution: Option<u32>,

        /// Faces to generate.
        #[arg(short, long)]
        face: Option<FaceArg>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "planet")]
        name: String,

        /// Print the effective settings as JSON before generating.
        #[arg(long)]
        print_config: bool,
    },

    /// Display mesh statistics for a resolution.
    Info {
        /// Vertices along each face edge.
        #[arg(short, long, default_value = "10")]
        resolution: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Continents with ridged mountains and an earth-like palette.
    Earth,
    /// Smooth unit sphere with a black-to-white ramp.
    Sphere,
}

#[derive(Clone, Copy, ValueEnum)]
enum FaceArg {
    All,
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl From<FaceArg> for FaceMask {
    fn from(face: FaceArg) -> Self {
        match face {
            FaceArg::All => FaceMask::All,
            FaceArg::Top => FaceMask::Top,
            FaceArg::Bottom => FaceMask::Bottom,
            FaceArg::Left => FaceMask::Left,
            FaceArg::Right => FaceMask::Right,
            FaceArg::Front => FaceMask::Front,
            FaceArg::Back => FaceMask::Back,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            preset,
            seed,
            resolution,
            face,
            output,
            name,
            print_config,
        } => {
            let settings = match load_settings(config, preset, seed, resolution, face) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            run_generate(&settings, output, &name, print_config);
        }
        Commands::Info { resolution } => {
            run_info(resolution);
        }
    }
}

fn load_settings(
    config: Option<PathBuf>,
    preset: Preset,
    seed: Option<i32>,
    resolution: Option<u32>,
    face: Option<FaceArg>,
) -> Result<PlanetSettings, ConfigError> {
    let mut settings = match config {
        Some(path) => PlanetSettings::from_json_file(&path)?,
        None => match preset {
            Preset::Earth => {
                let seed = seed.unwrap_or_else(rand::random);
                println!("Seed: {}", seed);
                PlanetSettings::earth_like(seed)
            }
            Preset::Sphere => PlanetSettings {
                shape: Some(ShapeSettings::sphere(1.0)),
                ..Default::default()
            },
        },
    };

    if let Some(resolution) = resolution {
        settings.resolution = resolution;
    }
    if let Some(face) = face {
        settings.face_mask = face.into();
    }
    Ok(settings)
}

fn run_generate(settings: &PlanetSettings, output: PathBuf, name: &str, print_config: bool) {
    println!("planetgen - Procedural Planet Generator");
    println!("=======================================");
    println!(
        "Resolution: {}x{} vertices per face",
        settings.resolution, settings.resolution
    );
    println!("Faces: {:?}", settings.face_mask);
    println!("Output: {}", output.display());

    if print_config {
        match settings.to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing settings: {}", e),
        }
    }

    let start = Instant::now();
    println!("\nGenerating...");
    let planet = match Planet::generate(settings) {
        Ok(planet) => planet,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let gen_time = start.elapsed();
    println!("Generation completed in {:.2?}", gen_time);

    let range = planet.elevation_range();
    println!("Radius range: [{:.4}, {:.4}]", range.min, range.max);
    if planet.ramp.is_fallback() {
        println!("  (no elevation observed, ramp uses fallback range)");
    }
    println!(
        "Mesh: {} vertices, {} triangles",
        planet.vertex_count(),
        planet.triangle_count()
    );

    println!("\nExporting...");
    let export_start = Instant::now();

    match export_planet_obj(&planet, &output, name) {
        Ok(paths) => println!("  Exported {} OBJ files: {}_*.obj", paths.len(), name),
        Err(e) => {
            eprintln!("Error exporting OBJ: {}", e);
            process::exit(1);
        }
    }

    let ramp_path = output.join(format!("{}_ramp.png", name));
    if let Err(e) = export_ramp_png(&planet.ramp, &ramp_path) {
        eprintln!("Error exporting ramp: {}", e);
        process::exit(1);
    }
    println!(
        "  Exported colour ramp ({} samples): {}",
        planet.ramp.resolution(),
        ramp_path.display()
    );

    println!("Export completed in {:.2?}", export_start.elapsed());
    println!("\nTotal time: {:.2?}", start.elapsed());
    println!("Done!");
}

fn run_info(resolution: u32) {
    if let Err(e) = validate_resolution(resolution) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let vertices_per_face = (resolution as u64) * (resolution as u64);
    let cells = (resolution as u64 - 1) * (resolution as u64 - 1);
    let triangles_per_face = cells * 2;

    let bytes_vertices = vertices_per_face * 6 * 12; // Vec3
    let bytes_indices = triangles_per_face * 6 * 3 * 4; // u32

    println!("planetgen - Mesh Info");
    println!("=====================");
    println!();
    println!("Resolution: {}x{} vertices per face", resolution, resolution);
    println!("Total faces: 6");
    println!();
    println!("Counts:");
    println!("  Vertices per face:  {:>10}", vertices_per_face);
    println!("  Triangles per face: {:>10}", triangles_per_face);
    println!("  Vertices total:     {:>10}", vertices_per_face * 6);
    println!("  Triangles total:    {:>10}", triangles_per_face * 6);
    println!();
    println!("Memory usage (in-memory):");
    println!(
        "  Vertices: {:>10} bytes ({:.2} MB)",
        bytes_vertices,
        bytes_vertices as f64 / 1024.0 / 1024.0
    );
    println!(
        "  Indices:  {:>10} bytes ({:.2} MB)",
        bytes_indices,
        bytes_indices as f64 / 1024.0 / 1024.0
    );
}
