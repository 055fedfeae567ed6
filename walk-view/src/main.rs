//! Command-line entry point for the walkers simulation.
//!
//! - `plot` runs a system and shows it in the interactive viewer or
//!   writes it to an image.
//! - `animate` writes one image per iteration.
//! - `assemble` turns a directory of frames into an animated GIF.

mod assemble;
mod backend;
mod camera;
mod preview;
mod raster;
mod viewer;

use anyhow::{Context, Result};
use backend::{Backend, ImageOptions};
use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use tracing::info;
use walk_core::{
    WalkingSystem,
    config::{RandomConfig, UpdatePolicy},
};

#[derive(Parser, Debug)]
#[command(name = "walkers", version, about = "Walkers walking toward each other")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a system and plot its curves and rings.
    Plot {
        #[command(flatten)]
        system: SystemArgs,
        /// Render engine: `interactive` or `image`.
        #[arg(short, long, default_value_t = Backend::Interactive)]
        backend: Backend,
        /// Only plot the first N iterations.
        #[arg(short, long)]
        limit: Option<usize>,
        /// Image file written by the image backend.
        #[arg(short, long, default_value = "walkers.png")]
        output: PathBuf,
        #[command(flatten)]
        size: SizeArgs,
    },
    /// Write one frame per iteration into a new directory.
    Animate {
        #[command(flatten)]
        system: SystemArgs,
        /// Directory to create for the frames.
        #[arg(short, long, default_value = "frames")]
        dir: PathBuf,
        #[command(flatten)]
        size: SizeArgs,
    },
    /// Build an animated GIF from the images of a directory.
    Assemble {
        /// Extension of the frame files.
        #[arg(short, long, default_value = "png")]
        extension: String,
        /// Directory holding the frames.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Output video file.
        #[arg(short, long, default_value = "video.gif")]
        output: PathBuf,
        /// Size reduction factor.
        #[arg(short, long, default_value_t = 1.0)]
        factor: f64,
        /// Play the frames in a window once written.
        #[arg(short, long)]
        show: bool,
    },
}

/// Where the system comes from.
#[derive(Args, Debug)]
struct SystemArgs {
    /// Load a previously saved system instead of drawing a random one.
    #[arg(long)]
    load: Option<PathBuf>,
    /// Save the system before running it.
    #[arg(long)]
    save: Option<PathBuf>,
    /// Seed for the random system.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of random walkers.
    #[arg(long, default_value_t = RandomConfig::default().walkers)]
    walkers: usize,
    /// Number of iterations of a random system.
    #[arg(long, default_value_t = RandomConfig::default().iterations)]
    iterations: usize,
    /// Update walkers in place, one after the other.
    #[arg(long)]
    sequential: bool,
}

#[derive(Args, Debug)]
struct SizeArgs {
    #[arg(long, default_value_t = 1920)]
    width: u32,
    #[arg(long, default_value_t = 1080)]
    height: u32,
}

impl SystemArgs {
    fn build(&self) -> Result<WalkingSystem> {
        let system = match &self.load {
            Some(path) => WalkingSystem::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => {
                let cfg = RandomConfig {
                    walkers: self.walkers,
                    iterations: self.iterations,
                    ..RandomConfig::default()
                };
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                WalkingSystem::random(&cfg, &mut rng)
            }
        };
        let system = if self.sequential {
            system.with_policy(UpdatePolicy::Sequential)
        } else {
            system
        };

        if let Some(path) = &self.save {
            system.save(path).with_context(|| format!("saving {}", path.display()))?;
        }
        info!(%system, iterations = system.iterations(), "system ready");
        Ok(system)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Plot {
            system,
            backend,
            limit,
            output,
            size,
        } => {
            let image = ImageOptions {
                output,
                size: (size.width, size.height),
            };
            backend.plot(system.build()?, limit, &image)
        }
        Command::Animate { system, dir, size } => {
            let mut system = system.build()?;
            system.compute_vectrices();
            raster::render_frames(&system, &dir, (size.width, size.height))?;
            Ok(())
        }
        Command::Assemble {
            extension,
            dir,
            output,
            factor,
            show,
        } => {
            let paths = assemble::paths_from_extension(&dir, &extension)?;
            assemble::assemble(&paths, &output, factor, show)
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
