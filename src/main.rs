use anyhow::Result;
use clap::{Parser, ValueEnum};
use dissectrs::dissection::{Selector, ShapeMode, Snapshot, Step, View, assembly::PieceShape};
use dissectrs::float_types::Real;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dissectrs")]
#[command(about = "Cube-to-prism dissection: print bounds and export fused pieces", long_about = None)]
struct Cli {
    /// Scale parameter k (cube side 3k, prism 6.75k x 2k x 2k)
    #[arg(short, long, default_value_t = 4.0)]
    k: Real,

    /// Step of the walkthrough: 0 cube, 1 first slide, 2 prism
    #[arg(short, long, default_value_t = 0, conflicts_with = "assembled")]
    step: u8,

    /// Show the generalized view's prism instead of stepping
    #[arg(short, long)]
    assembled: bool,

    /// Pull the pieces apart
    #[arg(short, long)]
    explode: bool,

    #[arg(short, long, value_enum, default_value_t = Mode::Fused)]
    mode: Mode,

    /// Directory to write one STL per fused piece into
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write binary instead of ASCII STL
    #[cfg(feature = "stl-io")]
    #[arg(long)]
    binary: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Boxes,
    Fused,
    Oblique,
}

impl From<Mode> for ShapeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Boxes => ShapeMode::Boxes,
            Mode::Fused => ShapeMode::Fused,
            Mode::Oblique => ShapeMode::ObliqueCut,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let view = if cli.assembled {
        View::Generalized { assembled: true }
    } else {
        View::Stepped(Step::from_index(cli.step)?)
    };
    let selector = Selector::new(cli.k, view)
        .with_explode(cli.explode)
        .with_mode(cli.mode.into());

    let snapshot = dissectrs::dissection::snapshot(&selector)?;
    print_summary(&snapshot);

    if let Some(dir) = &cli.out {
        fs::create_dir_all(dir)?;
        #[cfg(feature = "stl-io")]
        let binary = cli.binary;
        #[cfg(not(feature = "stl-io"))]
        let binary = false;
        write_pieces(&snapshot, dir, binary)?;
    }

    Ok(())
}

fn print_summary(snapshot: &Snapshot) {
    let dims = snapshot.scale.dimensions();
    println!(
        "k = {}  L = {}  A = {}  B = {}",
        snapshot.scale.k(),
        dims.cube_side,
        dims.prism_base,
        dims.prism_length
    );
    println!("step {}: {}", snapshot.step.index(), snapshot.caption);

    let (lo, hi) = (snapshot.bounds.min(), snapshot.bounds.max());
    println!(
        "bounds ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
        lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
    );
    println!("floor {:.3}", snapshot.floor_reference);

    for piece in &snapshot.pieces {
        let kind = match &piece.shape {
            PieceShape::BoxList(boxes) => format!("{} boxes", boxes.len()),
            PieceShape::FusedMesh(mesh) => format!("{} triangles", mesh.triangle_count()),
        };
        println!(
            "{} {}  offset ({:.3}, {:.3}, {:.3})  volume {:.3}  {kind}",
            piece.id,
            piece.color,
            piece.offset.x,
            piece.offset.y,
            piece.offset.z,
            piece.shape.volume()
        );
    }

    if let Some(lines) = &snapshot.dimensions {
        for line in lines {
            println!("{:?}: {}", line.axis, line.label);
        }
    }
}

fn write_pieces(snapshot: &Snapshot, dir: &std::path::Path, binary: bool) -> Result<()> {
    for piece in &snapshot.pieces {
        let PieceShape::FusedMesh(mesh) = &piece.shape else {
            continue;
        };
        let name = format!("piece_{}", piece.id.get());
        let placed = mesh.translated(&piece.offset);
        let path = dir.join(format!("{name}.stl"));

        #[cfg(feature = "stl-io")]
        if binary {
            fs::write(&path, placed.to_stl_binary(&name)?)?;
            info!(path = %path.display(), "wrote binary STL");
            continue;
        }
        let _ = binary;

        fs::write(&path, placed.to_stl_ascii(&name))?;
        info!(path = %path.display(), "wrote ASCII STL");
    }
    Ok(())
}
