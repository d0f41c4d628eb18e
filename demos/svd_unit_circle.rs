//! SVD unit-circle demo.
//!
//! Factors a 2×2 matrix, prints the U / Σ / Vᵀ tables, then plays the animation headlessly and
//! writes an SVG snapshot at the start and at the end of every leg.
//!
//! Run:
//!   cargo run --example svd_unit_circle -- 3 1 1 2
//!   cargo run --example svd_unit_circle -- --random 7
//!
//! Snapshots go to `target/svd_frames/` (override with `SVDVIZ_OUT`).

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use svdviz::driver::ManualScheduler;
use svdviz::surface::SvgSurface;
use svdviz::view::{parse_matrix, random_fields};
use svdviz::{Mat2, Visualizer, VizConfig};

fn matrix_from_args(args: &[String]) -> Result<Mat2, Box<dyn std::error::Error>> {
    match args {
        [flag, rest @ ..] if flag == "--random" => {
            let seed = match rest.first() {
                Some(s) => s.parse()?,
                None => 0,
            };
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let f = random_fields(&mut rng)?;
            println!("random fields (seed={seed}): {f:?}");
            Ok(parse_matrix([&f[0], &f[1], &f[2], &f[3]])?)
        }
        [a11, a12, a21, a22] => Ok(parse_matrix([a11, a12, a21, a22])?),
        [] => Ok(Mat2::new(3.0, 1.0, 1.0, 2.0)),
        _ => Err("expected four matrix entries or --random [seed]".into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let a = matrix_from_args(&args)?;

    let out_dir = std::env::var_os("SVDVIZ_OUT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/svd_frames"));
    std::fs::create_dir_all(&out_dir)?;

    let cfg = VizConfig::default();
    let mut svg = SvgSurface::new(cfg.width, cfg.height);
    let mut viz = Visualizer::new(cfg, ManualScheduler::new())?;
    viz.on_visualize(&a, &mut svg)?;

    let session = viz.session().ok_or("no session after visualize")?;
    println!("A = {:?}", a.rows());
    for table in session.tables() {
        print!("{table}");
    }
    println!("singular values = {:?}", session.decomposition().singular_values());
    println!();

    let write = |name: &str, svg: &SvgSurface| -> std::io::Result<()> {
        let path = out_dir.join(name);
        std::fs::write(&path, svg.to_document())?;
        println!("{:<40} -> {}", svg.info(), path.display());
        Ok(())
    };

    write("frame_000.svg", &svg)?;
    viz.on_play();
    let mut tick = 0usize;
    while let Some(token) = viz.scheduler_mut().pop() {
        if viz.on_frame(token, &mut svg).is_some() {
            tick += 1;
            if tick % 50 == 0 {
                write(&format!("frame_{tick:03}.svg"), &svg)?;
            }
        }
    }
    println!("ticks = {tick}");
    Ok(())
}
