use std::env;
use std::path::Path;

use lbp_stereo::io::{load_grayscale, render_disparity, save_gray};
use lbp_stereo::{load_params, BpParams, LoopyBp, StereoError};
use log::info;
use ndarray::Array2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> ! {
    eprintln!("usage: lbp-stereo <left> <right> [output.png] [params.json]");
    std::process::exit(1);
}

fn run() -> Result<(), StereoError> {
    let mut args = env::args().skip(1);
    let (Some(left_path), Some(right_path)) = (args.next(), args.next()) else {
        usage()
    };
    let output = args.next().unwrap_or_else(|| "output.png".to_string());
    let params = match args.next() {
        Some(path) => load_params(Path::new(&path))?,
        None => BpParams::default(),
    };

    let left = load_grayscale(Path::new(&left_path))?;
    let right = load_grayscale(Path::new(&right_path))?;

    let mut bp = LoopyBp::new(left.view(), right.view(), params)?;
    bp.run();
    let disparity = bp
        .disparity()
        .unwrap_or_else(|| Array2::zeros(left.dim()));

    let rendered = render_disparity(disparity.view(), bp.params().labels);
    save_gray(&rendered, Path::new(&output))?;
    info!("Saving results to {output}");
    Ok(())
}
