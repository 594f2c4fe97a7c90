// RustPixel
// copyright zipxing@hotmail.com 2022～2025

use clap::Parser;
use font_viewer::{run, Args};
use log::error;

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("font-viewer: {}", e);
        std::process::exit(1);
    }
}
