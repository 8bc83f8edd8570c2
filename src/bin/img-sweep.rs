use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use img_tools::codec::encode;
use img_tools::luma::load_gray;
use img_tools::types::Predictor;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        if args.len() < 2 {
            process::exit(1);
        }
        return;
    }

    let mut input = String::new();
    let mut out_dir = PathBuf::from(".");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out-dir" | "-o" => {
                if i + 1 < args.len() {
                    out_dir = PathBuf::from(&args[i + 1]);
                    i += 2;
                } else {
                    eprintln!("Error: --out-dir requires a directory");
                    process::exit(1);
                }
            }
            _ => {
                if input.is_empty() {
                    input = args[i].clone();
                    i += 1;
                } else {
                    eprintln!("Unknown argument: {}", args[i]);
                    process::exit(1);
                }
            }
        }
    }

    if let Err(e) = run_sweep(&input, &out_dir) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_help() {
    println!("img-sweep - Encode an image with every predictor and compare sizes");
    println!();
    println!("Usage: img-sweep <input_image> [options]");
    println!();
    println!("Options:");
    println!("  --out-dir, -o <dir>   Directory for pred_<n>.compressed files (default: .)");
    println!("  --help, -h            Show this help message");
}

fn run_sweep(input: &str, out_dir: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let img = load_gray(input)?;

    let mut sizes: Vec<(Predictor, u64)> = Vec::new();
    for pred in Predictor::ALL {
        println!("Encoding with predictor {}...", pred.id());
        let compressed = encode(&img, pred);
        let out_file = out_dir.join(format!("pred_{}.compressed", pred.id()));
        fs::write(&out_file, &compressed)?;
        let size = compressed.len() as u64;
        println!("Size of {}: {} bytes", out_file.display(), size);
        sizes.push((pred, size));
    }

    println!();
    println!("Size summary:");
    for (pred, size) in &sizes {
        println!(
            "  Predictor {} ({}): {} bytes",
            pred.id(),
            pred.description(),
            size
        );
    }

    // Scan order breaks ties in favor of the lower predictor id
    let (best, best_size) = sizes
        .iter()
        .min_by_key(|(_, size)| *size)
        .copied()
        .expect("predictor list is never empty");
    println!();
    println!(
        "Best predictor for this image: {} ({} bytes)",
        best.id(),
        best_size
    );

    let orig_size = fs::metadata(input)?.len();
    println!();
    println!("Original image size: {} bytes", orig_size);
    Ok(())
}
