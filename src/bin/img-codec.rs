use std::env;
use std::fs;
use std::process;

use img_tools::codec::{decode, encode, estimate_m, residual_image};
use img_tools::luma::load_gray;
use img_tools::types::Predictor;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return;
    }

    if args.len() < 4 {
        print_help();
        process::exit(1);
    }

    let mode = args[1].as_str();
    let input = &args[2];
    let output = &args[3];

    let result = match mode {
        "encode" => {
            if args.len() < 5 {
                eprintln!("Error: encode mode requires a predictor type");
                print_help();
                process::exit(1);
            }
            let pred = match args[4].parse::<u8>().ok().and_then(Predictor::from_u8) {
                Some(p) => p,
                None => {
                    eprintln!("Error: invalid predictor type. Use 1-5.");
                    print_help();
                    process::exit(1);
                }
            };
            run_encode(input, output, pred)
        }
        "decode" => run_decode(input, output),
        _ => {
            eprintln!("Error: invalid mode '{}'", mode);
            print_help();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_help() {
    println!("img-codec - Lossless grayscale image codec");
    println!();
    println!("Usage:");
    println!("  img-codec encode <input_image> <output_file> <predictor_type>");
    println!("  img-codec decode <input_file> <output_image>");
    println!();
    println!("Predictor types:");
    for pred in Predictor::ALL {
        println!("  {}: {}", pred.id(), pred.description());
    }
}

fn run_encode(input: &str, output: &str, pred: Predictor) -> Result<(), Box<dyn std::error::Error>> {
    let img = load_gray(input)?;
    let m = estimate_m(&img, pred);
    println!("Encoding with m = {}", m);

    let compressed = encode(&img, pred);
    fs::write(output, &compressed)?;

    // Side output for visual inspection of the predictor fit
    let residual_path = format!("{}_residual.png", output);
    residual_image(&img, pred).save(&residual_path)?;

    println!(
        "Encoded {} -> {} ({} bytes, predictor {})",
        input,
        output,
        compressed.len(),
        pred.id()
    );
    println!("Residual image saved to {}", residual_path);
    Ok(())
}

fn run_decode(input: &str, output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let compressed = fs::read(input)?;
    let img = decode(&compressed)?;
    let (width, height) = img.dimensions();
    println!("Decoding {}x{} image", height, width);

    img.save(output)?;
    println!("Decoded image saved to {}", output);
    Ok(())
}
