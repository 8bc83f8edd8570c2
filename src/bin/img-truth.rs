use std::env;
use std::path::Path;
use std::process;
use std::process::Command;

use img_tools::luma::load_gray;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        return;
    }

    if args.len() < 3 {
        print_help();
        process::exit(1);
    }

    let original = &args[1];
    let decoded = &args[2];
    let ground_truth = if args.len() > 3 {
        args[3].clone()
    } else {
        "ground_truth.png".to_string()
    };

    if let Err(e) = run(original, decoded, &ground_truth) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_help() {
    println!("img-truth - Build a grayscale ground-truth PNG and measure PSNR");
    println!();
    println!("Usage: img-truth <original_image> <decoded_image> [ground_truth.png]");
    println!();
    println!("Converts the original to 8-bit grayscale with the same BT.601 luma");
    println!("pipeline the codec uses, saves it as the ground truth, then runs the");
    println!("external 'compare -metric PSNR' tool against the decoded image.");
}

fn run(original: &str, decoded: &str, ground_truth: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Creating ground truth from {}...", original);
    let gray = load_gray(original)?;
    gray.save(ground_truth)?;
    println!("Ground truth saved to {}", ground_truth);

    if !Path::new(decoded).exists() {
        return Err(format!(
            "decoded file {} not found (run the decoder first)",
            decoded
        )
        .into());
    }

    println!();
    println!("--- Comparing ---");
    println!("Ground truth: {}", ground_truth);
    println!("Decoded:      {}", decoded);
    println!("-----------------");

    // ImageMagick's compare writes the metric to stderr
    let output = Command::new("compare")
        .args(["-metric", "PSNR", ground_truth, decoded, "NULL:"])
        .output()
        .map_err(|e| format!("failed to run external 'compare' tool: {}", e))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stdout.trim().is_empty() {
        println!("{}", stdout.trim());
    }
    if !stderr.trim().is_empty() {
        println!("PSNR: {}", stderr.trim());
    }
    Ok(())
}
