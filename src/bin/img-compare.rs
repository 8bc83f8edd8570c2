use std::env;
use std::process;

use img_tools::compare::{compare_files, DiffReport, MAX_DIFF_SAMPLES};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        return;
    }

    let mut paths = Vec::new();
    let mut json = false;

    for arg in &args[1..] {
        match arg.as_str() {
            "--json" | "-j" => json = true,
            _ => paths.push(arg.clone()),
        }
    }

    if paths.len() != 2 {
        print_help();
        process::exit(1);
    }

    let report = match compare_files(&paths[0], &paths[1]) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }

    if !report.identical {
        process::exit(2);
    }
}

fn print_help() {
    println!("img-compare - Exact pixel comparison of two grayscale images");
    println!();
    println!("Usage: img-compare <image_a> <image_b> [--json]");
    println!();
    println!("Both inputs are decoded to 8-bit grayscale (BT.601 luma) before");
    println!("comparison. Exit code 0 when identical, 2 when they differ.");
    println!();
    println!("Options:");
    println!("  --json, -j    Emit the difference report as JSON");
    println!("  --help, -h    Show this help message");
}

fn print_report(report: &DiffReport) {
    if report.identical {
        println!("Images are identical (lossless).");
        return;
    }

    println!("Images differ in {} pixels.", report.diff_count);
    println!("First differences (up to {}):", MAX_DIFF_SAMPLES);
    for s in &report.samples {
        println!(
            "  Pixel ({},{}): a={}, b={}",
            s.row, s.col, s.value_a, s.value_b
        );
    }
}
