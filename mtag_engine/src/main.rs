use mtag_engine::config::runtime::Preferences;
use mtag_engine::pipeline::{format_result, OutputFormat};
use mtag_engine::{batch, logging, pipeline};
use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve runtime preferences before any logging happens
    let preferences = Preferences::load();
    logging::config::init_runtime_preferences(preferences.logging.clone())?;
    logging::init_global_logging()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <input.m|directory> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let input_path = Path::new(&args[1]);
    let options = parse_options(&args[2..]);

    if input_path.is_file() {
        process_single_file(&args[1], &preferences, options.format)?;
    } else if input_path.is_dir() {
        process_directory_batch(input_path, &options, &preferences)?;
    } else {
        eprintln!("Error: Input must be a file (.m) or directory");
        eprintln!("  Path: {}", input_path.display());
        std::process::exit(1);
    }

    Ok(())
}

struct CliOptions {
    batch: batch::BatchConfig,
    format: OutputFormat,
}

fn print_help(program_name: &str) {
    println!("mtag v{}", env!("CARGO_PKG_VERSION"));
    println!("Tag extractor for MATLAB-like source files");
    println!();
    println!("USAGE:");
    println!(
        "    {} <input.m>                      # Process single file",
        program_name
    );
    println!(
        "    {} <directory> [options]          # Process directory",
        program_name
    );
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --format FORMAT     Output format: text (default), ctags, json");
    println!("    --sequential        Force sequential processing (no parallelism)");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --max-files N       Limit maximum files to process");
    println!("    --fail-fast         Stop on first error");
    println!("    --quiet             Suppress progress reporting");
    println!();
    println!("EXAMPLES:");
    println!("    {} shape.m                         # Single file", program_name);
    println!("    {} src/ --format ctags             # Tag file for a tree", program_name);
    println!("    {} src/ --threads 4 --fail-fast    # Parallel with early exit", program_name);
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut config = batch::BatchConfig::default();
    let mut format = OutputFormat::Text;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--sequential" => {
                config.max_threads = 1;
            }
            "--threads" => {
                if i + 1 < args.len() {
                    if let Ok(threads) = args[i + 1].parse::<usize>() {
                        config.max_threads = threads.clamp(1, 32);
                    } else {
                        eprintln!(
                            "Warning: Invalid thread count '{}', using default",
                            args[i + 1]
                        );
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --threads requires a number");
                }
            }
            "--format" => {
                if i + 1 < args.len() {
                    match OutputFormat::from_str(&args[i + 1]) {
                        Some(f) => format = f,
                        None => {
                            eprintln!("Warning: Unknown format '{}', using text", args[i + 1])
                        }
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --format requires a value");
                }
            }
            "--no-recursive" => {
                config.recursive = false;
            }
            "--max-files" => {
                if i + 1 < args.len() {
                    if let Ok(max_files) = args[i + 1].parse::<usize>() {
                        config.max_files = Some(max_files);
                    } else {
                        eprintln!("Warning: Invalid max files '{}', ignoring", args[i + 1]);
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --max-files requires a number");
                }
            }
            "--fail-fast" => {
                config.fail_fast = true;
            }
            "--quiet" => {
                config.progress_reporting = false;
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    CliOptions {
        batch: config,
        format,
    }
}

fn process_single_file(
    file_path: &str,
    preferences: &Preferences,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match pipeline::process_file_with_preferences(file_path, preferences, 0) {
        Ok(result) => {
            print!("{}", format_result(&result, format));

            if !result.diagnostics.is_empty() {
                for diagnostic in &result.diagnostics {
                    eprintln!("note: {}: {}", file_path, diagnostic);
                }
            }
        }
        Err(error) => {
            eprintln!("error: {}: {}", file_path, error);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn process_directory_batch(
    dir_path: &Path,
    options: &CliOptions,
    preferences: &Preferences,
) -> Result<(), Box<dyn std::error::Error>> {
    match batch::process_directory(dir_path, &options.batch, preferences) {
        Ok(results) => {
            for (_, result) in &results.successful_files {
                print!("{}", format_result(result, options.format));
            }

            eprintln!("{}", results.summary());

            if results.failure_count() > 0 {
                for (file_path, error) in &results.failed_files {
                    eprintln!("error: {}: {}", file_path.display(), error);
                }
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("Batch processing failed: {}", error);
            std::process::exit(1);
        }
    }

    Ok(())
}
