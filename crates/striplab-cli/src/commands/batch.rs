//! Parallel batch analysis over many images.

use crate::parsers::parse_mode;
use crate::SUPPORTED_EXTENSIONS;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use striplab_core::analysis::{analyze, AnalyzeOptions};

#[allow(clippy::too_many_arguments)]
pub fn cmd_batch(
    inputs: Vec<PathBuf>,
    profile_path: Option<PathBuf>,
    mode: Option<String>,
    normalize: bool,
    out: Option<PathBuf>,
    threads: Option<usize>,
) -> Result<(), String> {
    striplab_core::config::log_config_usage();

    if inputs.is_empty() {
        return Err("No input files specified".to_string());
    }

    // Configure thread pool if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("Using {} threads for parallel processing", num_threads);
    }

    let defaults = &striplab_core::config::engine_config_handle().config.defaults;
    let mut options = AnalyzeOptions::from_defaults(defaults);
    if let Some(mode_str) = mode {
        options.mode = parse_mode(&mode_str)?;
    }
    options.normalize = normalize;

    let profile = super::analyze::load_or_default_profile(profile_path)?;

    // Determine output directory
    let output_dir = out.unwrap_or_else(|| PathBuf::from("."));
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
    }

    let files = expand_inputs(inputs)?;
    println!("\nProcessing {} files in parallel...\n", files.len());

    // Progress tracking
    let processed_count = AtomicUsize::new(0);
    let total_files = files.len();

    // Each task owns its image and a profile snapshot; the engine keeps
    // no shared state between invocations.
    let results: Vec<Result<PathBuf, String>> = files
        .par_iter()
        .map(|input| {
            let image = striplab_core::decoders::decode_image(input)?;
            let record = analyze(&image, &profile, None, &options);

            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| format!("Invalid input file name: {}", input.display()))?;
            let output_path = output_dir.join(format!("{}.striplab.json", stem));

            let json = serde_json::to_string_pretty(&record)
                .map_err(|e| format!("Failed to serialize results: {}", e))?;
            std::fs::write(&output_path, json)
                .map_err(|e| format!("Failed to write results file: {}", e))?;

            let count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
            println!(
                "[{}/{}] Analyzed: {} -> {}",
                count,
                total_files,
                input.display(),
                output_path.display()
            );

            Ok(output_path)
        })
        .collect();

    // Summarize results
    let mut success_count = 0;
    let mut errors: Vec<(PathBuf, String)> = Vec::new();

    for (input, result) in files.iter().zip(results.iter()) {
        match result {
            Ok(_) => success_count += 1,
            Err(e) => errors.push((input.clone(), e.clone())),
        }
    }

    println!("\n{}/{} files analyzed successfully", success_count, total_files);
    if !errors.is_empty() {
        println!("\nFailures:");
        for (input, error) in &errors {
            println!("  {}: {}", input.display(), error);
        }
        return Err(format!("{} file(s) failed", errors.len()));
    }

    Ok(())
}

/// Expand directory inputs into supported image files; plain files pass
/// through untouched.
fn expand_inputs(inputs: Vec<PathBuf>) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let entries = std::fs::read_dir(&input)
                .map_err(|e| format!("Failed to read directory {}: {}", input.display(), e))?;
            for entry in entries {
                let entry =
                    entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
                let path = entry.path();
                let supported = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                    .unwrap_or(false);
                if path.is_file() && supported {
                    files.push(path);
                }
            }
        } else {
            files.push(input);
        }
    }

    files.sort();
    if files.is_empty() {
        return Err("No supported image files found".to_string());
    }
    Ok(files)
}
