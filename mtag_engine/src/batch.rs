//! Batch processing for directories of MATLAB source files
//!
//! Directory discovery plus sequential and parallel execution. Each file
//! runs through the pipeline with its own fresh engine state, so files can
//! be distributed across worker threads freely.

use crate::config::compile_time::batch_processing::{MAX_FILES_PER_BATCH, MAX_WORKER_THREADS};
use crate::config::runtime::Preferences;
use crate::logging::codes;
use crate::pipeline::{self, PipelineError, TagFileResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(MAX_WORKER_THREADS))
                .unwrap_or(4),
            recursive: true,
            max_files: None,
            progress_reporting: true,
            fail_fast: false,
        }
    }
}

/// Batch processing results
#[derive(Debug, Default)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, TagFileResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn total_tags(&self) -> usize {
        self.successful_files
            .iter()
            .map(|(_, result)| result.tags.len())
            .sum()
    }

    pub fn add_success(&mut self, file_path: PathBuf, result: TagFileResult) {
        self.successful_files.push((file_path, result));
        self.files_processed += 1;
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: PipelineError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.successful_files.extend(other.successful_files);
        self.failed_files.extend(other.failed_files);
        self.files_processed += other.files_processed;
    }

    pub fn summary(&self) -> String {
        format!(
            "{} files processed, {} successful, {} failed, {} tags, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.failure_count(),
            self.total_tags(),
            self.processing_duration.as_secs_f64()
        )
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No MATLAB files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("Too many files found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Thread pool error: {message}")]
    ThreadError { message: String },
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Discover .m files in a directory
pub fn discover_matlab_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_debug!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.exists() || !dir_path.is_dir() {
        return Err(BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        });
    }

    let mut files = Vec::new();
    visit_directory(dir_path, &mut files, config)?;

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        });
    }

    if files.len() > MAX_FILES_PER_BATCH {
        return Err(BatchError::TooManyFiles {
            count: files.len(),
            max: MAX_FILES_PER_BATCH,
        });
    }

    // Deterministic processing order
    files.sort();

    crate::log_info!("File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

fn visit_directory(
    dir_path: &Path,
    files: &mut Vec<PathBuf>,
    config: &BatchConfig,
) -> Result<(), BatchError> {
    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::IoError {
        error: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| BatchError::IoError {
            error: e.to_string(),
        })?;
        let path = entry.path();

        if path.is_dir() {
            if config.recursive {
                visit_directory(&path, files, config)?;
            }
        } else if is_matlab_file(&path) {
            files.push(path);

            if let Some(max_files) = config.max_files {
                if files.len() >= max_files {
                    crate::log_warning!("Reached maximum file limit",
                        "files_found" => files.len(),
                        "limit" => max_files
                    );
                    return Ok(());
                }
            }
        }
    }

    Ok(())
}

/// Check if a path is a file carrying the .m extension
fn is_matlab_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("m"))
            .unwrap_or(false)
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Process a directory of MATLAB files sequentially
pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
    preferences: &Preferences,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    let files = discover_matlab_files(dir_path, config)?;

    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        if config.progress_reporting {
            println!(
                "Processing file {} of {}: {}",
                file_id + 1,
                files.len(),
                file_path.display()
            );
        }

        let path_str = file_path.display().to_string();
        match pipeline::process_file_with_preferences(&path_str, preferences, file_id) {
            Ok(result) => results.add_success(file_path.clone(), result),
            Err(error) => {
                crate::log_error!(error.error_code(), "File processing failed",
                    "file" => file_path.display(),
                    "file_id" => file_id
                );
                results.add_failure(file_path.clone(), error);

                if config.fail_fast {
                    crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
                    break;
                }
            }
        }
    }

    results.processing_duration = start_time.elapsed();
    log_batch_complete(&results, 1);

    Ok(results)
}

/// Process files in parallel across worker threads
pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
    preferences: &Preferences,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    let files = discover_matlab_files(dir_path, config)?;

    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    let chunk_size = calculate_chunk_size(files.len(), config.max_threads);

    for chunk in files.chunks(chunk_size * config.max_threads) {
        let chunk_results = process_chunk_parallel(chunk, config, preferences)?;
        results.merge(chunk_results);

        if config.fail_fast && results.failure_count() > 0 {
            crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.processing_duration = start_time.elapsed();
    log_batch_complete(&results, config.max_threads);

    Ok(results)
}

fn process_chunk_parallel(
    files: &[PathBuf],
    config: &BatchConfig,
    preferences: &Preferences,
) -> Result<BatchResults, BatchError> {
    let results = Arc::new(Mutex::new(BatchResults::new()));
    let files_per_thread = files.len().div_ceil(config.max_threads);

    let mut handles = Vec::new();
    for thread_id in 0..config.max_threads {
        let start_idx = thread_id * files_per_thread;
        if start_idx >= files.len() {
            break;
        }
        let end_idx = ((thread_id + 1) * files_per_thread).min(files.len());

        let thread_files: Vec<PathBuf> = files[start_idx..end_idx].to_vec();
        let thread_preferences = preferences.clone();
        let results_clone = Arc::clone(&results);

        let handle = thread::spawn(move || {
            for (local_id, file_path) in thread_files.iter().enumerate() {
                let file_id = start_idx + local_id;
                let path_str = file_path.display().to_string();

                match pipeline::process_file_with_preferences(
                    &path_str,
                    &thread_preferences,
                    file_id,
                ) {
                    Ok(result) => {
                        let mut guard = results_clone.lock().unwrap();
                        guard.add_success(file_path.clone(), result);
                    }
                    Err(error) => {
                        let mut guard = results_clone.lock().unwrap();
                        guard.add_failure(file_path.clone(), error);
                    }
                }
            }
        });

        handles.push(handle);
    }

    for handle in handles {
        if handle.join().is_err() {
            // Must not assume the global logger was ever initialized
            crate::logging::safe_log_error(
                codes::system::INTERNAL_ERROR,
                "Worker thread panicked during batch processing",
            );
            return Err(BatchError::ThreadError {
                message: "Thread panicked during processing".to_string(),
            });
        }
    }

    let final_results = Arc::try_unwrap(results)
        .map_err(|_| BatchError::ThreadError {
            message: "Failed to extract results from thread pool".to_string(),
        })?
        .into_inner()
        .map_err(|_| BatchError::ThreadError {
            message: "Results mutex poisoned".to_string(),
        })?;

    Ok(final_results)
}

fn calculate_chunk_size(file_count: usize, max_threads: usize) -> usize {
    const MAX_CHUNK_SIZE: usize = 50;
    file_count.div_ceil(max_threads).clamp(1, MAX_CHUNK_SIZE)
}

fn log_batch_complete(results: &BatchResults, threads: usize) {
    crate::log_success!(
        codes::success::BATCH_COMPLETE,
        "Batch processing completed",
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "tags" => results.total_tags(),
        "threads" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Process a directory with the given configuration and preferences
pub fn process_directory(
    dir_path: &Path,
    config: &BatchConfig,
    preferences: &Preferences,
) -> Result<BatchResults, BatchError> {
    if config.max_threads <= 1 {
        process_directory_sequential(dir_path, config, preferences)
    } else {
        process_directory_parallel(dir_path, config, preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn quiet_config() -> BatchConfig {
        BatchConfig {
            progress_reporting: false,
            ..BatchConfig::default()
        }
    }

    #[test]
    fn test_file_discovery() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.m"), "function f()\nend\n").unwrap();
        fs::write(dir.path().join("b.m"), "classdef B\nend\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not matlab").unwrap();

        let files = discover_matlab_files(dir.path(), &quiet_config()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "m"));
    }

    #[test]
    fn test_recursive_discovery() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("top.m"), "x = 1;\n").unwrap();
        fs::write(sub.join("deep.m"), "y = 2;\n").unwrap();

        let recursive = discover_matlab_files(dir.path(), &quiet_config()).unwrap();
        assert_eq!(recursive.len(), 2);

        let flat_config = BatchConfig {
            recursive: false,
            ..quiet_config()
        };
        let flat = discover_matlab_files(dir.path(), &flat_config).unwrap();
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_discovery_empty_directory() {
        let dir = tempdir().unwrap();
        let result = discover_matlab_files(dir.path(), &quiet_config());
        assert!(matches!(result, Err(BatchError::NoFilesFound { .. })));
    }

    #[test]
    fn test_is_matlab_file() {
        let dir = tempdir().unwrap();
        let m_file = dir.path().join("test.m");
        let txt_file = dir.path().join("test.txt");
        fs::write(&m_file, "content").unwrap();
        fs::write(&txt_file, "content").unwrap();

        assert!(is_matlab_file(&m_file));
        assert!(!is_matlab_file(&txt_file));
        assert!(!is_matlab_file(dir.path()));
    }

    #[test]
    fn test_sequential_batch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.m"), "function f()\nend\n").unwrap();
        fs::write(
            dir.path().join("two.m"),
            "classdef T\n  methods\n    function go(obj)\n    end\n  end\nend\n",
        )
        .unwrap();

        let results = process_directory_sequential(
            dir.path(),
            &quiet_config(),
            &Preferences::default(),
        )
        .unwrap();

        assert_eq!(results.files_processed, 2);
        assert_eq!(results.success_count(), 2);
        assert_eq!(results.total_tags(), 3);
    }

    #[test]
    fn test_parallel_batch_matches_sequential() {
        let dir = tempdir().unwrap();
        for i in 0..6 {
            fs::write(
                dir.path().join(format!("file{}.m", i)),
                "function out = f(x)\nout = x;\nend\n",
            )
            .unwrap();
        }

        let config = BatchConfig {
            max_threads: 3,
            ..quiet_config()
        };
        let results =
            process_directory_parallel(dir.path(), &config, &Preferences::default()).unwrap();

        assert_eq!(results.files_processed, 6);
        assert_eq!(results.failure_count(), 0);
        assert_eq!(results.total_tags(), 6);
    }

    #[test]
    fn test_chunk_size_calculation() {
        assert_eq!(calculate_chunk_size(100, 4), 25);
        assert_eq!(calculate_chunk_size(10, 4), 3);
        assert_eq!(calculate_chunk_size(1, 4), 1);
        assert_eq!(calculate_chunk_size(1000, 4), 50);
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert!(config.max_threads >= 1);
        assert!(config.recursive);
        assert!(!config.fail_fast);
        assert!(config.max_files.is_none());
    }
}
