/// Parallel batch extraction
///
/// Fans a list of files out over a bounded rayon pool that is built per batch
/// and collects a path -> metadata map. Files that fail to read, parse or
/// classify are omitted from the map and logged; nothing aborts the batch.
/// Stylesheet batches also follow `@import`s and include the whole import
/// closure, each file parsed at most once.
mod imports;
mod progress;

pub use imports::resolve_import;
pub use progress::ProgressReporter;

use crate::config::MetaConfig;
use crate::error::{MetaError, Result};
use crate::extractors::meta::{ComponentMeta, CssMeta};
use crate::extractors::ExtractorManager;
use crate::language::{detect_grammar_from_extension, Grammar};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Configuration for parallel extraction
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of worker threads (defaults to CPU count)
    pub num_threads: usize,

    /// Print throttled progress lines to stderr
    pub report_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            report_progress: false,
        }
    }
}

impl BatchConfig {
    pub fn from_meta(config: &MetaConfig) -> Self {
        Self {
            num_threads: config.worker_count(),
            ..Self::default()
        }
    }
}

/// Batch-level cancellation flag shared between the caller and the workers.
///
/// Once cancelled, files that have not started are skipped; files already
/// being extracted run to completion and still land in the result.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Shared per-batch state: the result map and progress accounting
struct BatchState<T> {
    results: Mutex<BTreeMap<String, T>>,
    processed: AtomicUsize,
    progress: Option<Mutex<ProgressReporter>>,
}

impl<T> BatchState<T> {
    fn new(label: &'static str, total: usize, report_progress: bool) -> Self {
        Self {
            results: Mutex::new(BTreeMap::new()),
            processed: AtomicUsize::new(0),
            progress: report_progress.then(|| Mutex::new(ProgressReporter::new(label, total))),
        }
    }

    fn insert(&self, key: String, value: T) {
        let mut results = self.results.lock().unwrap_or_else(|poisoned| {
            warn!("Result map lock poisoned, recovering to keep {}", key);
            poisoned.into_inner()
        });
        results.insert(key, value);
    }

    fn discovered(&self, count: usize) {
        if let Some(Ok(mut progress)) = self.progress.as_ref().map(|p| p.lock()) {
            progress.add_files(count);
        }
    }

    fn tick(&self) {
        let processed = self.processed.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(Ok(mut progress)) = self.progress.as_ref().map(|p| p.lock()) {
            progress.report(processed);
        }
    }

    fn finish(self) -> BTreeMap<String, T> {
        let results = self
            .results
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(progress) = self.progress {
            let progress = progress.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
            progress.complete(results.len());
        }
        results
    }
}

/// Parallel extractor for script and stylesheet batches
pub struct ParallelExtractor {
    manager: ExtractorManager,
    config: BatchConfig,
    cancellation: CancellationToken,
}

impl ParallelExtractor {
    pub fn new(manager: ExtractorManager, config: BatchConfig) -> Self {
        Self {
            manager,
            config,
            cancellation: CancellationToken::new(),
        }
    }

    /// Share an externally owned cancellation token with this extractor
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Extract component metadata from every script, keyed by the given path.
    /// Modules without a registration call are omitted like failures.
    pub fn extract_scripts(&self, paths: &[String]) -> BTreeMap<String, ComponentMeta> {
        let state = BatchState::new("script", paths.len(), self.config.report_progress);

        self.install(|| {
            paths.par_iter().for_each(|path| {
                if self.cancellation.is_cancelled() {
                    return;
                }
                match self.manager.parse_script_file(Path::new(path), None) {
                    Ok(Some(meta)) => state.insert(path.clone(), meta),
                    Ok(None) => debug!("Skipping {}: no registration call", path),
                    Err(e) => debug!("Skipping {}: {}", path, e),
                }
                state.tick();
            });
        });

        let results = state.finish();
        info!("Extracted {} of {} scripts", results.len(), paths.len());
        results
    }

    /// Extract stylesheet metadata for the given files and everything they
    /// import, transitively.
    ///
    /// Requested files are keyed by the given path, discovered imports by
    /// their canonical path.
    pub fn extract_stylesheets(&self, paths: &[String]) -> BTreeMap<String, CssMeta> {
        let state = BatchState::new("css", paths.len(), self.config.report_progress);
        let visited: Mutex<HashSet<PathBuf>> = Mutex::new(HashSet::new());

        // requested files claim their canonical path before any import can
        if let Ok(mut visited) = visited.lock() {
            visited.extend(paths.iter().filter_map(|path| fs::canonicalize(path).ok()));
        }

        let state_ref = &state;
        let visited_ref = &visited;
        self.install(|| {
            rayon::scope(|scope| {
                for path in paths {
                    scope.spawn(move |scope| {
                        self.visit_stylesheet(scope, state_ref, visited_ref, path.clone(), PathBuf::from(path))
                    });
                }
            });
        });

        let results = state.finish();
        info!(
            "Extracted {} stylesheets from {} requested files",
            results.len(),
            paths.len()
        );
        results
    }

    fn visit_stylesheet<'s>(
        &'s self,
        scope: &rayon::Scope<'s>,
        state: &'s BatchState<CssMeta>,
        visited: &'s Mutex<HashSet<PathBuf>>,
        key: String,
        path: PathBuf,
    ) {
        if self.cancellation.is_cancelled() {
            return;
        }

        let meta = match self.manager.parse_css_file(&path) {
            Ok(meta) => meta,
            Err(e) => {
                debug!("Skipping {}: {}", key, e);
                state.tick();
                return;
            }
        };

        let style_root = self.manager.config().style_root.as_deref();
        for target in &meta.imports {
            let Some(resolved) = resolve_import(&path, target, style_root) else {
                debug!("Not following remote import {} in {}", target, key);
                continue;
            };
            let canonical = match fs::canonicalize(&resolved) {
                Ok(canonical) => canonical,
                Err(e) => {
                    debug!("Unresolvable import {} in {}: {}", target, key, e);
                    continue;
                }
            };
            if !claim(visited, &canonical) {
                continue;
            }

            state.discovered(1);
            let import_key = canonical.to_string_lossy().into_owned();
            scope.spawn(move |scope| self.visit_stylesheet(scope, state, visited, import_key, canonical));
        }

        state.insert(key, meta);
        state.tick();
    }

    /// Run `op` inside a pool sized for this batch
    fn install<OP>(&self, op: OP)
    where
        OP: FnOnce() + Send,
    {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_threads.max(1))
            .build()
        {
            Ok(pool) => pool.install(op),
            Err(e) => {
                warn!("Failed to build thread pool: {}, extracting without a dedicated pool", e);
                op()
            }
        }
    }
}

/// Atomically check-and-insert a canonical path into the visited set
fn claim(visited: &Mutex<HashSet<PathBuf>>, canonical: &Path) -> bool {
    match visited.lock() {
        Ok(mut visited) => visited.insert(canonical.to_path_buf()),
        Err(_) => false,
    }
}

/// Recursively discover files for one grammar under `directory`, sorted
pub fn discover_files(directory: &Path, grammar: Grammar) -> Result<Vec<String>> {
    if !directory.exists() {
        return Err(MetaError::NotFound {
            path: directory.to_path_buf(),
        });
    }
    if !directory.is_dir() {
        return Err(MetaError::Usage(format!("{} is not a directory", directory.display())));
    }

    let mut files: Vec<String> = WalkDir::new(directory)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_string_lossy().into_owned())
        .filter(|path| detect_grammar_from_extension(path) == Some(grammar))
        .collect();
    files.sort();

    debug!("Discovered {} {} files in {}", files.len(), grammar.name(), directory.display());
    Ok(files)
}
