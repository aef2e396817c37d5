/// Progress reporting for batch extraction
///
/// Writes throttled updates to stderr, leaving stdout clean for piped JSON.
/// The total can grow while a stylesheet batch discovers imports.
use std::time::Instant;

pub struct ProgressReporter {
    label: &'static str,
    start_time: Instant,
    total_files: usize,
    last_report: Instant,
}

impl ProgressReporter {
    pub fn new(label: &'static str, total_files: usize) -> Self {
        eprintln!("🚀 Starting {} extraction: {} files", label, total_files);
        let now = Instant::now();
        Self {
            label,
            start_time: now,
            total_files,
            last_report: now,
        }
    }

    /// Account for files discovered after the batch started
    pub fn add_files(&mut self, count: usize) {
        self.total_files += count;
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    /// Report progress (throttled to one line per 100ms)
    pub fn report(&mut self, processed: usize) {
        let now = Instant::now();
        if now.duration_since(self.last_report).as_millis() < 100 && processed < self.total_files {
            return;
        }
        self.last_report = now;

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 { processed as f64 / elapsed } else { 0.0 };
        let pct = if self.total_files > 0 {
            (processed as f64 / self.total_files as f64 * 100.0) as u32
        } else {
            0
        };

        eprintln!(
            "⚡ Progress: {}/{} ({}%) - {:.0} files/sec",
            processed, self.total_files, pct, rate
        );
    }

    pub fn complete(&self, extracted: usize) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        eprintln!(
            "✅ {} extraction complete: {} of {} files in {:.2}s",
            self.label, extracted, self.total_files, elapsed
        );
    }
}
