use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct BenchmarkMetrics {
    // Generation Stats
    pub total_chunks_generated: AtomicUsize,
    pub total_generation_time_us: AtomicU64,
    pub max_generation_time_us: AtomicU64,

    // Export Stats
    pub total_serialization_us: AtomicU64,
    pub total_compression_us: AtomicU64,
    pub total_bytes_raw: AtomicUsize,
    pub total_bytes_compressed: AtomicUsize,

    // Session
    pub start_time: Option<Instant>,
    pub config_summary: String,
}

impl BenchmarkMetrics {
    pub fn new(config_summary: String) -> Self {
        Self {
            start_time: Some(Instant::now()),
            config_summary,
            ..Default::default()
        }
    }

    pub fn record_generation(&self, duration: Duration) {
        self.total_chunks_generated.fetch_add(1, Ordering::Relaxed);
        let us = duration.as_micros() as u64;
        self.total_generation_time_us.fetch_add(us, Ordering::Relaxed);
        self.max_generation_time_us.fetch_max(us, Ordering::Relaxed);
    }

    pub fn record_serialization(&self, duration: Duration) {
        self.total_serialization_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_compression(&self, duration: Duration) {
        self.total_compression_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_chunk_sizes(&self, raw: usize, compressed: usize) {
        self.total_bytes_raw.fetch_add(raw, Ordering::Relaxed);
        self.total_bytes_compressed.fetch_add(compressed, Ordering::Relaxed);
    }

    pub fn chunks_generated(&self) -> usize {
        self.total_chunks_generated.load(Ordering::Relaxed)
    }

    pub fn generate_report(&self) -> String {
        let uptime = self.start_time.unwrap_or_else(Instant::now).elapsed();
        let generated = self.chunks_generated();
        let per_chunk = |total_ms: f64| if generated > 0 { total_ms / generated as f64 } else { 0.0 };

        let gen_time_total = self.total_generation_time_us.load(Ordering::Relaxed) as f64 / 1000.0; // ms
        let gen_max = self.max_generation_time_us.load(Ordering::Relaxed) as f64 / 1000.0; // ms
        let ser_time = self.total_serialization_us.load(Ordering::Relaxed) as f64 / 1000.0;
        let comp_time = self.total_compression_us.load(Ordering::Relaxed) as f64 / 1000.0;

        let raw = self.total_bytes_raw.load(Ordering::Relaxed);
        let compressed = self.total_bytes_compressed.load(Ordering::Relaxed);
        let avg_raw_kb = per_chunk(raw as f64) / 1024.0;
        let avg_comp_kb = per_chunk(compressed as f64) / 1024.0;
        let compression_ratio = if compressed > 0 { raw as f64 / compressed as f64 } else { 0.0 };

        format!(
            "PlotGen Benchmark Report\n\
             ========================\n\
             Configuration: {}\n\
             Session Duration: {:.2?}\n\n\
             [Generation]\n\
             Chunks Generated: {}\n\
             Total Time: {:.2} ms\n\
             Avg Time: {:.3} ms/chunk\n\
             Max Time: {:.3} ms\n\n\
             [Export]\n\
             Serialization: {:.3} ms/chunk\n\
             Compression: {:.3} ms/chunk\n\
             Compression Ratio: {:.2}x ({:.1} KB -> {:.1} KB)\n",
            self.config_summary,
            uptime,
            generated,
            gen_time_total,
            per_chunk(gen_time_total),
            gen_max,
            per_chunk(ser_time),
            per_chunk(comp_time),
            compression_ratio,
            avg_raw_kb,
            avg_comp_kb,
        )
    }
}
