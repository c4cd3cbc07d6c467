use std::{
    fmt::{self, Display, Write},
    num::NonZeroUsize,
};

/// a histogram of cpu utilization.
///
/// `0..=100` is split into a fixed number of buckets, and each bucket counts how many cpus fell
/// into it. the histogram is rendered as one glyph per bucket, taller glyphs meaning more cpus.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Histogram {
    /// how many cpus fell into each bucket.
    buckets: Vec<usize>,
    /// the number of cpus a full bucket would hold. only used to scale glyphs.
    num_cpus: usize,
}

// === impl Histogram ===

impl Histogram {
    /// glyphs, from least to most occupied.
    pub const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    pub fn new(bins: NonZeroUsize, num_cpus: usize) -> Self {
        Self {
            buckets: vec![0; bins.get()],
            num_cpus,
        }
    }

    /// counts each utilization value into its bucket.
    pub fn update(&mut self, values: &[u8]) {
        for &value in values {
            let bucket = self.bucket(value);
            self.buckets[bucket] += 1;
        }
    }

    /// empties every bucket.
    pub fn reset(&mut self) {
        self.buckets.fill(0);
    }

    pub fn buckets(&self) -> &[usize] {
        &self.buckets
    }

    /// returns the bucket a utilization value falls into.
    ///
    /// buckets are `100 / (bins - 1)` wide, so the last bucket is the one that holds 100%.
    fn bucket(&self, value: u8) -> usize {
        let last = self.buckets.len() - 1;
        if last == 0 {
            return 0;
        }

        let width = (100 / last).max(1);
        (usize::from(value) / width).min(last)
    }

    /// returns the glyph for a bucket holding `count` cpus.
    fn glyph(&self, count: usize) -> char {
        let Self { num_cpus, .. } = *self;
        let top = Self::GLYPHS.len() - 1;

        if num_cpus == 0 {
            return Self::GLYPHS[0];
        }

        let scaled = count as f64 / num_cpus as f64 * top as f64;
        let index = (scaled.round() as usize).min(top);

        Self::GLYPHS[index]
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.buckets
            .iter()
            .try_for_each(|&count| f.write_char(self.glyph(count)))
    }
}
