//! Bounded random sampling of capture records.
//!
//! The sampler keeps at most `K` transformed records out of a single-pass
//! stream of unknown length. Records that fail the eligibility filter are
//! invisible to it: they are neither stored nor counted.
//!
//! The replacement rule is a cycling-slot variant, not the textbook
//! reservoir algorithm. For the `P`-th eligible
//! record (0-indexed) slot `P % K` is overwritten with probability
//! `1 / (P / K + 1)`. Slots are visited in order rather than at random, so
//! historical records do not all have the same retention probability.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_PORT_SUFFIX, SAMPLE_EXCLUDED_SUFFIX, SAMPLE_MIME, SAMPLE_STATUS,
};
use crate::parse::CaptureRecord;

/// A retained `(timestamp, url)` pair. Serializes as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample(pub String, pub String);

impl Sample {
    /// Creates a sample from a 14-digit timestamp and a URL.
    pub fn new(timestamp: impl Into<String>, url: impl Into<String>) -> Self {
        Sample(timestamp.into(), url.into())
    }

    /// Capture timestamp.
    pub fn timestamp(&self) -> &str {
        &self.0
    }

    /// Normalized capture URL.
    pub fn url(&self) -> &str {
        &self.1
    }

    /// Replay URL of this memento under `replay_prefix`
    /// (e.g. `https://web.archive.org/web/20200101000000/http://example.com/`).
    pub fn memento_url(&self, replay_prefix: &str) -> String {
        format!(
            "{}/{}/{}",
            replay_prefix.trim_end_matches('/'),
            self.timestamp(),
            self.url()
        )
    }
}

/// Predicate deciding whether a record may be sampled.
pub type Eligibility = fn(&CaptureRecord) -> bool;

/// Projection of an eligible record to its stored form.
pub type Transform = fn(&CaptureRecord) -> Sample;

/// Default eligibility: successful HTML captures other than `robots.txt`.
pub fn is_sample_candidate(record: &CaptureRecord) -> bool {
    record.status == SAMPLE_STATUS
        && record.mime == SAMPLE_MIME
        && !record.surt.ends_with(SAMPLE_EXCLUDED_SUFFIX)
}

/// Default transform: the timestamp and the URL with its first `:80/`
/// default-port suffix reduced to `/`.
pub fn sample_parts(record: &CaptureRecord) -> Sample {
    Sample::new(
        record.timestamp.clone(),
        record.url.replacen(DEFAULT_PORT_SUFFIX, "/", 1),
    )
}

/// Sampler holding up to `capacity` slots.
#[derive(Debug, Clone)]
pub struct BoundedSampler {
    slots: Vec<Option<Sample>>,
    processed: u64,
    rng: StdRng,
    eligible: Eligibility,
    transform: Transform,
}

impl BoundedSampler {
    /// Creates a sampler seeded from the operating system.
    ///
    /// `capacity` must be non-zero; use [`Sampler::Disabled`] otherwise.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_os_rng())
    }

    /// Creates a sampler with a fixed seed, for reproducible samples.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, rng: StdRng) -> Self {
        debug_assert!(capacity > 0, "bounded sampler needs at least one slot");
        Self {
            slots: vec![None; capacity],
            processed: 0,
            rng,
            eligible: is_sample_candidate,
            transform: sample_parts,
        }
    }

    /// Replaces the eligibility filter and transform.
    pub fn with_filter(mut self, eligible: Eligibility, transform: Transform) -> Self {
        self.eligible = eligible;
        self.transform = transform;
        self
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of eligible records seen so far.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Offers one record to the sampler.
    pub fn offer(&mut self, record: &CaptureRecord) {
        if !(self.eligible)(record) {
            return;
        }
        let capacity = self.slots.len() as u64;
        let quotient = self.processed / capacity;
        // Bounded by capacity, so the cast back to usize is lossless.
        let slot = (self.processed % capacity) as usize;
        let draw: f64 = self.rng.random();
        if draw < 1.0 / (quotient + 1) as f64 {
            self.slots[slot] = Some((self.transform)(record));
        }
        self.processed += 1;
    }

    /// Occupied slots in slot order.
    pub fn samples(&self) -> Vec<Sample> {
        self.slots.iter().flatten().cloned().collect()
    }
}

/// Sampling strategy, chosen once at construction.
#[derive(Debug, Clone)]
pub enum Sampler {
    /// No sampling; the sample is always empty.
    Disabled,
    /// Live bounded sampling.
    Bounded(BoundedSampler),
    /// A sample list restored from a saved report. Read-only: offered records
    /// are ignored because the position of the sampler that produced them is unknown.
    Restored(Vec<Sample>),
}

impl Sampler {
    /// Creates a sampler keeping up to `capacity` samples. A zero capacity
    /// gives [`Sampler::Disabled`].
    pub fn new(capacity: usize, seed: Option<u64>) -> Self {
        match (capacity, seed) {
            (0, _) => Sampler::Disabled,
            (capacity, Some(seed)) => Sampler::Bounded(BoundedSampler::with_seed(capacity, seed)),
            (capacity, None) => Sampler::Bounded(BoundedSampler::new(capacity)),
        }
    }

    /// Offers one record. Only a live bounded sampler reacts.
    pub fn offer(&mut self, record: &CaptureRecord) {
        if let Sampler::Bounded(sampler) = self {
            sampler.offer(record);
        }
    }

    /// Materialized sample list.
    pub fn samples(&self) -> Vec<Sample> {
        match self {
            Sampler::Disabled => Vec::new(),
            Sampler::Bounded(sampler) => sampler.samples(),
            Sampler::Restored(samples) => samples.clone(),
        }
    }

    /// Replaces this sampler with a frozen copy of `samples`.
    pub fn restore(&mut self, samples: Vec<Sample>) {
        *self = Sampler::Restored(samples);
    }
}
