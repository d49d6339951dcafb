//! Age and physique distributions.

use serde::{Deserialize, Serialize};

use crate::schema::{AthleteRecord, CanonicalTable, Medal, bits};

use super::dedup::unique_by;
use super::frame::{Frame, ToFrame};

/// Sports shown by the gold-age view when none are requested.
pub const DEFAULT_FEATURED_SPORTS: [&str; 4] = ["Athletics", "Swimming", "Gymnastics", "Rowing"];

/// Medal class label for athletes without a medal.
pub const NO_MEDAL: &str = "No Medal";

/// Bin width, in years, used for age histograms.
pub const AGE_BIN_SIZE: f64 = 2.0;

/// Upper bound on histogram bins; wider ranges yield no histogram.
pub const MAX_HISTOGRAM_BINS: usize = 1_000;

// =============================================================================
// SAMPLING
// =============================================================================

/// Sampling applied to distribution views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum values kept per distribution (None = keep all).
    pub sample_cap: Option<usize>,
    /// Seed for the reservoir sampler, so capped samples are reproducible.
    pub sample_seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_cap: None,
            sample_seed: 42,
        }
    }
}

impl AnalysisConfig {
    /// Bound a distribution to `sample_cap` values.
    pub fn sample(&self, distribution: Distribution) -> Distribution {
        match self.sample_cap {
            Some(cap) if distribution.values.len() > cap => Distribution {
                values: reservoir(&distribution.values, cap, self.sample_seed),
                label: distribution.label,
            },
            _ => distribution,
        }
    }
}

/// Uniform sample of `capacity` values (Algorithm R).
fn reservoir(values: &[f64], capacity: usize, seed: u64) -> Vec<f64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut sample: Vec<f64> = values.iter().take(capacity).copied().collect();
    for (seen, &value) in values.iter().enumerate().skip(capacity) {
        let j = rng.usize(0..=seen);
        if j < capacity {
            sample[j] = value;
        }
    }
    sample
}

// =============================================================================
// DISTRIBUTION
// =============================================================================

/// Summary statistics of a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub median: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
}

/// One histogram bin, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// One point of an estimated density curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// A labelled sample of numeric values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub label: String,
    pub values: Vec<f64>,
}

impl Distribution {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Summary statistics, or None for an empty sample.
    ///
    /// Mean and variance use Welford's single-pass update.
    pub fn summary(&self) -> Option<Summary> {
        if self.values.is_empty() {
            return None;
        }

        let mut count = 0usize;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for &value in &self.values {
            count += 1;
            let delta = value - mean;
            mean += delta / count as f64;
            m2 += delta * (value - mean);
        }

        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        let percentile = |p: f64| {
            let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
            sorted[idx.min(sorted.len() - 1)]
        };

        Some(Summary {
            count,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            std: if count < 2 { 0.0 } else { (m2 / count as f64).sqrt() },
            median: percentile(50.0),
            q1: percentile(25.0),
            q3: percentile(75.0),
        })
    }

    /// Fixed-width histogram; bins are aligned to multiples of `bin_size`.
    ///
    /// Empty when the range would need more than [`MAX_HISTOGRAM_BINS`] bins.
    pub fn histogram(&self, bin_size: f64) -> Vec<HistogramBin> {
        let Some(summary) = self.summary() else {
            return Vec::new();
        };
        if !(bin_size > 0.0) {
            return Vec::new();
        }

        let origin = (summary.min / bin_size).floor() * bin_size;
        let span = ((summary.max - origin) / bin_size).floor();
        if !(0.0..MAX_HISTOGRAM_BINS as f64).contains(&span) {
            tracing::debug!(label = %self.label, span, "histogram range too wide");
            return Vec::new();
        }
        let bins = span as usize + 1;
        let mut counts = vec![0usize; bins];
        for &value in &self.values {
            let idx = ((value - origin) / bin_size).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: origin + i as f64 * bin_size,
                end: origin + (i + 1) as f64 * bin_size,
                count,
            })
            .collect()
    }

    /// Gaussian kernel density estimate over `[min, max]`.
    ///
    /// Bandwidth follows Scott's rule. Samples with fewer than two distinct
    /// values have no density and yield an empty curve.
    pub fn density(&self, points: usize) -> Vec<DensityPoint> {
        let n = self.values.len();
        if n < 2 || points < 2 {
            return Vec::new();
        }

        let mean = self.values.iter().sum::<f64>() / n as f64;
        let variance =
            self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        let bandwidth = variance.sqrt() * (n as f64).powf(-0.2);
        if !(bandwidth > 0.0) {
            return Vec::new();
        }

        let (min, max) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let step = (max - min) / (points - 1) as f64;
        let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

        (0..points)
            .map(|i| {
                let x = min + i as f64 * step;
                let density = self
                    .values
                    .iter()
                    .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                    .sum::<f64>()
                    * norm;
                DensityPoint { x, density }
            })
            .collect()
    }
}

// =============================================================================
// VIEWS
// =============================================================================

/// Ages of all athletes and of each medal class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDistribution {
    pub all: Distribution,
    pub gold: Distribution,
    pub silver: Distribution,
    pub bronze: Distribution,
}

impl AgeDistribution {
    pub fn distributions(&self) -> [&Distribution; 4] {
        [&self.all, &self.gold, &self.silver, &self.bronze]
    }

    /// True when no athlete has a recorded age.
    pub fn is_empty(&self) -> bool {
        self.distributions().iter().all(|d| d.is_empty())
    }

    /// Apply sampling to all four distributions.
    pub fn sampled(self, config: &AnalysisConfig) -> Self {
        Self {
            all: config.sample(self.all),
            gold: config.sample(self.gold),
            silver: config.sample(self.silver),
            bronze: config.sample(self.bronze),
        }
    }
}

/// Height and weight of one athlete entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysiquePoint {
    pub name: String,
    pub region: String,
    /// Centimetres.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub medal: Option<Medal>,
}

impl PhysiquePoint {
    /// Medal label, or "No Medal".
    pub fn medal_class(&self) -> &'static str {
        self.medal.map_or(NO_MEDAL, |m| m.label())
    }
}

fn ages<'a>(rows: impl IntoIterator<Item = &'a &'a AthleteRecord>) -> Vec<f64> {
    rows.into_iter().filter_map(|r| r.age).collect()
}

/// Ages of distinct athletes (name and region), by medal class.
pub fn age_distribution(table: &CanonicalTable) -> AgeDistribution {
    let athletes = unique_by(table, |r| (r.name.as_str(), r.region.as_str()));
    let class = |medal: Medal| ages(athletes.iter().filter(|r| r.medal == Some(medal)));

    AgeDistribution {
        all: Distribution::new("All Athletes", ages(&athletes)),
        gold: Distribution::new(Medal::Gold.label(), class(Medal::Gold)),
        silver: Distribution::new(Medal::Silver.label(), class(Medal::Silver)),
        bronze: Distribution::new(Medal::Bronze.label(), class(Medal::Bronze)),
    }
}

/// Ages of gold medallists, one distribution per requested sport.
///
/// Sports are kept in request order; those without data are left out.
pub fn gold_age_distribution_by_sport<S: AsRef<str>>(
    table: &CanonicalTable,
    sports: &[S],
) -> Vec<Distribution> {
    let gold: Vec<&AthleteRecord> = unique_by(table, |r| {
        (
            r.name.as_str(),
            r.region.as_str(),
            r.sport.as_str(),
            bits(r.age),
            r.medal,
        )
    })
    .into_iter()
    .filter(|r| r.medal == Some(Medal::Gold))
    .collect();

    let mut out: Vec<Distribution> = Vec::new();
    for sport in sports.iter().map(AsRef::as_ref) {
        if out.iter().any(|d| d.label == sport) {
            continue;
        }
        let values = ages(gold.iter().filter(|r| r.sport == sport));
        if !values.is_empty() {
            out.push(Distribution::new(sport, values));
        }
    }
    tracing::debug!(requested = sports.len(), kept = out.len(), "gold age distributions");
    out
}

/// Height and weight of distinct athlete entries in one sport.
pub fn height_weight_scatter(table: &CanonicalTable, sport: &str) -> Vec<PhysiquePoint> {
    unique_by(table, |r| {
        (
            r.name.as_str(),
            r.region.as_str(),
            r.sport.as_str(),
            bits(r.height),
            bits(r.weight),
            r.medal,
        )
    })
    .into_iter()
    .filter(|r| r.sport == sport)
    .map(|r| PhysiquePoint {
        name: r.name.clone(),
        region: r.region.clone(),
        height: r.height,
        weight: r.weight,
        medal: r.medal,
    })
    .collect()
}

fn long_frame<'a>(distributions: impl Iterator<Item = &'a Distribution> + Clone) -> Frame {
    let labels = distributions
        .clone()
        .flat_map(|d| d.values.iter().map(move |_| d.label.as_str()));
    let values = distributions.flat_map(|d| d.values.iter().map(|&v| Some(v)));
    Frame::new().text("Group", labels).float("Age", values)
}

impl ToFrame for AgeDistribution {
    fn to_frame(&self) -> Frame {
        long_frame(self.distributions().into_iter())
    }
}

impl ToFrame for [Distribution] {
    fn to_frame(&self) -> Frame {
        long_frame(self.iter())
    }
}

impl ToFrame for [PhysiquePoint] {
    fn to_frame(&self) -> Frame {
        Frame::new()
            .text("Name", self.iter().map(|p| p.name.as_str()))
            .text("region", self.iter().map(|p| p.region.as_str()))
            .float("Height", self.iter().map(|p| p.height))
            .float("Weight", self.iter().map(|p| p.weight))
            .text("Medal", self.iter().map(|p| p.medal_class()))
    }
}
