//! Marks histogram over fixed 10-point bins.

use serde::Serialize;
use std::fmt;

pub const BIN_WIDTH: u32 = 10;
pub const BIN_COUNT: usize = 10;

/// One 10-point marks interval.
///
/// The first nine bins are half-open `[lo, lo+10)`. The last bin is closed,
/// `[90, 100]`, so a perfect score of 100 is counted rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBin {
    pub lo: u32,
    pub hi: u32,
}

impl HistogramBin {
    /// The ten bins in ascending order.
    pub fn all() -> [HistogramBin; BIN_COUNT] {
        std::array::from_fn(|i| {
            let lo = i as u32 * BIN_WIDTH;
            HistogramBin {
                lo,
                hi: lo + BIN_WIDTH,
            }
        })
    }

    pub fn contains(&self, total: f64) -> bool {
        let last = self.hi == 100;
        if last {
            total >= f64::from(self.lo) && total <= f64::from(self.hi)
        } else {
            total >= f64::from(self.lo) && total < f64::from(self.hi)
        }
    }

    /// Range label used in tables and chart axes, e.g. `40-50`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.lo, self.hi)
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

/// Counts per bin, always covering all ten bins in ascending order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HistogramTally {
    counts: [usize; BIN_COUNT],
}

impl HistogramTally {
    /// All 10 (bin, count) pairs in ascending bin order, including zeros.
    pub fn entries(&self) -> impl Iterator<Item = (HistogramBin, usize)> + '_ {
        HistogramBin::all()
            .into_iter()
            .zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl Serialize for HistogramTally {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(BIN_COUNT))?;
        for (bin, count) in self.entries() {
            map.serialize_entry(&bin.label(), &count)?;
        }
        map.end()
    }
}

/// Bins totals into the ten fixed intervals.
///
/// Missing totals are excluded here (grading counts them as F instead), as
/// are values outside 0-100, which fit no bin.
pub fn bin_histogram(totals: impl IntoIterator<Item = Option<f64>>) -> HistogramTally {
    let bins = HistogramBin::all();
    let mut tally = HistogramTally::default();

    for total in totals.into_iter().flatten() {
        if let Some(i) = bins.iter().position(|b| b.contains(total)) {
            tally.counts[i] += 1;
        }
    }

    tally
}
