//! Age bucket enum and distribution counters.

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    Under20,
    From20To40,
    From40To60,
    Over60,
}

impl AgeBucket {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Under20 => "< 20",
            Self::From20To40 => "20 to 40",
            Self::From40To60 => "40 to 60",
            Self::Over60 => "> 60",
        }
    }

    /// Report order.
    pub fn all() -> &'static [Self] {
        &[Self::Under20, Self::From20To40, Self::From40To60, Self::Over60]
    }

    /// 40 counts toward `20 to 40`, 60 toward `40 to 60`.
    pub fn from_age(age: i64) -> Self {
        if age < 20 {
            Self::Under20
        } else if age <= 40 {
            Self::From20To40
        } else if age <= 60 {
            Self::From40To60
        } else {
            Self::Over60
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Under20 => 0,
            Self::From20To40 => 1,
            Self::From40To60 => 2,
            Self::Over60 => 3,
        }
    }
}

/// Anything that exposes an integer `age`.
pub trait AgeSource {
    fn age(&self) -> Result<i64, AppError>;
}

/// Parse a textual age the way every source does: trimmed, base-10,
/// within the 32-bit range of the `age` column.
pub fn parse_age(raw: &str, record: impl FnOnce() -> String) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i32>()
        .map(i64::from)
        .map_err(|_| AppError::InvalidAge {
            record: record(),
            value: raw.to_string(),
        })
}

/// Range check for ages that arrive already numeric.
pub fn check_age(age: i64, record: impl FnOnce() -> String) -> Result<i64, AppError> {
    i32::try_from(age)
        .map(i64::from)
        .map_err(|_| AppError::InvalidAge {
            record: record(),
            value: age.to_string(),
        })
}

/// Per-bucket counters for one report run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeDistribution {
    counts: [usize; 4],
    total: usize,
}

impl AgeDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: [usize; 4], total: usize) -> Self {
        Self { counts, total }
    }

    pub fn record(&mut self, age: i64) -> AgeBucket {
        let bucket = AgeBucket::from_age(age);
        self.counts[bucket.index()] += 1;
        self.total += 1;
        bucket
    }

    pub fn count(&self, bucket: AgeBucket) -> usize {
        self.counts[bucket.index()]
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Share of `bucket` in hundredths of a percent, ties rounded up.
    /// An empty distribution yields 0.
    pub fn percentage_hundredths(&self, bucket: AgeBucket) -> u64 {
        if self.total == 0 {
            return 0;
        }
        let count = self.count(bucket) as u128;
        let total = self.total as u128;
        ((count * 20_000 + total) / (2 * total)) as u64
    }

    /// Percentage with two decimals, e.g. `3.13`.
    pub fn percentage_text(&self, bucket: AgeBucket) -> String {
        let h = self.percentage_hundredths(bucket);
        format!("{}.{:02}", h / 100, h % 100)
    }
}
