use chrono::{DateTime, FixedOffset};

/// Continuous linear scale with d3 semantics.
///
/// A zero-width domain maps every input to the middle of the range, and a
/// zero-width range inverts to the start of the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

fn normalize(x: f64, (a, b): (f64, f64)) -> f64 {
    let width = b - a;
    if width == 0.0 {
        0.5
    } else {
        (x - a) / width
    }
}

fn interpolate(t: f64, (a, b): (f64, f64)) -> f64 {
    a + t * (b - a)
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn map(&self, x: f64) -> f64 {
        interpolate(normalize(x, self.domain), self.range)
    }

    pub fn invert(&self, y: f64) -> f64 {
        if self.range.1 == self.range.0 {
            return self.domain.0;
        }
        interpolate(normalize(y, self.range), self.domain)
    }
}

/// Linear scale over instants, measured in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

pub fn epoch_millis(dt: &DateTime<FixedOffset>) -> f64 {
    dt.timestamp_millis() as f64
}

impl TimeScale {
    /// Build a scale whose domain is the extent of `instants`.
    /// Returns `None` when there are no instants.
    pub fn from_extent<'a>(
        instants: impl IntoIterator<Item = &'a DateTime<FixedOffset>>,
        range: (f64, f64),
    ) -> Option<Self> {
        let (min, max) = instants
            .into_iter()
            .map(epoch_millis)
            .fold(None, |acc: Option<(f64, f64)>, ms| match acc {
                None => Some((ms, ms)),
                Some((lo, hi)) => Some((lo.min(ms), hi.max(ms))),
            })?;
        Some(TimeScale {
            inner: LinearScale::new((min, max), range),
        })
    }

    pub fn map(&self, dt: &DateTime<FixedOffset>) -> f64 {
        self.inner.map(epoch_millis(dt))
    }

    /// Inverse mapping, in epoch milliseconds.
    pub fn invert_millis(&self, y: f64) -> f64 {
        self.inner.invert(y)
    }
}

/// Square-root scale, used for dot radii so area tracks the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    inner: LinearScale,
}

fn signed_sqrt(x: f64) -> f64 {
    x.abs().sqrt().copysign(x)
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        SqrtScale {
            inner: LinearScale::new((signed_sqrt(domain.0), signed_sqrt(domain.1)), range),
        }
    }

    pub fn map(&self, x: f64) -> f64 {
        self.inner.map(signed_sqrt(x))
    }
}
