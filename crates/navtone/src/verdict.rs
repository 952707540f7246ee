//! Majority vote over the classifications of one evaluation pass.

/// Aggregate of one pass: how many checks resolved and how many were dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verdict {
    pub dark_count: usize,
    /// Checks that produced a classification (unresolved probes excluded).
    pub total: usize,
}

impl Verdict {
    /// Tallies classifications; `None` marks a probe that hit nothing and is
    /// left out of the denominator.
    pub fn tally<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = Option<bool>>,
    {
        samples
            .into_iter()
            .flatten()
            .fold(Verdict::default(), |mut verdict, dark| {
                verdict.total += 1;
                if dark {
                    verdict.dark_count += 1;
                }
                verdict
            })
    }

    /// Simple majority, rounding up: at least `ceil(total / 2)` dark checks.
    /// No resolved checks is never dark.
    pub fn is_dark(&self) -> bool {
        self.total > 0 && self.dark_count >= self.total.div_ceil(2)
    }

    /// Share of dark checks, `0.0` when nothing resolved.
    pub fn dark_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.dark_count as f64 / self.total as f64
        }
    }
}
