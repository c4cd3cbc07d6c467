use std::{iter::Sum, ops::Add, str::FromStr};

/// a count of clock ticks, as reported by the kernel.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct UserHz(u64);

// === impl UserHz ===

impl UserHz {
    /// returns the signed number of ticks elapsed between `earlier` and `self`.
    ///
    /// counters are expected to be monotonic, but a reset on the kernel side will yield a
    /// negative value here rather than wrapping around.
    pub fn since(self, earlier: Self) -> f64 {
        let (Self(now), Self(then)) = (self, earlier);
        now as f64 - then as f64
    }
}

impl From<u64> for UserHz {
    fn from(ticks: u64) -> Self {
        Self(ticks)
    }
}

impl FromStr for UserHz {
    type Err = <u64 as FromStr>::Err;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Add for UserHz {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        let (Self(lhs), Self(rhs)) = (self, rhs);
        Self(lhs.saturating_add(rhs))
    }
}

impl Sum for UserHz {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
