use std::fmt;
use std::str::FromStr;

use fragnet_core::{Error, Result};

/// Summary applied to the values of a patch's nearest neighbours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Statistic {
    #[default]
    Average,
    /// Population variance.
    Variance,
    #[cfg_attr(feature = "serde", serde(rename = "stddev"))]
    StdDev,
    /// The last value, i.e. that of the farthest selected neighbour.
    Value,
    Sum,
}

impl Statistic {
    pub const ALL: &[Statistic] = &[
        Self::Average,
        Self::Variance,
        Self::StdDev,
        Self::Value,
        Self::Sum,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Variance => "variance",
            Self::StdDev => "stddev",
            Self::Value => "value",
            Self::Sum => "sum",
        }
    }

    /// Apply the statistic to `vals`. `NaN` for an empty slice, except
    /// [`Sum`](Self::Sum) which gives 0.
    pub fn apply(self, vals: &[f64]) -> f64 {
        if vals.is_empty() {
            return if self == Self::Sum { 0.0 } else { f64::NAN };
        }
        let count = vals.len() as f64;
        let sum: f64 = vals.iter().sum();
        match self {
            Self::Sum => sum,
            Self::Average => sum / count,
            Self::Value => vals[vals.len() - 1],
            Self::Variance | Self::StdDev => {
                let mean = sum / count;
                let var = vals.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count;
                if self == Self::Variance { var } else { var.sqrt() }
            }
        }
    }
}

impl FromStr for Statistic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|st| st.name() == s)
            .ok_or_else(|| Error::UnknownStatistic(s.to_string()))
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_statistics() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(Statistic::Average.apply(&v), 5.0);
        assert_eq!(Statistic::Variance.apply(&v), 4.0);
        assert_eq!(Statistic::StdDev.apply(&v), 2.0);
        assert_eq!(Statistic::Value.apply(&v), 9.0);
        assert_eq!(Statistic::Sum.apply(&v), 40.0);
    }

    #[test]
    fn empty_input() {
        assert!(Statistic::Average.apply(&[]).is_nan());
        assert!(Statistic::Value.apply(&[]).is_nan());
        assert_eq!(Statistic::Sum.apply(&[]), 0.0);
    }

    #[test]
    fn parse_by_name() {
        for &st in Statistic::ALL {
            assert_eq!(st.to_string().parse::<Statistic>().unwrap(), st);
        }
        assert!(matches!("median".parse::<Statistic>(), Err(Error::UnknownStatistic(_))));
    }
}
