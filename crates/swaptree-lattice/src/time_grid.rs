//! Time grid shared by a lattice and every asset rolled back on it.

use crate::error::{LatticeError, LatticeResult};
use crate::math::close_enough;

/// Ordered lattice times starting at zero.
///
/// Every mandatory time passed to [`TimeGrid::with_mandatory_times`] is a
/// grid point, so cash flows and exercise dates land exactly on a slice.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
    dts: Vec<f64>,
    mandatory: Vec<f64>,
}

impl TimeGrid {
    /// Uniform grid from 0 to `end` with `steps` intervals.
    pub fn uniform(end: f64, steps: usize) -> LatticeResult<Self> {
        if steps == 0 || end <= 0.0 {
            return Err(LatticeError::invalid_grid(format!(
                "uniform grid needs end > 0 and steps > 0 (end {end}, steps {steps})"
            )));
        }
        let dt = end / steps as f64;
        let times: Vec<f64> = (0..=steps).map(|i| i as f64 * dt).collect();
        Ok(Self::from_sorted(times, vec![end]))
    }

    /// Grid containing 0, every mandatory time, and regular points in
    /// between so that the largest step is about `last / steps`.
    ///
    /// Mandatory times closer than the comparison tolerance are merged.
    ///
    /// # Errors
    ///
    /// Fails on an empty set of times, a negative or non-finite time, or a
    /// set whose largest time is zero.
    pub fn with_mandatory_times(times: &[f64], steps: usize) -> LatticeResult<Self> {
        if times.is_empty() {
            return Err(LatticeError::invalid_grid("no mandatory times given"));
        }
        if let Some(bad) = times.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(LatticeError::invalid_grid(format!(
                "mandatory time {bad} is negative or not finite"
            )));
        }

        let mut mandatory = times.to_vec();
        mandatory.sort_by(f64::total_cmp);
        mandatory.dedup_by(|a, b| close_enough(*a, *b));

        let last = mandatory[mandatory.len() - 1];
        if last <= 0.0 {
            return Err(LatticeError::invalid_grid("largest mandatory time must be positive"));
        }

        let dt_max = if steps == 0 {
            let mut min_dt = last;
            let mut previous = 0.0;
            for &t in &mandatory {
                if t - previous > 0.0 {
                    min_dt = min_dt.min(t - previous);
                }
                previous = t;
            }
            min_dt
        } else {
            last / steps as f64
        };

        let mut grid = vec![0.0];
        let mut begin = 0.0;
        for &end in &mandatory {
            if close_enough(end, begin) {
                continue;
            }
            let n_steps = (((end - begin) / dt_max).round() as usize).max(1);
            let dt = (end - begin) / n_steps as f64;
            for n in 1..n_steps {
                grid.push(begin + n as f64 * dt);
            }
            grid.push(end);
            begin = end;
        }

        Ok(Self::from_sorted(grid, mandatory))
    }

    /// Grid made of exactly the given times. The first must be 0 and the
    /// sequence strictly increasing.
    pub fn from_times(times: Vec<f64>) -> LatticeResult<Self> {
        if times.len() < 2 {
            return Err(LatticeError::invalid_grid("a grid needs at least two times"));
        }
        if times[0] != 0.0 {
            return Err(LatticeError::invalid_grid("grid must start at time 0"));
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(LatticeError::invalid_grid("grid times must be strictly increasing"));
        }
        let mandatory = times[1..].to_vec();
        Ok(Self::from_sorted(times, mandatory))
    }

    fn from_sorted(times: Vec<f64>, mandatory: Vec<f64>) -> Self {
        let dts = times.windows(2).map(|w| w[1] - w[0]).collect();
        Self {
            times,
            dts,
            mandatory,
        }
    }

    /// Number of grid points (steps + 1).
    #[must_use]
    pub fn size(&self) -> usize {
        self.times.len()
    }

    /// Time at index `i`.
    #[must_use]
    pub fn time(&self, i: usize) -> f64 {
        self.times[i]
    }

    /// Step length between index `i` and `i + 1`.
    #[must_use]
    pub fn dt(&self, i: usize) -> f64 {
        self.dts[i]
    }

    /// Last grid time.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// All grid times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// The mandatory times the grid was built from.
    #[must_use]
    pub fn mandatory_times(&self) -> &[f64] {
        &self.mandatory
    }

    /// Index of the grid point nearest to `t`.
    #[must_use]
    pub fn closest_index(&self, t: f64) -> usize {
        let upper = self.times.partition_point(|&x| x < t);
        if upper == 0 {
            0
        } else if upper == self.times.len() {
            self.times.len() - 1
        } else {
            let above = self.times[upper] - t;
            let below = t - self.times[upper - 1];
            if above < below {
                upper
            } else {
                upper - 1
            }
        }
    }

    /// Index of `t`, which must be a grid time.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError::TimeNotOnGrid` if `t` is not close to any grid point.
    pub fn index(&self, t: f64) -> LatticeResult<usize> {
        let i = self.closest_index(t);
        if close_enough(t, self.times[i]) {
            Ok(i)
        } else {
            Err(LatticeError::TimeNotOnGrid {
                time: t,
                closest: self.times[i],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_grid() {
        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        assert_eq!(grid.size(), 5);
        assert_relative_eq!(grid.dt(2), 0.25);
        assert_relative_eq!(grid.end(), 1.0);
    }

    #[test]
    fn test_mandatory_times_are_on_grid() {
        let mandatory = [0.3, 1.0, 1.7, 2.0];
        let grid = TimeGrid::with_mandatory_times(&mandatory, 20).unwrap();
        assert_eq!(grid.time(0), 0.0);
        for t in mandatory {
            let i = grid.index(t).unwrap();
            assert_eq!(grid.time(i), t);
        }
        assert_relative_eq!(grid.end(), 2.0);
        assert!(grid.times().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_duplicate_mandatory_times_merged() {
        let grid = TimeGrid::with_mandatory_times(&[1.0, 0.5, 1.0, 0.5 + 1e-17], 0).unwrap();
        assert_eq!(grid.mandatory_times(), &[0.5, 1.0]);
        assert_eq!(grid.times(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_index_off_grid_fails() {
        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        assert!(matches!(
            grid.index(0.3),
            Err(LatticeError::TimeNotOnGrid { closest, .. }) if closest == 0.25
        ));
        assert_eq!(grid.closest_index(-1.0), 0);
        assert_eq!(grid.closest_index(7.0), 4);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(TimeGrid::with_mandatory_times(&[], 10).is_err());
        assert!(TimeGrid::with_mandatory_times(&[-0.5, 1.0], 10).is_err());
        assert!(TimeGrid::with_mandatory_times(&[0.0], 10).is_err());
        assert!(TimeGrid::from_times(vec![0.1, 0.2]).is_err());
        assert!(TimeGrid::from_times(vec![0.0, 0.2, 0.2]).is_err());
        assert!(TimeGrid::uniform(1.0, 0).is_err());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_mandatory_time_is_indexable(
                mut times in proptest::collection::vec(0.01f64..30.0, 1..12),
                steps in 1usize..200,
            ) {
                times.sort_by(f64::total_cmp);
                let grid = TimeGrid::with_mandatory_times(&times, steps).unwrap();
                for t in &times {
                    let i = grid.index(*t).unwrap();
                    prop_assert!(close_enough(grid.time(i), *t));
                }
                prop_assert!(grid.times().windows(2).all(|w| w[1] > w[0]));
            }
        }
    }
}
