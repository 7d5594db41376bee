// src/constant_time/tester.rs
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::time::Instant;

/// Outcome of comparing two timing distributions
#[derive(Debug)]
pub struct TimingAnalysis {
    pub mean_a: f64,
    pub mean_b: f64,
    pub std_dev_a: f64,
    pub std_dev_b: f64,
    pub mean_ratio: f64,
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    pub cohens_d: f64,
    pub combined_score: f64,
    pub is_constant_time: bool,
}

impl TimingAnalysis {
    /// One-paragraph report for test output
    pub fn report(&self, name: &str) -> String {
        format!(
            "{name}: mean {:.0} ns vs {:.0} ns (ratio {:.3}), t={:.2}, df={:.1}, p={:.3}, d={:.2}, score={:.3}",
            self.mean_a,
            self.mean_b,
            self.mean_ratio,
            self.t_statistic,
            self.degrees_of_freedom,
            self.p_value,
            self.cohens_d,
            self.combined_score,
        )
    }
}

pub struct TimingTester {
    pub num_samples: usize,
    pub num_iterations: usize,
}

impl TimingTester {
    pub fn new(num_samples: usize, num_iterations: usize) -> Self {
        Self {
            num_samples,
            num_iterations,
        }
    }

    /// Average nanoseconds per call, one entry per sample
    pub fn measure<F>(&self, mut f: F) -> Vec<u128>
    where
        F: FnMut(),
    {
        let mut times = Vec::with_capacity(self.num_samples);
        for _ in 0..self.num_samples {
            let start = Instant::now();
            for _ in 0..self.num_iterations {
                f();
            }
            let elapsed = start.elapsed().as_nanos();
            times.push(elapsed / self.num_iterations as u128);
        }
        times
    }

    pub fn mean(times: &[u128]) -> f64 {
        let sum: u128 = times.iter().sum();
        sum as f64 / times.len() as f64
    }

    pub fn variance(times: &[u128], mean: f64) -> f64 {
        let ss: f64 = times
            .iter()
            .map(|&t| {
                let d = t as f64 - mean;
                d * d
            })
            .sum();
        ss / (times.len() as f64 - 1.0)
    }

    /// Drop samples outside 1.5 IQR of the quartiles
    pub fn remove_outliers(times: &[u128]) -> Vec<u128> {
        if times.len() < 4 {
            return times.to_vec();
        }

        let mut sorted = times.to_vec();
        sorted.sort_unstable();
        let q1 = sorted[sorted.len() / 4] as f64;
        let q3 = sorted[sorted.len() * 3 / 4] as f64;
        let iqr = q3 - q1;
        let (lo, hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        times
            .iter()
            .copied()
            .filter(|&t| (t as f64) >= lo && (t as f64) <= hi)
            .collect()
    }

    /// Welch's t-statistic
    pub fn t_statistic(times_a: &[u128], times_b: &[u128]) -> f64 {
        let (mean_a, mean_b) = (Self::mean(times_a), Self::mean(times_b));
        let var_a = Self::variance(times_a, mean_a);
        let var_b = Self::variance(times_b, mean_b);
        let (n_a, n_b) = (times_a.len() as f64, times_b.len() as f64);

        (mean_a - mean_b).abs() / (var_a / n_a + var_b / n_b).sqrt()
    }

    /// Welch-Satterthwaite degrees of freedom
    pub fn degrees_of_freedom(times_a: &[u128], times_b: &[u128]) -> f64 {
        let (mean_a, mean_b) = (Self::mean(times_a), Self::mean(times_b));
        let (n_a, n_b) = (times_a.len() as f64, times_b.len() as f64);
        let term_a = Self::variance(times_a, mean_a) / n_a;
        let term_b = Self::variance(times_b, mean_b) / n_b;

        (term_a + term_b).powi(2) / (term_a.powi(2) / (n_a - 1.0) + term_b.powi(2) / (n_b - 1.0))
    }

    /// Two-tailed p-value from Student's t distribution
    pub fn p_value(t_stat: f64, df: f64) -> f64 {
        if !(df >= 1.0 && df.is_finite()) {
            return if t_stat.abs() < 2.0 { 0.1 } else { 0.01 };
        }
        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => (2.0 * (1.0 - dist.cdf(t_stat.abs()))).clamp(0.0, 1.0),
            Err(_) => 0.0,
        }
    }

    pub fn cohens_d(times_a: &[u128], times_b: &[u128]) -> f64 {
        let (mean_a, mean_b) = (Self::mean(times_a), Self::mean(times_b));
        let var_a = Self::variance(times_a, mean_a);
        let var_b = Self::variance(times_b, mean_b);
        let (n_a, n_b) = (times_a.len() as f64, times_b.len() as f64);
        let pooled = ((var_a * (n_a - 1.0) + var_b * (n_b - 1.0)) / (n_a + n_b - 2.0)).sqrt();

        (mean_a - mean_b).abs() / pooled
    }

    /// Weighted blend of mean ratio, t-statistic and relative spread
    pub fn combined_score(mean_ratio: f64, t_stat: f64, rel_std_dev: f64) -> f64 {
        let score = 1.0 + 0.5 * (mean_ratio - 1.0) + 0.2 * (t_stat / 10.0) + 0.3 * rel_std_dev;
        if score.is_finite() && score >= 1.0 {
            score
        } else {
            mean_ratio
        }
    }

    pub fn analyze_constant_time(
        &self,
        times_a: &[u128],
        times_b: &[u128],
        mean_ratio_max: f64,
        combined_score_threshold: f64,
    ) -> Result<TimingAnalysis, String> {
        let clean_a = Self::remove_outliers(times_a);
        let clean_b = Self::remove_outliers(times_b);
        if clean_a.len() < 2 || clean_b.len() < 2 {
            return Err("not enough samples left after outlier removal".to_string());
        }

        let mean_a = Self::mean(&clean_a);
        let mean_b = Self::mean(&clean_b);
        let std_dev_a = Self::variance(&clean_a, mean_a).sqrt();
        let std_dev_b = Self::variance(&clean_b, mean_b).sqrt();
        let mean_ratio = mean_a.max(mean_b) / mean_a.min(mean_b);

        let t_statistic = Self::t_statistic(&clean_a, &clean_b);
        let degrees_of_freedom = Self::degrees_of_freedom(&clean_a, &clean_b);
        let p_value = Self::p_value(t_statistic, degrees_of_freedom);
        let cohens_d = Self::cohens_d(&clean_a, &clean_b);

        let rel_std_dev = (std_dev_a / mean_a).max(std_dev_b / mean_b);
        let combined_score = Self::combined_score(mean_ratio, t_statistic, rel_std_dev);

        Ok(TimingAnalysis {
            mean_a,
            mean_b,
            std_dev_a,
            std_dev_b,
            mean_ratio,
            t_statistic,
            degrees_of_freedom,
            p_value,
            cohens_d,
            combined_score,
            is_constant_time: mean_ratio <= mean_ratio_max
                && combined_score <= combined_score_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outliers_are_dropped() {
        let times = [100, 101, 99, 100, 102, 98, 100, 5000];
        let clean = TimingTester::remove_outliers(&times);
        assert_eq!(clean.len(), 7);
        assert!(!clean.contains(&5000));
    }

    #[test]
    fn identical_distributions_pass() {
        let a = [100, 102, 98, 101, 99, 100, 103, 97];
        let tester = TimingTester::new(a.len(), 1);
        let analysis = tester.analyze_constant_time(&a, &a, 1.25, 1.8).unwrap();
        assert!(analysis.t_statistic.abs() < 1e-9);
        assert!(analysis.is_constant_time);
    }

    #[test]
    fn separated_distributions_fail() {
        let a = [100, 102, 98, 101, 99, 100, 103, 97];
        let b = [200, 204, 196, 202, 198, 200, 206, 194];
        let tester = TimingTester::new(a.len(), 1);
        let analysis = tester.analyze_constant_time(&a, &b, 1.25, 1.8).unwrap();
        assert!(analysis.mean_ratio > 1.9);
        assert!(analysis.p_value < 0.01);
        assert!(!analysis.is_constant_time);
    }
}
