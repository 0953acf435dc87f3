// Copyright (c) 2022. Sebastien Soudan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http:www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Density, cumulative distribution, quantile and random variates of a few
//! common distributions.
//!
//! `pdf`/`pmf`, `cdf` and `ppf` (the quantile function, inverse of the cdf) are
//! computed with `statrs`, random variates are drawn with `rand_distr` from the
//! caller's random number generator.

use std::fmt;

use rand::distr::Uniform;
use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution as sd;
use statrs::distribution::{Continuous, ContinuousCDF, Discrete, DiscreteCDF};
use statrs::statistics::Distribution as Moments;
use tracing::trace;

use crate::Error;

fn invalid(err: impl fmt::Display) -> Error {
    Error::InvalidDistribution(err.to_string())
}

fn check_probability(q: f64) -> Result<f64, Error> {
    if q.is_finite() && (0.0..=1.0).contains(&q) {
        Ok(q)
    } else {
        Err(Error::InvalidProbability(q))
    }
}

fn draw<T, D: Distribution<T>, R: Rng + ?Sized>(d: &D, rng: &mut R, size: usize) -> Vec<T> {
    d.sample_iter(&mut *rng).take(size).collect()
}

#[derive(Debug, Clone)]
enum ContinuousLaw {
    Normal(sd::Normal, rand_distr::Normal<f64>),
    Uniform(sd::Uniform, Uniform<f64>),
    Exponential(sd::Exp, rand_distr::Exp<f64>),
    Beta(sd::Beta, rand_distr::Beta<f64>),
}

/// A continuous distribution.
///
/// # Example
///
/// ```rust
/// use two_state_mh::prelude::distributions::ContinuousDistribution;
///
/// let normal = ContinuousDistribution::normal(0.0, 1.0).unwrap();
/// assert!((normal.cdf(0.0) - 0.5).abs() < 1e-12);
/// assert!((normal.ppf(0.975).unwrap() - 1.959964).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct ContinuousDistribution {
    label: String,
    law: ContinuousLaw,
}

impl ContinuousDistribution {
    /// Normal distribution with mean `mean` and standard deviation `std_dev`.
    pub fn normal(mean: f64, std_dev: f64) -> Result<Self, Error> {
        let law = ContinuousLaw::Normal(
            sd::Normal::new(mean, std_dev).map_err(invalid)?,
            rand_distr::Normal::new(mean, std_dev).map_err(invalid)?,
        );
        Ok(ContinuousDistribution {
            label: format!("Normal(mean={mean}, std_dev={std_dev})"),
            law,
        })
    }

    /// Uniform distribution on `[low, high]`.
    pub fn uniform(low: f64, high: f64) -> Result<Self, Error> {
        let law = ContinuousLaw::Uniform(
            sd::Uniform::new(low, high).map_err(invalid)?,
            Uniform::new(low, high).map_err(invalid)?,
        );
        Ok(ContinuousDistribution {
            label: format!("Uniform(low={low}, high={high})"),
            law,
        })
    }

    /// Exponential distribution with rate `rate` (mean `1 / rate`).
    pub fn exponential(rate: f64) -> Result<Self, Error> {
        let law = ContinuousLaw::Exponential(
            sd::Exp::new(rate).map_err(invalid)?,
            rand_distr::Exp::new(rate).map_err(invalid)?,
        );
        Ok(ContinuousDistribution {
            label: format!("Exponential(rate={rate})"),
            law,
        })
    }

    /// Beta distribution with shape parameters `alpha` and `beta`.
    pub fn beta(alpha: f64, beta: f64) -> Result<Self, Error> {
        let law = ContinuousLaw::Beta(
            sd::Beta::new(alpha, beta).map_err(invalid)?,
            rand_distr::Beta::new(alpha, beta).map_err(invalid)?,
        );
        Ok(ContinuousDistribution {
            label: format!("Beta(alpha={alpha}, beta={beta})"),
            law,
        })
    }

    /// Probability density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        match &self.law {
            ContinuousLaw::Normal(d, _) => d.pdf(x),
            ContinuousLaw::Uniform(d, _) => d.pdf(x),
            ContinuousLaw::Exponential(d, _) => d.pdf(x),
            ContinuousLaw::Beta(d, _) => d.pdf(x),
        }
    }

    /// Pr(X <= x)
    pub fn cdf(&self, x: f64) -> f64 {
        match &self.law {
            ContinuousLaw::Normal(d, _) => d.cdf(x),
            ContinuousLaw::Uniform(d, _) => d.cdf(x),
            ContinuousLaw::Exponential(d, _) => d.cdf(x),
            ContinuousLaw::Beta(d, _) => d.cdf(x),
        }
    }

    /// Quantile function: the `x` such that `cdf(x) == q`.
    ///
    /// [`Error::InvalidProbability`] if `q` is not in [0, 1].
    pub fn ppf(&self, q: f64) -> Result<f64, Error> {
        let q = check_probability(q)?;
        Ok(match &self.law {
            ContinuousLaw::Normal(d, _) => d.inverse_cdf(q),
            ContinuousLaw::Uniform(d, _) => d.inverse_cdf(q),
            ContinuousLaw::Exponential(d, _) => d.inverse_cdf(q),
            ContinuousLaw::Beta(d, _) => d.inverse_cdf(q),
        })
    }

    /// `size` independent random variates.
    pub fn rvs<R: Rng + ?Sized>(&self, rng: &mut R, size: usize) -> Vec<f64> {
        trace!(size, distribution = %self, "drawing random variates");
        match &self.law {
            ContinuousLaw::Normal(_, s) => draw(s, rng, size),
            ContinuousLaw::Uniform(_, s) => draw(s, rng, size),
            ContinuousLaw::Exponential(_, s) => draw(s, rng, size),
            ContinuousLaw::Beta(_, s) => draw(s, rng, size),
        }
    }

    /// Mean of the distribution
    pub fn mean(&self) -> Option<f64> {
        match &self.law {
            ContinuousLaw::Normal(d, _) => d.mean(),
            ContinuousLaw::Uniform(d, _) => d.mean(),
            ContinuousLaw::Exponential(d, _) => d.mean(),
            ContinuousLaw::Beta(d, _) => d.mean(),
        }
    }

    /// Variance of the distribution
    pub fn variance(&self) -> Option<f64> {
        match &self.law {
            ContinuousLaw::Normal(d, _) => d.variance(),
            ContinuousLaw::Uniform(d, _) => d.variance(),
            ContinuousLaw::Exponential(d, _) => d.variance(),
            ContinuousLaw::Beta(d, _) => d.variance(),
        }
    }
}

impl fmt::Display for ContinuousDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone)]
enum DiscreteLaw {
    Binomial(sd::Binomial, rand_distr::Binomial),
    Poisson(sd::Poisson, rand_distr::Poisson<f64>),
}

/// A discrete distribution over the non-negative integers.
#[derive(Debug, Clone)]
pub struct DiscreteDistribution {
    label: String,
    law: DiscreteLaw,
}

impl DiscreteDistribution {
    /// Number of successes in `trials` independent trials with success probability `p`.
    pub fn binomial(trials: u64, p: f64) -> Result<Self, Error> {
        let law = DiscreteLaw::Binomial(
            sd::Binomial::new(p, trials).map_err(invalid)?,
            rand_distr::Binomial::new(trials, p).map_err(invalid)?,
        );
        Ok(DiscreteDistribution {
            label: format!("Binomial(trials={trials}, p={p})"),
            law,
        })
    }

    /// Poisson distribution with rate `lambda`.
    pub fn poisson(lambda: f64) -> Result<Self, Error> {
        let law = DiscreteLaw::Poisson(
            sd::Poisson::new(lambda).map_err(invalid)?,
            rand_distr::Poisson::new(lambda).map_err(invalid)?,
        );
        Ok(DiscreteDistribution {
            label: format!("Poisson(lambda={lambda})"),
            law,
        })
    }

    /// Pr(X = k)
    pub fn pmf(&self, k: u64) -> f64 {
        match &self.law {
            DiscreteLaw::Binomial(d, _) => d.pmf(k),
            DiscreteLaw::Poisson(d, _) => d.pmf(k),
        }
    }

    /// Pr(X <= k)
    pub fn cdf(&self, k: u64) -> f64 {
        match &self.law {
            DiscreteLaw::Binomial(d, _) => d.cdf(k),
            DiscreteLaw::Poisson(d, _) => d.cdf(k),
        }
    }

    /// Largest value of the support (`u64::MAX` when unbounded).
    pub fn max(&self) -> u64 {
        match &self.law {
            DiscreteLaw::Binomial(d, _) => d.n(),
            DiscreteLaw::Poisson(..) => u64::MAX,
        }
    }

    /// Quantile function: the smallest `k` such that `cdf(k) >= q`.
    ///
    /// The answer is bracketed by doubling `k`, then found by bisection, so this
    /// takes O(log k) evaluations of the cdf.
    ///
    /// [`Error::InvalidProbability`] if `q` is not in [0, 1].
    pub fn ppf(&self, q: f64) -> Result<u64, Error> {
        let q = check_probability(q)?;
        let max = self.max();
        if q >= 1.0 {
            return Ok(max);
        }
        if self.cdf(0) >= q {
            return Ok(0);
        }

        // invariant: cdf(lo) < q
        let mut lo = 0;
        let mut hi = 1u64.min(max);
        while hi < max && self.cdf(hi) < q {
            lo = hi;
            hi = hi.saturating_mul(2).min(max);
        }
        if self.cdf(hi) < q {
            return Ok(max);
        }

        // invariant: cdf(lo) < q <= cdf(hi)
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.cdf(mid) >= q {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        Ok(hi)
    }

    /// `size` independent random variates.
    pub fn rvs<R: Rng + ?Sized>(&self, rng: &mut R, size: usize) -> Vec<u64> {
        trace!(size, distribution = %self, "drawing random variates");
        match &self.law {
            DiscreteLaw::Binomial(_, s) => draw(s, rng, size),
            // rand_distr returns whole numbers as f64
            DiscreteLaw::Poisson(_, s) => draw(s, rng, size)
                .into_iter()
                .map(|k: f64| {
                    debug_assert!(k >= 0.0 && k.fract() == 0.0);
                    k as u64
                })
                .collect(),
        }
    }

    /// Mean of the distribution
    pub fn mean(&self) -> Option<f64> {
        match &self.law {
            DiscreteLaw::Binomial(d, _) => d.mean(),
            DiscreteLaw::Poisson(d, _) => d.mean(),
        }
    }

    /// Variance of the distribution
    pub fn variance(&self) -> Option<f64> {
        match &self.law {
            DiscreteLaw::Binomial(d, _) => d.variance(),
            DiscreteLaw::Poisson(d, _) => d.variance(),
        }
    }
}

impl fmt::Display for DiscreteDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Probability of `successes` successes in `trials` trials with success
/// probability `p` - the likelihood of a binomial observation.
///
/// ```rust
/// use two_state_mh::prelude::binomial_likelihood;
///
/// assert!((binomial_likelihood(2, 5, 0.5).unwrap() - 0.3125).abs() < 1e-12);
/// ```
pub fn binomial_likelihood(successes: u64, trials: u64, p: f64) -> Result<f64, Error> {
    Ok(DiscreteDistribution::binomial(trials, p)?.pmf(successes))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn survey() -> Vec<ContinuousDistribution> {
        vec![
            ContinuousDistribution::normal(1.0, 2.0).unwrap(),
            ContinuousDistribution::uniform(-2.0, 3.0).unwrap(),
            ContinuousDistribution::exponential(1.5).unwrap(),
            ContinuousDistribution::beta(2.0, 5.0).unwrap(),
        ]
    }

    #[test]
    fn test_binomial_likelihood() {
        assert_abs_diff_eq!(binomial_likelihood(2, 5, 0.7).unwrap(), 0.1323, epsilon = 1e-12);
        assert_abs_diff_eq!(binomial_likelihood(2, 5, 0.5).unwrap(), 0.3125, epsilon = 1e-12);
        assert_eq!(binomial_likelihood(6, 5, 0.5).unwrap(), 0.0);
        assert!(matches!(
            binomial_likelihood(2, 5, 1.5),
            Err(Error::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ContinuousDistribution::normal(0.0, -1.0).is_err());
        assert!(ContinuousDistribution::uniform(3.0, -2.0).is_err());
        assert!(ContinuousDistribution::exponential(-1.0).is_err());
        assert!(ContinuousDistribution::beta(0.0, 1.0).is_err());
        assert!(DiscreteDistribution::poisson(-3.0).is_err());
    }

    #[test]
    fn test_normal() {
        let d = ContinuousDistribution::normal(0.0, 1.0).unwrap();
        assert_abs_diff_eq!(d.pdf(0.0), 0.3989422804014327, epsilon = 1e-12);
        assert_abs_diff_eq!(d.cdf(1.959963984540054), 0.975, epsilon = 1e-9);
        assert_abs_diff_eq!(d.ppf(0.5).unwrap(), 0.0, epsilon = 1e-9);
        assert_eq!(d.mean(), Some(0.0));
        assert_eq!(d.variance(), Some(1.0));
    }

    #[test]
    fn test_exponential() {
        let d = ContinuousDistribution::exponential(2.0).unwrap();
        assert_abs_diff_eq!(d.cdf(1.0), 1.0 - (-2.0f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(d.ppf(0.5).unwrap(), 2.0f64.ln() / 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.mean().unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_ppf_rejects_invalid_probability() {
        for d in survey() {
            assert_eq!(d.ppf(1.5), Err(Error::InvalidProbability(1.5)));
            assert_eq!(d.ppf(-0.1), Err(Error::InvalidProbability(-0.1)));
            assert!(d.ppf(f64::NAN).is_err());
        }
        let d = DiscreteDistribution::binomial(10, 0.5).unwrap();
        assert_eq!(d.ppf(2.0), Err(Error::InvalidProbability(2.0)));
    }

    #[test]
    fn test_discrete() {
        let d = DiscreteDistribution::binomial(10, 0.5).unwrap();
        assert_abs_diff_eq!(d.pmf(5), 252.0 / 1024.0, epsilon = 1e-12);
        assert_abs_diff_eq!((0..=10).map(|k| d.pmf(k)).sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_eq!(d.ppf(0.0).unwrap(), 0);
        assert_eq!(d.ppf(0.5).unwrap(), 5);
        assert_eq!(d.ppf(1.0).unwrap(), 10);

        let d = DiscreteDistribution::poisson(3.0).unwrap();
        assert_abs_diff_eq!(d.pmf(0), (-3.0f64).exp(), epsilon = 1e-12);
        assert_eq!(d.ppf(0.5).unwrap(), 3);
        assert_eq!(d.ppf(1.0).unwrap(), u64::MAX);
    }

    #[test]
    fn test_discrete_ppf_is_smallest_k_reaching_q() {
        for d in [
            DiscreteDistribution::binomial(50, 0.3).unwrap(),
            DiscreteDistribution::binomial(1, 0.5).unwrap(),
            DiscreteDistribution::poisson(7.5).unwrap(),
        ] {
            for q in [1e-9, 0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99, 0.999999] {
                let expected = (0..1_000).find(|&k| d.cdf(k) >= q).unwrap();
                assert_eq!(d.ppf(q).unwrap(), expected, "{d} q={q}");
            }
        }
    }

    #[test]
    fn test_discrete_ppf_large_parameters() {
        let lambda = 1e9;
        let d = DiscreteDistribution::poisson(lambda).unwrap();
        let median = d.ppf(0.5).unwrap() as f64;
        assert_abs_diff_eq!(median, lambda, epsilon = 5.0 * lambda.sqrt());

        let (n, p) = (1_000_000_000_000u64, 0.3);
        let d = DiscreteDistribution::binomial(n, p).unwrap();
        let mean = n as f64 * p;
        let sd = (n as f64 * p * (1.0 - p)).sqrt();
        assert_abs_diff_eq!(d.ppf(0.5).unwrap() as f64, mean, epsilon = 5.0 * sd);
        let upper = d.ppf(0.975).unwrap() as f64;
        assert!(upper > mean && upper < mean + 5.0 * sd);
        assert_eq!(d.ppf(1.0).unwrap(), n);
    }

    #[test]
    fn test_rvs() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for d in survey() {
            let xs = d.rvs(&mut rng, 50_000);
            assert_eq!(xs.len(), 50_000);
            let mean = xs.iter().sum::<f64>() / xs.len() as f64;
            assert_abs_diff_eq!(mean, d.mean().unwrap(), epsilon = 0.05);
        }

        let d = DiscreteDistribution::binomial(5, 0.7).unwrap();
        let ks = d.rvs(&mut rng, 50_000);
        assert!(ks.iter().all(|&k| k <= 5));
        let mean = ks.iter().sum::<u64>() as f64 / ks.len() as f64;
        assert_abs_diff_eq!(mean, 3.5, epsilon = 0.05);

        let d = DiscreteDistribution::poisson(3.0).unwrap();
        let ks = d.rvs(&mut rng, 50_000);
        let mean = ks.iter().sum::<u64>() as f64 / ks.len() as f64;
        assert_abs_diff_eq!(mean, 3.0, epsilon = 0.05);

        assert!(d.rvs(&mut rng, 0).is_empty());
    }

    proptest! {
        #[test]
        fn check_normal_round_trip(x in -5.0f64..5.0) {
            let d = ContinuousDistribution::normal(0.0, 1.0).unwrap();
            prop_assert!((d.ppf(d.cdf(x)).unwrap() - x).abs() < 1e-6);
        }

        #[test]
        fn check_exponential_round_trip(x in 0.01f64..8.0) {
            let d = ContinuousDistribution::exponential(1.5).unwrap();
            prop_assert!((d.ppf(d.cdf(x)).unwrap() - x).abs() < 1e-6);
        }

        #[test]
        fn check_uniform_round_trip(x in -2.0f64..3.0) {
            let d = ContinuousDistribution::uniform(-2.0, 3.0).unwrap();
            prop_assert!((d.ppf(d.cdf(x)).unwrap() - x).abs() < 1e-9);
        }

        #[test]
        fn check_beta_round_trip(x in 0.01f64..0.99) {
            let d = ContinuousDistribution::beta(2.0, 5.0).unwrap();
            prop_assert!((d.ppf(d.cdf(x)).unwrap() - x).abs() < 1e-4);
        }

        #[test]
        fn check_cdf_non_decreasing(x in -10.0f64..10.0, dx in 0.0f64..5.0) {
            for d in survey() {
                prop_assert!(d.cdf(x) <= d.cdf(x + dx) + 1e-12);
            }
            let d = DiscreteDistribution::poisson(3.0).unwrap();
            let k = x.abs() as u64;
            prop_assert!(d.cdf(k) <= d.cdf(k + dx as u64) + 1e-12);
        }
    }
}
