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

use itertools::Itertools;
use num_traits::Float;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::hypothesis::{Hypothesis, Pair};
use crate::model::TwoStateModel;
use crate::utils::fraction;
use crate::Error;

/// A Metropolis-Hastings chain over the two hypotheses of a [`TwoStateModel`].
///
/// This is an infinite iterator: each call to `next` performs one
/// propose/accept-reject step and yields the resulting state. Use
/// `chain.take(n)` for a finite (lazy) sequence.
pub struct Chain<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    model: TwoStateModel,
    state: Hypothesis,
    moves: usize,
}

impl<'r, R: Rng + ?Sized> Chain<'r, R> {
    /// Start a chain at `initial`, or at a uniformly chosen hypothesis if `None`.
    pub fn new(rng: &'r mut R, model: TwoStateModel, initial: Option<Hypothesis>) -> Self {
        let state = initial.unwrap_or_else(|| {
            if rng.random_bool(0.5) {
                Hypothesis::A
            } else {
                Hypothesis::B
            }
        });

        Chain {
            rng,
            model,
            state,
            moves: 0,
        }
    }

    /// The currently occupied hypothesis.
    pub fn state(&self) -> Hypothesis {
        self.state
    }

    /// Number of accepted proposals so far.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// One propose/accept-reject step.
    ///
    /// The proposal is the other hypothesis. It is accepted without a random
    /// draw when the acceptance ratio is at least 1, otherwise with probability
    /// equal to the ratio. A zero-weight hypothesis is never entered.
    pub fn step(&mut self) -> Hypothesis {
        let alpha = self.model.acceptance_ratio(self.state);

        let accept = alpha >= 1.0 || (alpha > 0.0 && self.rng.random::<f64>() <= alpha);
        if accept {
            self.state = self.state.other();
            self.moves += 1;
        }

        self.state
    }
}

impl<R: Rng + ?Sized> Iterator for Chain<'_, R> {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Hypothesis> {
        Some(self.step())
    }
}

/// The states visited by a chain, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trace {
    samples: Vec<Hypothesis>,
}

impl Trace {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` if the trace holds no sample
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples, in time order
    pub fn samples(&self) -> &[Hypothesis] {
        &self.samples
    }

    /// Number of samples for each hypothesis.
    pub fn counts(&self) -> Pair<usize> {
        let mut counts = Pair::default();
        for &h in &self.samples {
            counts[h] += 1;
        }
        counts
    }

    /// Fraction of the samples equal to `h` - NaN for an empty trace.
    pub fn frequency<F: Float>(&self, h: Hypothesis) -> F {
        fraction(self.counts()[h], self.len())
    }

    /// The empirical posterior: frequency of each hypothesis.
    pub fn empirical_posterior(&self) -> Pair<f64> {
        let counts = self.counts();
        counts.map(|c| fraction(c, self.len()))
    }

    /// Observed transition counts between consecutive samples:
    /// `transitions()[from][to]`.
    pub fn transitions(&self) -> Pair<Pair<usize>> {
        let mut counts = Pair::<Pair<usize>>::default();
        for (&from, &to) in self.samples.iter().tuple_windows() {
            counts[from][to] += 1;
        }
        counts
    }
}

impl FromIterator<Hypothesis> for Trace {
    fn from_iter<I: IntoIterator<Item = Hypothesis>>(iter: I) -> Self {
        Trace {
            samples: iter.into_iter().collect(),
        }
    }
}

impl From<Trace> for Vec<Hypothesis> {
    fn from(trace: Trace) -> Self {
        trace.samples
    }
}

/// Run a two-state Metropolis-Hastings chain for `iterations` steps.
///
/// # Description
///
/// Starting from `initial` (or a uniformly random hypothesis), each step proposes
/// the other hypothesis and accepts it with probability
/// `min(1, weight(proposed) / weight(current))` where `weight = prior * likelihood`.
/// The state after each step is recorded, so the trace has exactly `iterations`
/// samples and the frequency of each hypothesis converges to its posterior
/// probability.
///
/// Fails with [`Error::NotEnoughIterations`] if `iterations` is 0.
///
/// # Example
///
/// ```rust
/// use two_state_mh::prelude::*;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
///
/// // 2 heads in 5 tosses: p = 0.7 if loaded (A), p = 0.5 if fair (B)
/// let likelihood_loaded = binomial_likelihood(2, 5, 0.7).unwrap();
/// let likelihood_fair = binomial_likelihood(2, 5, 0.5).unwrap();
/// let model = TwoStateModel::from_prior_a(0.6, likelihood_loaded, likelihood_fair).unwrap();
///
/// let trace = metropolis_hastings(&mut rng, &model, 10_000, None).unwrap();
/// assert_eq!(trace.len(), 10_000);
///
/// let p_loaded: f64 = trace.frequency(Hypothesis::A);
/// assert!((p_loaded - model.posterior().a).abs() < 0.02);
/// ```
pub fn metropolis_hastings<R: Rng + ?Sized>(
    rng: &mut R,
    model: &TwoStateModel,
    iterations: usize,
    initial: Option<Hypothesis>,
) -> Result<Trace, Error> {
    if iterations == 0 {
        return Err(Error::NotEnoughIterations);
    }

    let mut chain = Chain::new(rng, *model, initial);
    debug!(
        iterations,
        initial = %chain.state(),
        "starting two-state Metropolis-Hastings chain"
    );

    let trace = chain.by_ref().take(iterations).collect::<Trace>();

    debug!(
        iterations,
        moves = chain.moves(),
        final_state = %chain.state(),
        "chain done"
    );

    Ok(trace)
}

/// Settings for [`sample_posterior`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MhSettings {
    /// Number of steps (and samples)
    pub iterations: usize,
    /// Starting hypothesis - drawn uniformly if `None`
    pub initial: Option<Hypothesis>,
    /// Seed of the chain's random number generator
    pub seed: u64,
}

impl Default for MhSettings {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            initial: None,
            seed: 0,
        }
    }
}

/// Reproducible [`metropolis_hastings`] run: the chain is driven by a
/// [`ChaCha8Rng`] seeded with `settings.seed`.
pub fn sample_posterior(model: &TwoStateModel, settings: &MhSettings) -> Result<Trace, Error> {
    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
    metropolis_hastings(&mut rng, model, settings.iterations, settings.initial)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::RngCore;

    use super::*;
    use crate::distributions::binomial_likelihood;

    /// Fails the test if the chain consumes any randomness.
    struct NoDraws;

    impl RngCore for NoDraws {
        fn next_u32(&mut self) -> u32 {
            panic!("unexpected random draw")
        }

        fn next_u64(&mut self) -> u64 {
            panic!("unexpected random draw")
        }

        fn fill_bytes(&mut self, _dst: &mut [u8]) {
            panic!("unexpected random draw")
        }
    }

    fn loaded_coin() -> TwoStateModel {
        let loaded = binomial_likelihood(2, 5, 0.7).unwrap();
        let fair = binomial_likelihood(2, 5, 0.5).unwrap();
        TwoStateModel::from_prior_a(0.6, loaded, fair).unwrap()
    }

    #[test]
    fn test_convergence() {
        let model = loaded_coin();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let trace = metropolis_hastings(&mut rng, &model, 10_000, None).unwrap();
        assert_eq!(trace.len(), 10_000);

        let p_loaded: f64 = trace.frequency(Hypothesis::A);
        assert_abs_diff_eq!(p_loaded, 0.38839, epsilon = 0.02);

        let empirical = trace.empirical_posterior();
        assert_abs_diff_eq!(empirical.a + empirical.b, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_convergence_with_settings() {
        let model = loaded_coin();
        for seed in 0..5 {
            let settings = MhSettings {
                seed,
                ..MhSettings::default()
            };
            let trace = sample_posterior(&model, &settings).unwrap();
            assert_abs_diff_eq!(
                trace.empirical_posterior().a,
                model.posterior().a,
                epsilon = 0.02
            );
        }
    }

    #[test]
    fn test_same_seed_same_trace() {
        let model = loaded_coin();
        let settings = MhSettings {
            iterations: 500,
            ..MhSettings::default()
        };
        assert_eq!(
            sample_posterior(&model, &settings).unwrap(),
            sample_posterior(&model, &settings).unwrap()
        );
    }

    #[test]
    fn test_unconditional_acceptance() {
        // weight(B) > weight(A): leaving A is always accepted, no draw needed
        let model = loaded_coin();
        let mut no_draws = NoDraws;
        let mut chain = Chain::new(&mut no_draws, model, Some(Hypothesis::A));
        assert_eq!(chain.step(), Hypothesis::B);
        assert_eq!(chain.moves(), 1);

        // and over a long run, A is never followed by A
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let trace = metropolis_hastings(&mut rng, &model, 5_000, Some(Hypothesis::A)).unwrap();
        let transitions = trace.transitions();
        assert_eq!(transitions[Hypothesis::A][Hypothesis::A], 0);
        assert!(transitions[Hypothesis::A][Hypothesis::B] > 0);
        assert!(transitions[Hypothesis::B][Hypothesis::B] > 0);
    }

    #[test]
    fn test_equal_weights_alternate() {
        let model = TwoStateModel::from_prior_a(0.5, 0.3, 0.3).unwrap();
        let samples: Vec<Hypothesis> =
            metropolis_hastings(&mut NoDraws, &model, 4, Some(Hypothesis::B))
                .unwrap()
                .into();
        assert_eq!(
            samples,
            vec![Hypothesis::A, Hypothesis::B, Hypothesis::A, Hypothesis::B]
        );
    }

    #[test]
    fn test_zero_weight_state_is_never_entered() {
        let model = TwoStateModel::from_prior_a(0.0, 0.5, 0.5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let trace = metropolis_hastings(&mut rng, &model, 100, Some(Hypothesis::A)).unwrap();
        assert_eq!(trace.counts(), Pair::new(0, 100));
    }

    #[test]
    fn test_random_initial_state() {
        let model = loaded_coin();
        let initial_states = (0..32)
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                Chain::new(&mut rng, model, None).state()
            })
            .collect::<Vec<_>>();
        assert!(initial_states.contains(&Hypothesis::A));
        assert!(initial_states.contains(&Hypothesis::B));
    }

    #[test]
    fn test_lazy_chain() {
        let model = loaded_coin();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let chain = Chain::new(&mut rng, model, None);
        assert_eq!(chain.take(0).count(), 0);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let lazy = Chain::new(&mut rng, model, None).take(100).collect::<Trace>();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let eager = metropolis_hastings(&mut rng, &model, 100, None).unwrap();
        assert_eq!(lazy, eager);
    }

    #[test]
    fn test_no_iterations() {
        let model = loaded_coin();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(
            metropolis_hastings(&mut rng, &model, 0, None),
            Err(Error::NotEnoughIterations)
        );
    }

    #[test]
    fn test_trace_statistics() {
        use Hypothesis::*;
        let trace = [A, B, B, A, B].into_iter().collect::<Trace>();
        assert_eq!(trace.counts(), Pair::new(2, 3));
        assert_eq!(trace.frequency::<f64>(B), 0.6);
        assert_eq!(trace.empirical_posterior(), Pair::new(0.4, 0.6));

        let transitions = trace.transitions();
        assert_eq!(transitions[A], Pair::new(0, 2));
        assert_eq!(transitions[B], Pair::new(1, 1));

        assert!(Trace::default().is_empty());
        assert!(Trace::default().frequency::<f64>(A).is_nan());
    }
}
