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

use crate::hypothesis::{Hypothesis, Pair};
use crate::markov::TransitionMatrix;
use crate::Error;

/// How far the priors may drift from summing to 1.
pub const PRIOR_SUM_TOLERANCE: f64 = 1e-9;

/// A two-hypothesis Bayesian model: a prior and the likelihood of the observed
/// data under each hypothesis.
///
/// The posterior is proportional to `prior * likelihood` (the *weight* of a
/// hypothesis), so this is all the sampler needs.
///
/// Very small likelihoods are used as-is: when both weights underflow the
/// model is rejected as degenerate, and when they are merely tiny the
/// acceptance ratio loses precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoStateModel {
    prior: Pair<f64>,
    likelihood: Pair<f64>,
}

impl TwoStateModel {
    /// Validate and build a model.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPrior`] if a prior is not in [0, 1] or they do not sum to 1
    /// - [`Error::InvalidLikelihood`] if a likelihood is negative or not finite
    /// - [`Error::DegenerateLikelihood`] if both weights are zero
    pub fn new(prior: Pair<f64>, likelihood: Pair<f64>) -> Result<Self, Error> {
        let prior_ok = [prior.a, prior.b]
            .iter()
            .all(|p| p.is_finite() && (0.0..=1.0).contains(p));
        if !prior_ok || (prior.a + prior.b - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(Error::InvalidPrior(prior.a, prior.b));
        }

        let likelihood_ok = [likelihood.a, likelihood.b]
            .iter()
            .all(|l| l.is_finite() && *l >= 0.0);
        if !likelihood_ok {
            return Err(Error::InvalidLikelihood(likelihood.a, likelihood.b));
        }

        let model = TwoStateModel { prior, likelihood };
        if model.evidence() <= 0.0 {
            return Err(Error::DegenerateLikelihood);
        }

        Ok(model)
    }

    /// Same as [`TwoStateModel::new`] with `P(B) = 1 - P(A)`.
    pub fn from_prior_a(prior_a: f64, likelihood_a: f64, likelihood_b: f64) -> Result<Self, Error> {
        Self::new(
            Pair::new(prior_a, 1.0 - prior_a),
            Pair::new(likelihood_a, likelihood_b),
        )
    }

    /// The priors
    pub fn prior(&self) -> Pair<f64> {
        self.prior
    }

    /// The likelihoods
    pub fn likelihood(&self) -> Pair<f64> {
        self.likelihood
    }

    /// Unnormalized posterior: `prior(h) * likelihood(h)`
    pub fn weight(&self, h: Hypothesis) -> f64 {
        self.prior[h] * self.likelihood[h]
    }

    /// Marginal probability of the data.
    pub fn evidence(&self) -> f64 {
        self.weight(Hypothesis::A) + self.weight(Hypothesis::B)
    }

    /// Posterior computed with Bayes' rule.
    pub fn posterior(&self) -> Pair<f64> {
        let evidence = self.evidence();
        Pair::new(
            self.weight(Hypothesis::A) / evidence,
            self.weight(Hypothesis::B) / evidence,
        )
    }

    /// Metropolis-Hastings acceptance ratio for a move away from `from`.
    ///
    /// The proposal always picks the other state, so it is symmetric and does not
    /// appear in the ratio. Leaving a zero-weight state is always accepted
    /// (`f64::INFINITY`).
    pub fn acceptance_ratio(&self, from: Hypothesis) -> f64 {
        let current = self.weight(from);
        let proposed = self.weight(from.other());
        if current == 0.0 {
            f64::INFINITY
        } else {
            proposed / current
        }
    }

    /// The transition matrix of the chain built by the sampler.
    pub fn transition_matrix(&self) -> TransitionMatrix {
        TransitionMatrix::new(
            self.acceptance_ratio(Hypothesis::A).min(1.0),
            self.acceptance_ratio(Hypothesis::B).min(1.0),
        )
    }
}
