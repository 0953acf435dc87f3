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

//! Two-State Metropolis-Hastings
//!
//! We have two competing hypotheses `A` and `B` (say, a coin is loaded or it is
//! fair), a prior belief about each of them and some observed data. Bayes' rule
//! gives the posterior directly:
//!
//! P(A | data) = P(data | A) P(A) / (P(data | A) P(A) + P(data | B) P(B))
//!
//! Metropolis-Hastings gets the same answer by simulation: a Markov chain hops
//! between the two hypotheses, accepting a move with probability
//! `min(1, P(data | new) P(new) / (P(data | current) P(current)))`. The posterior
//! is the unique stationary distribution of that chain (detailed balance holds by
//! construction), so the fraction of time the chain spends in each hypothesis
//! converges to its posterior probability.
//!
//! Only the ratio of the unnormalized posteriors is needed - the evidence (the
//! denominator of Bayes' rule) is never computed by the sampler.
//!
//! # References
//! - [Metropolis-Hastings algorithm](https://en.wikipedia.org/wiki/Metropolis%E2%80%93Hastings_algorithm)
//! - [Detailed balance](https://en.wikipedia.org/wiki/Detailed_balance)
//! - [Stationary distribution](https://en.wikipedia.org/wiki/Markov_chain#Stationary_distributions)
//!
//! # Example
//!
//! ```rust
//! use two_state_mh::prelude::*;
//!
//! // Prior: P(loaded) = 0.6. A loaded coin lands heads with probability 0.7, a
//! // fair one with probability 0.5. We saw 2 heads in 5 tosses.
//! let loaded = binomial_likelihood(2, 5, 0.7).unwrap();
//! let fair = binomial_likelihood(2, 5, 0.5).unwrap();
//! let model = TwoStateModel::from_prior_a(0.6, loaded, fair).unwrap();
//!
//! let trace = sample_posterior(&model, &MhSettings::default()).unwrap();
//!
//! let exact = model.posterior();
//! let simulated = trace.empirical_posterior();
//! assert!((exact.a - 0.38839).abs() < 1e-5);
//! assert!((simulated.a - exact.a).abs() < 0.02);
//!
//! // the posterior is stationary for the chain
//! let t = model.transition_matrix();
//! assert!(t.is_stationary(&exact, 1e-3));
//! ```

pub use crate::chain::{metropolis_hastings, sample_posterior, Chain, MhSettings, Trace};
pub use crate::distributions::binomial_likelihood;
pub use crate::hypothesis::{Hypothesis, Pair};
pub use crate::markov::TransitionMatrix;
pub use crate::model::TwoStateModel;
pub use crate::Error;

/// density, cdf, quantile and random variates of common distributions
pub mod distributions {
    pub use crate::distributions::{
        binomial_likelihood, ContinuousDistribution, DiscreteDistribution,
    };
}
