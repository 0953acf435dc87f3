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
//! Check the [`prelude`] module for the public API.
use thiserror::Error;

/// The prelude module re-exports the most commonly used types and traits.
/// This is the public API. Enjoy!
pub mod prelude;

#[cfg(any(feature = "unstable", test))]
/// unstable hypothesis API
pub mod hypothesis;

#[cfg(not(any(feature = "unstable", test)))]
pub(crate) mod hypothesis;

#[cfg(any(feature = "unstable", test))]
/// unstable model API
pub mod model;

#[cfg(not(any(feature = "unstable", test)))]
pub(crate) mod model;

#[cfg(any(feature = "unstable", test))]
/// unstable sampler API
pub mod chain;

#[cfg(not(any(feature = "unstable", test)))]
pub(crate) mod chain;

#[cfg(any(feature = "unstable", test))]
/// unstable markov chain analysis API
pub mod markov;

#[cfg(not(any(feature = "unstable", test)))]
pub(crate) mod markov;

#[cfg(any(feature = "unstable", test))]
/// unstable distributions API
pub mod distributions;

#[cfg(not(any(feature = "unstable", test)))]
pub(crate) mod distributions;

#[cfg(any(feature = "unstable", test))]
/// unstable utils API
pub mod utils;

#[cfg(not(any(feature = "unstable", test)))]
pub(crate) mod utils;

/// The error type for this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Priors must be finite, in [0, 1] and sum to 1
    #[error("Invalid prior: ({0}, {1})")]
    InvalidPrior(f64, f64),
    /// Likelihoods must be finite and non-negative
    #[error("Invalid likelihood: ({0}, {1})")]
    InvalidLikelihood(f64, f64),
    /// prior x likelihood is zero for both hypotheses
    #[error("Degenerate likelihood: the posterior is undefined")]
    DegenerateLikelihood,
    /// NotEnoughIterations
    #[error("Not enough iterations")]
    NotEnoughIterations,
    /// NotEnoughSamples
    #[error("Not enough samples")]
    NotEnoughSamples,
    /// A quantile was requested outside of [0, 1]
    #[error("Invalid probability: {0}")]
    InvalidProbability(f64),
    /// The distribution parameters were rejected
    #[error("Invalid distribution parameters: {0}")]
    InvalidDistribution(String),
}
