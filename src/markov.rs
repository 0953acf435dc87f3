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

use crate::chain::Trace;
use crate::hypothesis::{Hypothesis, Pair};
use crate::utils::{fraction, max_abs_diff};
use crate::Error;

/// Transition matrix of a two-state Markov chain.
///
/// ```text
///        A            B
/// A  1 - a_to_b    a_to_b
/// B  b_to_a        1 - b_to_a
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionMatrix {
    /// Pr(next = B | current = A)
    pub a_to_b: f64,
    /// Pr(next = A | current = B)
    pub b_to_a: f64,
}

impl TransitionMatrix {
    /// Build the matrix from its two off-diagonal entries.
    pub fn new(a_to_b: f64, b_to_a: f64) -> Self {
        TransitionMatrix { a_to_b, b_to_a }
    }

    /// Estimate the matrix from the transitions observed in a trace.
    ///
    /// Each row needs at least one observed transition out of its state,
    /// [`Error::NotEnoughSamples`] otherwise.
    pub fn estimate(trace: &Trace) -> Result<Self, Error> {
        let counts = trace.transitions();
        let row = |from: Hypothesis| {
            let out = counts[from];
            let total = out.a + out.b;
            if total == 0 {
                Err(Error::NotEnoughSamples)
            } else {
                Ok(fraction::<f64>(out[from.other()], total))
            }
        };

        Ok(TransitionMatrix::new(
            row(Hypothesis::A)?,
            row(Hypothesis::B)?,
        ))
    }

    /// Probability of leaving `from`.
    pub fn leave(&self, from: Hypothesis) -> f64 {
        match from {
            Hypothesis::A => self.a_to_b,
            Hypothesis::B => self.b_to_a,
        }
    }

    /// Probability of staying in `from`.
    pub fn stay(&self, from: Hypothesis) -> f64 {
        1.0 - self.leave(from)
    }

    /// One step of the chain applied to a distribution over the states: `pi * T`.
    pub fn apply(&self, pi: &Pair<f64>) -> Pair<f64> {
        Pair::new(
            pi.a * self.stay(Hypothesis::A) + pi.b * self.b_to_a,
            pi.a * self.a_to_b + pi.b * self.stay(Hypothesis::B),
        )
    }

    /// Net probability flow between the states under `pi`:
    /// `|pi(A) T(A -> B) - pi(B) T(B -> A)|`. Zero under detailed balance.
    pub fn detailed_balance_gap(&self, pi: &Pair<f64>) -> f64 {
        (pi.a * self.a_to_b - pi.b * self.b_to_a).abs()
    }

    /// Whether `pi * T == pi` within `tolerance`.
    pub fn is_stationary(&self, pi: &Pair<f64>, tolerance: f64) -> bool {
        max_abs_diff(&self.apply(pi), pi) <= tolerance
    }

    /// The stationary distribution, `None` if the chain never moves (every
    /// distribution is then stationary).
    pub fn stationary(&self) -> Option<Pair<f64>> {
        let flow = self.a_to_b + self.b_to_a;
        if flow <= 0.0 {
            return None;
        }
        Some(Pair::new(self.b_to_a / flow, self.a_to_b / flow))
    }
}
