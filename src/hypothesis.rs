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

use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two competing hypotheses (e.g. `A` = loaded coin, `B` = fair coin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hypothesis {
    /// First hypothesis
    A,
    /// Second hypothesis
    B,
}

impl Hypothesis {
    /// Both hypotheses, in index order.
    pub const ALL: [Hypothesis; 2] = [Hypothesis::A, Hypothesis::B];

    /// The complement - the only state the proposal can move to.
    pub fn other(self) -> Hypothesis {
        match self {
            Hypothesis::A => Hypothesis::B,
            Hypothesis::B => Hypothesis::A,
        }
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hypothesis::A => write!(f, "A"),
            Hypothesis::B => write!(f, "B"),
        }
    }
}

/// A value for each [`Hypothesis`] - priors, likelihoods, posteriors, counts...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair<T> {
    /// value for [`Hypothesis::A`]
    pub a: T,
    /// value for [`Hypothesis::B`]
    pub b: T,
}

impl<T> Pair<T> {
    /// Build a pair from the values for `A` and `B`.
    pub fn new(a: T, b: T) -> Self {
        Pair { a, b }
    }

    /// Apply `f` to both values.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Pair<U> {
        Pair {
            a: f(self.a),
            b: f(self.b),
        }
    }

    /// Iterate over `(hypothesis, value)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Hypothesis, &T)> {
        [(Hypothesis::A, &self.a), (Hypothesis::B, &self.b)].into_iter()
    }
}

impl<T> Index<Hypothesis> for Pair<T> {
    type Output = T;

    fn index(&self, h: Hypothesis) -> &T {
        match h {
            Hypothesis::A => &self.a,
            Hypothesis::B => &self.b,
        }
    }
}

impl<T> IndexMut<Hypothesis> for Pair<T> {
    fn index_mut(&mut self, h: Hypothesis) -> &mut T {
        match h {
            Hypothesis::A => &mut self.a,
            Hypothesis::B => &mut self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_is_an_involution() {
        for h in Hypothesis::ALL {
            assert_ne!(h.other(), h);
            assert_eq!(h.other().other(), h);
        }
    }

    #[test]
    fn test_pair_indexing() {
        let mut counts = Pair::new(0usize, 0usize);
        counts[Hypothesis::B] += 3;
        counts[Hypothesis::A] += 1;
        assert_eq!(counts, Pair::new(1, 3));
        assert_eq!(counts.map(|c| c * 2)[Hypothesis::B], 6);

        let labels = counts.iter().map(|(h, _)| h.to_string()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["A", "B"]);
    }
}
