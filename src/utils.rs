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

use num_traits::Float;

use crate::hypothesis::Pair;

/// `count / total` as a float - NaN when `total` is 0.
pub fn fraction<F: Float>(count: usize, total: usize) -> F {
    let count = F::from(count).unwrap_or_else(F::nan);
    let total = F::from(total).unwrap_or_else(F::nan);
    count / total
}

/// Largest absolute component-wise difference between two pairs.
pub fn max_abs_diff<F: Float>(x: &Pair<F>, y: &Pair<F>) -> F {
    (x.a - y.a).abs().max((x.b - y.b).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        assert_eq!(fraction::<f64>(1, 4), 0.25);
        assert_eq!(fraction::<f32>(3, 4), 0.75);
        assert!(fraction::<f64>(0, 0).is_nan());
    }

    #[test]
    fn test_max_abs_diff() {
        let x = Pair::new(0.25, 0.75);
        let y = Pair::new(0.5, 0.625);
        assert_eq!(max_abs_diff(&x, &y), 0.25);
        assert_eq!(max_abs_diff(&x, &x), 0.0);
    }
}
