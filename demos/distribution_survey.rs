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

//! Density, cdf, quantile and random variates of a few common distributions.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;
use two_state_mh::prelude::distributions::{ContinuousDistribution, DiscreteDistribution};

const SIZE: usize = 10_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let continuous = [
        (ContinuousDistribution::normal(0.0, 1.0)?, 1.0),
        (ContinuousDistribution::uniform(0.0, 10.0)?, 2.5),
        (ContinuousDistribution::exponential(0.5)?, 2.0),
        (ContinuousDistribution::beta(2.0, 5.0)?, 0.3),
    ];
    for (d, x) in &continuous {
        let q = d.cdf(*x);
        let xs = d.rvs(&mut rng, SIZE);
        let sample_mean = xs.iter().sum::<f64>() / SIZE as f64;
        println!("{d}");
        println!("    pdf({x}) = {:.5}", d.pdf(*x));
        println!("    cdf({x}) = {q:.5}");
        println!("    ppf({q:.5}) = {:.5}", d.ppf(q)?);
        println!("    ppf(0.95) = {:.5}", d.ppf(0.95)?);
        println!(
            "    mean = {:.5}, sample mean of {SIZE} draws = {sample_mean:.5}",
            d.mean().unwrap_or(f64::NAN)
        );
    }

    let discrete = [
        (DiscreteDistribution::binomial(5, 0.7)?, 2),
        (DiscreteDistribution::poisson(3.0)?, 4),
    ];
    for (d, k) in &discrete {
        let ks = d.rvs(&mut rng, SIZE);
        let sample_mean = ks.iter().sum::<u64>() as f64 / SIZE as f64;
        println!("{d}");
        println!("    pmf({k}) = {:.5}", d.pmf(*k));
        println!("    cdf({k}) = {:.5}", d.cdf(*k));
        println!("    ppf(0.5) = {}", d.ppf(0.5)?);
        println!(
            "    mean = {:.5}, sample mean of {SIZE} draws = {sample_mean:.5}",
            d.mean().unwrap_or(f64::NAN)
        );
    }

    Ok(())
}
