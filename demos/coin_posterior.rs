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

//! Posterior of "the coin is loaded" after 2 heads in 5 tosses: Bayes' rule
//! computed by hand, then Metropolis-Hastings.
//!
//! `RUST_LOG=debug cargo run --example coin_posterior` shows the chain's logs.

use tracing_subscriber::EnvFilter;
use two_state_mh::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (heads, tosses) = (2, 5);
    let prior_loaded = 0.6;

    let loaded = binomial_likelihood(heads, tosses, 0.7)?;
    let fair = binomial_likelihood(heads, tosses, 0.5)?;
    println!("P(data | loaded) = {loaded:.5}");
    println!("P(data | fair)   = {fair:.5}");

    let model = TwoStateModel::from_prior_a(prior_loaded, loaded, fair)?;
    let exact = model.posterior();
    println!("Bayes' rule:         P(loaded | data) = {:.5}", exact.a);

    for iterations in [100, 1_000, 10_000, 100_000] {
        let settings = MhSettings {
            iterations,
            seed: 42,
            ..MhSettings::default()
        };
        let trace = sample_posterior(&model, &settings)?;
        let p_loaded: f64 = trace.frequency(Hypothesis::A);
        println!(
            "Metropolis-Hastings: P(loaded | data) = {p_loaded:.5} ({iterations} iterations, error {:.5})",
            (p_loaded - exact.a).abs()
        );
    }

    Ok(())
}
