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

//! The posterior is the stationary distribution of the Metropolis-Hastings
//! chain: check it on the analytic transition matrix, then on the matrix and
//! the posterior estimated from a simulated trace.

use tracing_subscriber::EnvFilter;
use two_state_mh::prelude::*;

fn print_matrix(name: &str, t: &TransitionMatrix) {
    println!("{name}:");
    println!("    A -> A {:.4}    A -> B {:.4}", t.stay(Hypothesis::A), t.a_to_b);
    println!("    B -> A {:.4}    B -> B {:.4}", t.b_to_a, t.stay(Hypothesis::B));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let loaded = binomial_likelihood(2, 5, 0.7)?;
    let fair = binomial_likelihood(2, 5, 0.5)?;
    let model = TwoStateModel::from_prior_a(0.6, loaded, fair)?;

    let exact_t = model.transition_matrix();
    let posterior = model.posterior();
    print_matrix("analytic transition matrix", &exact_t);

    let next = exact_t.apply(&posterior);
    println!("pi     = ({:.5}, {:.5})", posterior.a, posterior.b);
    println!("pi * T = ({:.5}, {:.5})", next.a, next.b);
    println!(
        "detailed balance gap: {:.2e}, stationary: {}",
        exact_t.detailed_balance_gap(&posterior),
        exact_t.is_stationary(&posterior, 1e-3)
    );

    let trace = sample_posterior(&model, &MhSettings::default())?;
    let estimated_t = TransitionMatrix::estimate(&trace)?;
    let empirical = trace.empirical_posterior();
    print_matrix("estimated transition matrix", &estimated_t);

    let next = estimated_t.apply(&empirical);
    println!("pi_hat     = ({:.5}, {:.5})", empirical.a, empirical.b);
    println!("pi_hat * T = ({:.5}, {:.5})", next.a, next.b);
    println!(
        "stationary (1e-3): {}",
        estimated_t.is_stationary(&empirical, 1e-3)
    );

    Ok(())
}
