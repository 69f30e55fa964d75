//! One module per CLI subcommand.

pub mod coverage;
pub mod days;
pub mod loan;
pub mod payoff;
pub mod plan;
pub mod split;
pub mod tracker;
