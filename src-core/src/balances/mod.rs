pub mod balance_mutator;

pub use balance_mutator::{BalanceDelta, BalanceMutator};
