//! Purchase fan-out: split a bought quantity across an ordered list of wallets.

use super::quantity::ceil_div;
use crate::errors::{Result, SimError};
use serde::Serialize;

/// One wallet's share of a fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation<W> {
    pub wallet: W,
    pub quantity: u64,
}

/// Splits `total` smallest units across `targets`, in order.
///
/// Each target takes `ceil(remaining_total / remaining_targets)` at the moment it
/// is visited, so any remainder lands on the earliest wallets. Once the running
/// remainder hits zero every later wallet gets an explicit `0`. The result has
/// one entry per target, in input order, and always sums to `total`.
///
/// `total == 0` is a no-op (all zeros). A positive total with no targets is
/// rejected with [`SimError::EmptyTargets`].
pub fn allocate<W: Clone>(total: u64, targets: &[W]) -> Result<Vec<Allocation<W>>> {
    if total > 0 && targets.is_empty() {
        return Err(SimError::EmptyTargets(total));
    }

    let mut remaining_total = total;
    let mut remaining_count = targets.len() as u64;
    let mut allocations = Vec::with_capacity(targets.len());

    for wallet in targets {
        // remaining_count >= 1 here, and ceil(r / c) <= r, so the subtraction never underflows.
        let quantity = if remaining_total == 0 {
            0
        } else {
            ceil_div(remaining_total, remaining_count)
        };
        remaining_total -= quantity;
        remaining_count -= 1;
        allocations.push(Allocation {
            wallet: wallet.clone(),
            quantity,
        });
    }

    debug_assert_eq!(remaining_total, 0);
    Ok(allocations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantities<W>(allocations: &[Allocation<W>]) -> Vec<u64> {
        allocations.iter().map(|a| a.quantity).collect()
    }

    #[test]
    fn front_loads_the_remainder() {
        let result = allocate(10, &["w1", "w2", "w3"]).unwrap();
        assert_eq!(quantities(&result), vec![4, 3, 3]);
        assert_eq!(result[0].wallet, "w1");
        assert_eq!(result[2].wallet, "w3");
    }

    #[test]
    fn zero_total_gives_every_target_zero() {
        let result = allocate(0, &["w1", "w2", "w3"]).unwrap();
        assert_eq!(quantities(&result), vec![0, 0, 0]);
        assert!(allocate::<&str>(0, &[]).unwrap().is_empty());
    }

    #[test]
    fn single_target_takes_everything() {
        assert_eq!(quantities(&allocate(7, &["only"]).unwrap()), vec![7]);
    }

    #[test]
    fn more_targets_than_units_leaves_a_zero_tail() {
        let result = allocate(2, &["a", "b", "c", "d", "e"]).unwrap();
        assert_eq!(quantities(&result), vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn differs_from_a_fixed_precomputed_share() {
        // A fixed ceil(5/4) = 2 share would give [2, 2, 1, 0].
        let result = allocate(5, &[1, 2, 3, 4]).unwrap();
        assert_eq!(quantities(&result), vec![2, 1, 1, 1]);
    }

    #[test]
    fn sum_is_conserved() {
        for total in [0u64, 1, 2, 3, 10, 99, 100, 101, 1_000_003, u64::MAX] {
            for count in 1..=9usize {
                let targets: Vec<usize> = (0..count).collect();
                let result = allocate(total, &targets).unwrap();
                assert_eq!(result.len(), count);
                let sum: u128 = result.iter().map(|a| a.quantity as u128).sum();
                assert_eq!(sum, total as u128, "total={} count={}", total, count);
                assert!(result.windows(2).all(|w| w[0].quantity >= w[1].quantity));
            }
        }
    }

    #[test]
    fn empty_targets_with_positive_total_is_rejected() {
        assert!(matches!(allocate::<&str>(5, &[]), Err(SimError::EmptyTargets(5))));
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let targets = ["a", "b", "c"];
        assert_eq!(allocate(17, &targets).unwrap(), allocate(17, &targets).unwrap());
    }
}
