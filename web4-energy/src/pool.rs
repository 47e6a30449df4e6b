//! Society ATP/ADP pools (§3, §5). The only write-hot shared resource in
//! the engine; mutations are compare-and-swapped on `version`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A society's resource-budget state (§4 metabolic state model).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetabolicState {
    Active,
    Rest,
    Sleep,
    Hibernation,
    Torpor,
}

/// Charged/discharged token pool for one society.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SocietyPool {
    pub society_lct: String,
    pub atp_balance: Decimal,
    pub adp_balance: Decimal,
    pub total_minted: Decimal,
    pub total_discharged: Decimal,
    pub total_recharged: Decimal,
    pub metabolic_state: MetabolicState,
    pub treasury_role: String,
    /// Monotonic version for compare-and-swap writes.
    pub version: u64,
}

impl SocietyPool {
    pub fn new(society_lct: impl Into<String>, treasury_role: impl Into<String>) -> Self {
        Self {
            society_lct: society_lct.into(),
            atp_balance: Decimal::ZERO,
            adp_balance: Decimal::ZERO,
            total_minted: Decimal::ZERO,
            total_discharged: Decimal::ZERO,
            total_recharged: Decimal::ZERO,
            metabolic_state: MetabolicState::Active,
            treasury_role: treasury_role.into(),
            version: 0,
        }
    }

    /// `ATP + ADP` is non-negative by construction; this asserts the
    /// invariant holds for diagnostics / tests (§8 universal invariant 1).
    pub fn total_supply(&self) -> Decimal {
        self.atp_balance + self.adp_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pool_starts_at_zero() {
        let pool = SocietyPool::new("soc:demo", "role:treasury");
        assert_eq!(pool.total_supply(), Decimal::ZERO);
        assert_eq!(pool.metabolic_state, MetabolicState::Active);
    }
}
