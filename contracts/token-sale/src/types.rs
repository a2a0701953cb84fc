use soroban_sdk::{contracttype, Address};

use engine_lib::{validation, ContractError};

/// Half-open time window `[start, end)`
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

impl Window {
    pub fn contains(&self, now: u64) -> bool {
        self.start <= now && now < self.end
    }
}

/// Where the sale stands at a given time. Never stored; always derived from
/// the ledger time and the config.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SalePhase {
    BeforePresale = 0,
    Presale = 1,
    BetweenWindows = 2,
    PublicSale = 3,
    AfterPublicSale = 4,
}

/// Immutable sale parameters, fixed at construction
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Asset contributors pay with
    pub payment_token: Address,
    /// Asset distributed to contributors
    pub sale_token: Address,
    pub presale: Window,
    pub public_sale: Window,
    /// Ceiling on value raised during the presale window
    pub presale_cap: i128,
    /// Ceiling on value raised during the public window only
    pub public_cap: i128,
    /// Per-call lower bound
    pub min_contribution: i128,
    /// Per-call upper bound
    pub max_contribution: i128,
    /// Combined raise below which contributors may claim refunds
    pub minimum_goal: i128,
    /// Units of `sale_token` per unit of `payment_token`
    pub distribution_rate: i128,
}

impl SaleConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        validation::validate_distinct_assets(&self.payment_token, &self.sale_token)?;
        validation::validate_window(self.presale.start, self.presale.end)?;
        validation::validate_window(self.public_sale.start, self.public_sale.end)?;
        if self.public_sale.start < self.presale.end {
            return Err(ContractError::InvalidConfig);
        }
        validation::validate_positive_amount(self.presale_cap)?;
        validation::validate_positive_amount(self.public_cap)?;
        validation::validate_bounds(self.min_contribution, self.max_contribution)?;
        validation::validate_positive_amount(self.minimum_goal)?;
        let reachable = self
            .presale_cap
            .checked_add(self.public_cap)
            .ok_or(ContractError::InvalidConfig)?;
        if self.minimum_goal > reachable {
            return Err(ContractError::InvalidConfig);
        }
        validation::validate_positive_amount(self.distribution_rate)?;
        Ok(())
    }

    pub fn phase_at(&self, now: u64) -> SalePhase {
        if now < self.presale.start {
            SalePhase::BeforePresale
        } else if self.presale.contains(now) {
            SalePhase::Presale
        } else if now < self.public_sale.start {
            SalePhase::BetweenWindows
        } else if self.public_sale.contains(now) {
            SalePhase::PublicSale
        } else {
            SalePhase::AfterPublicSale
        }
    }

    /// Distributed-asset amount owed for a contribution of `value`
    pub fn tokens_for(&self, value: i128) -> Result<i128, ContractError> {
        value
            .checked_mul(self.distribution_rate)
            .ok_or(ContractError::ArithmeticOverflow)
    }
}

/// Sale singleton
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleState {
    pub total_presale_raised: i128,
    pub total_public_raised: i128,
    pub public_sale_ended: bool,
}

impl SaleState {
    pub fn new() -> Self {
        SaleState {
            total_presale_raised: 0,
            total_public_raised: 0,
            public_sale_ended: false,
        }
    }

    pub fn total_raised(&self) -> i128 {
        self.total_presale_raised
            .saturating_add(self.total_public_raised)
    }

    pub fn goal_reached(&self, config: &SaleConfig) -> bool {
        self.total_raised() >= config.minimum_goal
    }

    /// State after accepting `value` in `phase`, or the guard that rejects it.
    /// Checks run in order: window, per-call bounds, window cap.
    pub fn accept(
        &self,
        config: &SaleConfig,
        phase: SalePhase,
        value: i128,
    ) -> Result<SaleState, ContractError> {
        let (raised, cap) = match phase {
            SalePhase::Presale => (self.total_presale_raised, config.presale_cap),
            SalePhase::PublicSale => (self.total_public_raised, config.public_cap),
            _ => return Err(ContractError::SaleNotActive),
        };

        if value < config.min_contribution || value > config.max_contribution {
            return Err(ContractError::ContributionOutOfBounds);
        }

        let raised = raised
            .checked_add(value)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if raised > cap {
            return Err(ContractError::CapExceeded);
        }

        let mut next = self.clone();
        match phase {
            SalePhase::Presale => next.total_presale_raised = raised,
            _ => next.total_public_raised = raised,
        }
        Ok(next)
    }
}
