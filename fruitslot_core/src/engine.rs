use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    config::EngineConfig,
    error::{EngineError, EngineResult},
    evaluator::{evaluate, WinResult},
    generator::SymbolGenerator,
    grid::Grid,
    rng::{ProvablyFairRng, RandomSource},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub balance_before: u64,
    pub balance: u64,
    /// Credits debited for this spin.
    pub cost: u64,
    pub grid: Grid,
    pub result: WinResult,
    pub payout: u64,
}


/// Stateless between calls; the caller owns the balance.
#[derive(Debug, Clone)]
pub struct SlotEngine {
    config: EngineConfig,
    generator: SymbolGenerator,
}

impl SlotEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let generator = SymbolGenerator::new(&config);
        Ok(Self { config, generator })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn generator(&self) -> &SymbolGenerator {
        &self.generator
    }

    pub fn can_spin(&self, balance: u64) -> bool {
        balance >= self.config.spin_cost
    }

    /// Debit, draw, evaluate, credit. Refused spins consume no randomness.
    pub fn spin(&self, balance: u64, rng: &mut impl RandomSource) -> EngineResult<SpinOutcome> {
        let cost = self.config.spin_cost;
        if !self.can_spin(balance) {
            trace!(balance, cost, "spin refused");
            return Err(EngineError::InsufficientBalance { balance, cost });
        }
        let debited = balance - cost;
        let grid = self.generator.fill_grid(rng);
        let result = evaluate(&grid);
        let payout = if result.is_win {
            self.config.win_payout
        } else {
            0
        };
        let outcome = SpinOutcome {
            balance_before: balance,
            balance: debited.saturating_add(payout),
            cost,
            grid,
            result,
            payout,
        };
        debug!(
            balance_before = outcome.balance_before,
            balance = outcome.balance,
            win = outcome.result.is_win,
            line = ?outcome.result.line,
            "spin"
        );
        Ok(outcome)
    }

    pub fn spin_with_seeds(
        &self,
        server_seed: &str,
        client_seed: &str,
        nonce: u64,
        balance: u64,
    ) -> EngineResult<SpinOutcome> {
        let mut rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
        self.spin(balance, &mut rng)
    }

    /// The grid a provably-fair spin with these seeds produces.
    pub fn grid_for_seeds(&self, server_seed: &str, client_seed: &str, nonce: u64) -> Grid {
        let mut rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
        self.generator.fill_grid(&mut rng)
    }

    /// Verify that a given grid matches what the RNG would produce for the seeds.
    pub fn verify_grid(
        &self,
        server_seed: &str,
        client_seed: &str,
        nonce: u64,
        expected: &Grid,
    ) -> bool {
        self.grid_for_seeds(server_seed, client_seed, nonce) == *expected
    }
}

impl Default for SlotEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            generator: SymbolGenerator::new(&config),
            config,
        }
    }
}
