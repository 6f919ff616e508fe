//! Gold, lives, and upgrade credits
//!
//! Every change to the player's resources goes through one of these methods.
//! All arithmetic saturates: gold and credits never go negative, lives floor
//! at zero.

use serde::Serialize;

use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Economy {
    pub gold: u32,
    pub lives: u32,
    pub upgrade_credits: u32,
}

impl Economy {
    pub fn new(gold: u32, lives: u32) -> Self {
        Self {
            gold,
            lives,
            upgrade_credits: 0,
        }
    }

    /// Kill bounty
    pub fn reward(&mut self, gold: u32) {
        self.gold = self.gold.saturating_add(gold);
    }

    /// An enemy reached the end of the path; returns lives left
    pub fn breach(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_defeated(&self) -> bool {
        self.lives == 0
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.gold >= cost
    }

    /// Spend gold, all or nothing
    pub fn spend(&mut self, cost: u32) -> Result<(), CommandError> {
        if !self.can_afford(cost) {
            return Err(CommandError::InsufficientGold {
                cost,
                gold: self.gold,
            });
        }
        self.gold -= cost;
        Ok(())
    }

    pub fn grant_credits(&mut self, credits: u32) {
        self.upgrade_credits = self.upgrade_credits.saturating_add(credits);
    }

    /// Spend upgrade credits, all or nothing
    pub fn spend_credits(&mut self, credits: u32) -> Result<(), CommandError> {
        if self.upgrade_credits < credits {
            return Err(CommandError::NoUpgradeCredits);
        }
        self.upgrade_credits -= credits;
        Ok(())
    }
}
