use serde::{Deserialize, Serialize};

/// The player's currency balance.
///
/// Serialized as a bare integer. Only the manager's buy/sell handlers mutate
/// it, which keeps every money movement a single auditable transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wallet {
    balance: i64,
}

impl Wallet {
    pub fn new(balance: i64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn can_afford(&self, price: i64) -> bool {
        self.balance >= price
    }

    pub(crate) fn credit(&mut self, amount: i64) {
        self.balance += amount;
    }

    pub(crate) fn debit(&mut self, amount: i64) {
        self.balance -= amount;
    }
}
