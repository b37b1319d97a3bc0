use crate::models::expense::UserId;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,              // ⇔ users.id
    pub email: String,           // ⇔ users.email (UNIQUE, lower-case)
    pub budget: Option<Decimal>, // ⇔ users.budget (TEXT, NULL = no budget)
    pub alert_sent: bool,        // ⇔ users.alert_sent (INT 0/1)
    pub created_at: String,      // ⇔ users.created_at (TEXT, ISO8601)
}

impl User {
    /// Latch state of the budget alert for this user.
    pub fn alert_state(&self) -> AlertState {
        if self.alert_sent {
            AlertState::Fired
        } else {
            AlertState::Armed
        }
    }
}

/// Budget alert latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    /// No notification sent for the current episode.
    Armed,
    /// A notification was dispatched; only a budget change re-arms it.
    Fired,
}
