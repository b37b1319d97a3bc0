use crate::db::users::UserDirectory;
use crate::errors::{AppError, AppResult};
use crate::models::expense::UserId;
use chrono::NaiveDate;

/// Who is acting and what "today" is, built once per command and passed
/// down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<UserId>,
    pub email: Option<String>,
    pub today: NaiveDate,
}

impl Session {
    /// Single-user mode: rows are stored without an owner.
    pub fn anonymous(today: NaiveDate) -> Self {
        Self {
            user_id: None,
            email: None,
            today,
        }
    }

    /// Resolve `email` (get-or-create); `None` gives an anonymous session.
    pub fn open(users: &mut UserDirectory, email: Option<&str>, today: NaiveDate) -> AppResult<Self> {
        match email {
            Some(e) => {
                let user_id = users.resolve(e)?;
                let user = users.get(user_id)?;
                Ok(Self {
                    user_id: Some(user_id),
                    email: Some(user.email),
                    today,
                })
            }
            None => Ok(Self::anonymous(today)),
        }
    }

    /// Id and email of the current user, for operations that need one
    /// (budgets, alerts).
    pub fn require_user(&self) -> AppResult<(UserId, &str)> {
        match (self.user_id, self.email.as_deref()) {
            (Some(id), Some(email)) => Ok((id, email)),
            _ => Err(AppError::MissingUser),
        }
    }

    pub fn label(&self) -> String {
        self.email.clone().unwrap_or_else(|| "local".to_string())
    }
}
