pub mod add;
pub mod alert;
pub mod backup;
pub mod budget;
pub mod del;
pub mod edit;
pub mod import;
pub mod ledger;
pub mod log;
pub mod query;
pub mod reset;
pub mod session;
