pub mod category;
pub mod expense;
pub mod import_row;
pub mod summary;
pub mod user;
