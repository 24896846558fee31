pub mod error;
pub mod outcome;
pub mod record;
pub mod schema;
