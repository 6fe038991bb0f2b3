pub mod confirm;
pub mod dates;
