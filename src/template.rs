pub mod formatter;
pub mod token;
