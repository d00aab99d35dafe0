pub mod aggregate;
pub mod calendar;
pub mod day;
pub mod filter;
pub mod hour;
pub mod insights;
pub mod recommendation;
pub mod record;
