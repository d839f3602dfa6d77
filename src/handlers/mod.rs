pub mod area;
pub mod quotes;
