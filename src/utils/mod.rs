pub mod geo;
pub mod money;
