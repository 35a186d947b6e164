pub mod calculator;
pub mod loader;
pub mod models;
pub mod table;

pub use calculator::CostCalculator;
pub use loader::parse_pricing;
pub use models::{CompanyCost, PriceEntry};
pub use table::PriceTable;
