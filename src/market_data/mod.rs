pub mod generator;
pub mod price_table;

// Re-export the table and generator entry point for convenient access
// (e.g. `use crate::market_data::PriceTable`).
pub use generator::generate_table;
pub use price_table::PriceTable;
