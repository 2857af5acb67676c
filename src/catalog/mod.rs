mod loader;
mod pairings;

pub use loader::{
    ColumnMap, coerce_number, is_truthy, load_catalog, load_catalog_spreadsheet, parse_catalog_csv,
    parse_catalog_json, parse_catalog_range,
};
pub use pairings::load_pairings;
