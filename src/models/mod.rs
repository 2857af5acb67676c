pub mod catalog;
pub mod food;
pub mod request;
pub mod solution;

pub use catalog::{Catalog, Macro};
pub use food::FoodItem;
pub use request::{Filters, Goal, SearchParams};
pub use solution::{SelectedItem, Solution, Totals};
