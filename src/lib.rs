pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod needs;
pub mod planner;
pub mod server;

pub use error::{MealError, Result};
pub use models::{Catalog, FoodItem, Goal, Solution};
pub use planner::suggest;
