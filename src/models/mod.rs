//! Data models
//!
//! Catalog entities and the composition input shape.

mod chemistry;
mod composition;
mod ingredient;
mod tcm;

pub use chemistry::Chemistry;
pub use composition::CompositionItem;
pub use ingredient::{Ingredient, IngredientCreate, IngredientSort};
pub use tcm::{TcmAttribute, TcmProfile};
