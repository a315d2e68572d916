pub mod author;
pub mod cookbook;
pub mod recipe;

pub use author::Author;
pub use cookbook::{Cookbook, CookbookRecipe};
pub use recipe::{Difficulty, Recipe, RecipeItem};
