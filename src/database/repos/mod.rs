pub mod authors;
pub mod cookbooks;
pub mod favorites;
pub mod recipes;
