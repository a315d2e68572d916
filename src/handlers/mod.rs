pub mod admin;
pub mod auth;
pub mod authors;
pub mod cookbooks;
pub mod favorites;
pub mod recipes;
pub mod utils;
