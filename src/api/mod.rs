pub mod auth;
pub mod categories;
pub mod content;
pub mod tools;
