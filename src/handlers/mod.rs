pub mod file;
pub mod post;
pub mod profile;
pub mod theme;
pub mod user;
