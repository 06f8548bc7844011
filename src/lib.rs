pub mod api;
pub mod app_config;
pub mod books_repository;
pub mod catalog;
pub mod details;
pub mod reviews;
pub mod settings;

mod handlers;
