pub mod config;
pub mod content;
pub mod db;
pub mod feature;
pub mod i18n;
pub mod routes;
pub mod server;
pub mod store;
