//! Drives a phpMyAdmin-style web admin console over HTTP to seed or import a
//! CMS test database. The console has no API: login is an HTML form with a
//! rotating anti-forgery token, and statement outcomes exist only as markers
//! in the returned markup.

pub mod cli;
pub mod config;
pub mod driver;
pub mod import;
pub mod logger;
pub mod seed;
pub mod session;
pub mod verify;
