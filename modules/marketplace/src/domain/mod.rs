pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod password;
pub mod ports;
pub mod profile;
pub mod repo;
pub mod service;
pub mod session;
pub mod state;
