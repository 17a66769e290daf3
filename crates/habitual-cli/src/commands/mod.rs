pub mod account;
pub mod catalog;
pub mod config;
pub mod data;
pub mod habit;
pub mod notification;
pub mod prefs;
pub mod stats;
