//! Command implementations and shared terminal styling.

pub mod admin;
pub mod countries;
pub mod invest;
pub mod opportunities;
pub mod profile;
pub mod setup;
pub mod ui;
