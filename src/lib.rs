pub mod cli;
pub mod config;
pub mod controller;
pub mod effects;
pub mod gateway;
pub mod history;
pub mod lifecycle;
pub mod logging;
pub mod theme;
pub mod ui;
