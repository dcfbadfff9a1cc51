pub mod client_actors;
pub mod commands;
pub mod config;
pub mod messages;
pub mod screens;
