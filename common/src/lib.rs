pub mod cart;
pub mod catalog;
pub mod constants;
pub mod customization;
pub mod errors;
pub mod logger;
pub mod orders;
pub mod pricing;
pub mod tracker;
pub mod types;
pub mod utils;
