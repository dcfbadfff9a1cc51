pub mod console_reader;
pub mod storefront;
pub mod ui_handler;
