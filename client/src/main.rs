use actix::Actor;
use client::client_actors::console_reader::ConsoleReader;
use client::client_actors::storefront::Storefront;
use client::client_actors::ui_handler::UIHandler;
use client::config::StorefrontConfig;
use colored::Color;
use common::catalog::Catalog;
use common::logger::Logger;
use common::pricing::PricingPolicy;
use common::utils::print_welcome_message;
use std::env;
use tokio::signal::ctrl_c;
use tokio::sync::oneshot;

#[actix::main]
async fn main() -> std::io::Result<()> {
    let config = StorefrontConfig::from_env(env::args().collect());

    let catalog = match Catalog::load(config.catalog_path.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("No se pudo cargar el catálogo: {}", e);
            std::process::exit(1);
        }
    };

    print_welcome_message(&config.customer_name);

    let storefront = Storefront::new(
        config.customer_name.clone(),
        catalog,
        PricingPolicy::default(),
        config.log_level,
    )
    .start();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let logger = Logger::new("UI", Color::Cyan).with_level(config.log_level);
    let ui = UIHandler::new(storefront, shutdown_tx, logger).start();
    ConsoleReader::new(tokio::io::stdin(), ui).start();

    tokio::select! {
        _ = ctrl_c() => {
            println!("Ctrl-C recibido, apagando...");
        }
        _ = shutdown_rx => {}
    }
    actix::System::current().stop();
    Ok(())
}
