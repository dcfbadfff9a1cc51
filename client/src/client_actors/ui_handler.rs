use actix::prelude::*;
use tokio::sync::oneshot;

use common::errors::StorefrontError;
use common::logger::Logger;

use crate::client_actors::storefront::Storefront;
use crate::commands::{HELP, Input};
use crate::messages::*;
use crate::screens::{Screen, render};

/// Actor UIHandler: Interfaz humano-sistema
pub struct UIHandler {
    /// Canal de envío hacia el actor `Storefront`
    pub storefront: Addr<Storefront>,
    /// Avisa a `main` que el usuario terminó la sesión.
    shutdown: Option<oneshot::Sender<()>>,
    pub logger: Logger,
}

impl UIHandler {
    pub fn new(storefront: Addr<Storefront>, shutdown: oneshot::Sender<()>, logger: Logger) -> Self {
        UIHandler {
            storefront,
            shutdown: Some(shutdown),
            logger,
        }
    }

    fn finish(&mut self, ctx: &mut Context<Self>) {
        if let Some(shutdown) = self.shutdown.take() {
            self.logger.info("Goodbye!");
            let _ = shutdown.send(());
        }
        ctx.stop();
    }

    fn show(&self, reply: Result<Result<Screen, StorefrontError>, MailboxError>) {
        match reply {
            Ok(Ok(screen)) => println!("{}\n", render(&screen)),
            Ok(Err(e)) => self.logger.warn(e.to_string()),
            Err(e) => self.logger.error(format!("Storefront unavailable: {}", e)),
        }
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.debug("UIHandler iniciado!");
    }
}

impl Handler<IncomingLine> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: IncomingLine, ctx: &mut Self::Context) {
        match Input::parse(&msg.0) {
            Ok(Input::Empty) => {}
            Ok(Input::Help) => println!("{}\n", HELP),
            Ok(Input::Quit) => self.finish(ctx),
            Ok(Input::Storefront(command)) => {
                // El mailbox queda en espera hasta la respuesta: los comandos
                // se aplican en el orden en que se leyeron.
                self.storefront
                    .send(command)
                    .into_actor(self)
                    .map(|reply, act, _ctx| act.show(reply))
                    .wait(ctx);
            }
            Err(e) => self.logger.warn(e.to_string()),
        }
    }
}

impl Handler<InputClosed> for UIHandler {
    type Result = ();

    fn handle(&mut self, _msg: InputClosed, ctx: &mut Self::Context) {
        self.logger.debug("Input closed");
        self.finish(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Color;
    use common::catalog::Catalog;
    use common::logger::LogLevel;
    use common::pricing::PricingPolicy;

    fn ui(storefront: Addr<Storefront>, shutdown: oneshot::Sender<()>) -> Addr<UIHandler> {
        let logger = Logger::new("UI", Color::Cyan).with_level(LogLevel::Error);
        UIHandler::new(storefront, shutdown, logger).start()
    }

    fn storefront() -> Addr<Storefront> {
        Storefront::new(
            "tester".to_string(),
            Catalog::embedded().unwrap(),
            PricingPolicy::default(),
            LogLevel::Error,
        )
        .start()
    }

    async fn cart_lines(storefront: &Addr<Storefront>) -> Vec<(String, u32)> {
        match storefront.send(ShowCart).await.unwrap().unwrap() {
            Screen::Cart(view) => view
                .lines
                .into_iter()
                .map(|line| (line.id, line.quantity))
                .collect(),
            other => panic!("Expected the cart screen, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_script_runs_in_order_before_input_closes() {
        let (sender, receiver) = oneshot::channel();
        let storefront = storefront();
        let addr = ui(storefront.clone(), sender);
        for line in [
            "menu r7 pizzas",
            "add m1",
            "choose thick",
            "choose cheese",
            "confirm",
            "dec m3",
            "remove m6",
        ] {
            addr.do_send(IncomingLine(line.to_string()));
        }
        addr.do_send(InputClosed);
        assert!(receiver.await.is_ok());

        let lines = cart_lines(&storefront).await;
        assert_eq!(
            lines,
            vec![
                ("m1".to_string(), 1),
                ("m3".to_string(), 1),
                ("m1:thick+cheese".to_string(), 1),
            ]
        );
    }

    #[actix_rt::test]
    async fn test_quit_waits_for_pending_commands() {
        let (sender, receiver) = oneshot::channel();
        let storefront = storefront();
        let addr = ui(storefront.clone(), sender);
        for line in ["dance", "reorder past002", "inc california-roll", "quit", "cart"] {
            addr.do_send(IncomingLine(line.to_string()));
        }
        assert!(receiver.await.is_ok());

        let lines = cart_lines(&storefront).await;
        assert_eq!(lines, vec![("california-roll".to_string(), 3)]);
    }

    #[actix_rt::test]
    async fn test_closed_input_fires_the_shutdown_signal() {
        let (sender, receiver) = oneshot::channel();
        let addr = ui(storefront(), sender);
        addr.do_send(InputClosed);
        assert!(receiver.await.is_ok());
    }
}
