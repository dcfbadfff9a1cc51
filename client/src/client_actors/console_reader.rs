use actix::dev::ToEnvelope;
use actix::prelude::*;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::messages::{IncomingLine, InputClosed};

/// Lee la entrada línea por línea y reenvía cada una al destino.
pub struct ConsoleReader<R, A>
where
    R: AsyncRead + Unpin + 'static,
    A: Actor + Handler<IncomingLine> + Handler<InputClosed>,
{
    reader: Option<BufReader<R>>,
    destination: Addr<A>,
}

impl<R, A> ConsoleReader<R, A>
where
    R: AsyncRead + Unpin + 'static,
    A: Actor + Handler<IncomingLine> + Handler<InputClosed>,
{
    pub fn new(reader: R, destination: Addr<A>) -> Self {
        Self {
            reader: Some(BufReader::new(reader)),
            destination,
        }
    }
}

impl<R, A> Actor for ConsoleReader<R, A>
where
    R: AsyncRead + Unpin + 'static,
    A: Actor + Handler<IncomingLine> + Handler<InputClosed> + 'static,
    A::Context: ToEnvelope<A, IncomingLine> + ToEnvelope<A, InputClosed>,
{
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let addr = self.destination.clone();
        let Some(reader) = self.reader.take() else {
            return;
        };

        ctx.spawn(
            async move {
                let mut lines = reader.lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    addr.do_send(IncomingLine(line));
                }
                // EOF o error de lectura
                addr.do_send(InputClosed);
            }
            .into_actor(self),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    enum Received {
        Line(String),
        Closed,
    }

    struct Collector {
        sender: mpsc::UnboundedSender<Received>,
    }

    impl Actor for Collector {
        type Context = Context<Self>;
    }

    impl Handler<IncomingLine> for Collector {
        type Result = ();

        fn handle(&mut self, msg: IncomingLine, _ctx: &mut Self::Context) {
            let _ = self.sender.send(Received::Line(msg.0));
        }
    }

    impl Handler<InputClosed> for Collector {
        type Result = ();

        fn handle(&mut self, _msg: InputClosed, _ctx: &mut Self::Context) {
            let _ = self.sender.send(Received::Closed);
        }
    }

    #[actix_rt::test]
    async fn test_lines_then_close_are_forwarded() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let collector = Collector { sender }.start();
        let input: &'static [u8] = b"menu r7\nadd m1\n";
        let _reader = ConsoleReader::new(input, collector).start();

        let mut lines = Vec::new();
        while let Some(received) = receiver.recv().await {
            match received {
                Received::Line(line) => lines.push(line),
                Received::Closed => break,
            }
        }
        assert_eq!(lines, vec!["menu r7".to_string(), "add m1".to_string()]);
    }
}
