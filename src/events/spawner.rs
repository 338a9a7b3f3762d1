use tokio::sync::mpsc;
use tokio::task;
use tokio::time::Duration;
use crossterm::event::{self, Event as CEvent, KeyEvent, KeyEventKind};

/// Wrapper for input and tick events
#[derive(Debug, Clone)]
pub enum Event {
    Input(KeyEvent),
    Tick,
    Stop,
}

/// Event source producing `Input` and `Tick` events
pub struct EventSpawner {
    rx: mpsc::Receiver<Event>,
}

impl EventSpawner {
    /// Poll the terminal on a blocking thread; every quiet `tick` yields a `Tick`
    pub fn new(tick: Duration) -> Self {
        let (tx, rx) = mpsc::channel(20);

        task::spawn_blocking(move || loop {
            let event = match event::poll(tick) {
                Ok(true) => match event::read() {
                    Ok(CEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Input(key),
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::error!(error = %e, "reading terminal event failed");
                        Event::Stop
                    }
                },
                Ok(false) => Event::Tick,
                Err(e) => {
                    tracing::error!(error = %e, "polling terminal events failed");
                    Event::Stop
                }
            };
            let stop = matches!(event, Event::Stop);
            if tx.blocking_send(event).is_err() || stop {
                break;
            }
        });
        Self { rx }
    }

    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Stop)
    }
}
