mod components;
pub mod keymap;
mod ui;

use std::{io, sync::Arc, time::Duration};

use chrono::Utc;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::{sync::mpsc, time};
use tracing::info;

use crate::{
    error::AppError,
    gateway::Gateway,
    store::{self, Action, Command, Store},
};

/// How often the screen is redrawn without input, so relative ages stay fresh.
const TICK_RATE: Duration = Duration::from_secs(1);

/// Takes over the terminal until the user quits.
pub async fn run(gateway: Arc<dyn Gateway>, mut store: Store) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, gateway, &mut store).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    gateway: Arc<dyn Gateway>,
    store: &mut Store,
) -> Result<(), AppError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut events = EventStream::new();
    let mut ticker = time::interval(TICK_RATE);

    let spawn = |command: Command| {
        let gateway = Arc::clone(&gateway);
        let tx = tx.clone();
        tokio::spawn(async move {
            let done = store::execute(gateway.as_ref(), command).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send(done);
        });
    };

    if let Some(command) = store.dispatch(Action::Refresh) {
        spawn(command);
    }

    while !store.should_quit() {
        terminal.draw(|f| ui::draw(f, store, Utc::now()))?;

        let action = tokio::select! {
            Some(event) = events.next() => match event? {
                Event::Key(key) if key.kind == KeyEventKind::Press => keymap::action_for(key, store),
                _ => None,
            },
            Some(done) = rx.recv() => Some(done),
            _ = ticker.tick() => None,
        };

        if let Some(command) = action.and_then(|action| store.dispatch(action)) {
            spawn(command);
        }
    }
    info!("quitting");

    Ok(())
}
