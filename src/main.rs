use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, panic, sync::Arc, time::Duration};
use tokio::sync::{Mutex, mpsc};

use questforge::ai::GameAI;
use questforge::app::{App, AppCommand, TurnEvent};
use questforge::cleanup::cleanup;
use questforge::logging;
use questforge::settings::Settings;
use questforge::ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Secrets may live in a .env file next to the binary.
    dotenvy::dotenv().ok();
    logging::init()?;

    let settings = Settings::load().unwrap_or_default();
    // The one required secret: resolved once, fatal before any UI comes up.
    let api_key = settings.resolve_api_key()?;

    let ai_client = Arc::new(GameAI::new(
        api_key,
        &settings.api_base,
        &settings.model,
        settings.tracing_disabled,
    ));

    panic::set_hook(Box::new(|panic_info| {
        cleanup();
        if let Some(location) = panic_info.location() {
            println!(
                "Panic occurred in file '{}' at line {}",
                location.file(),
                location.line(),
            );
        }
        if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
            println!("Panic message: {}", message);
        }
    }));

    // Setup terminal
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Channel for finished turns coming back from spawned tasks.
    let (turn_sender, turn_receiver) = mpsc::unbounded_channel::<TurnEvent>();

    let (app, command_receiver) = App::new(settings, ai_client, turn_sender);
    let app = Arc::new(Mutex::new(app));

    let result = run_app(&mut terminal, app, command_receiver, turn_receiver).await;
    cleanup();

    if let Err(err) = result {
        log::error!("fatal: {err:?}");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    mut command_receiver: mpsc::UnboundedReceiver<AppCommand>,
    mut turn_receiver: mpsc::UnboundedReceiver<TurnEvent>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| {
            let app = tokio::task::block_in_place(|| app.blocking_lock());
            ui::draw(f, &app)
        })?;

        tokio::select! {
            _ = tokio::time::sleep(tick_rate) => {}
            event = tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            }) => {
                if let Ok(Ok(Some(Event::Key(key)))) = event {
                    app.lock().await.on_key(key);
                }
            }
            Some(command) = command_receiver.recv() => {
                let mut app = app.lock().await;
                match command {
                    AppCommand::ProcessMessage(message) => app.process_message(message),
                }
            }
            Some(turn) = turn_receiver.recv() => {
                app.lock().await.handle_turn_event(turn);
            }
        }

        if app.lock().await.should_quit {
            return Ok(());
        }
    }
}
