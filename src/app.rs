use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::{Mutex, mpsc};

use crate::ai::GameAI;
use crate::app_state::AppState;
use crate::dispatcher::{self, TurnError, TurnOutcome};
use crate::message::{Message, MessageType};
use crate::session::SessionState;
use crate::settings::Settings;

pub const WELCOME: &str = "🧙 Welcome, adventurer! Your quest begins now...\n\nTell me what \
you'd like to do — explore a forest, enter a dungeon, or visit a village?";

/// Transient notice shown while a turn is in flight; popped when it lands.
pub const THINKING: &str = "AI is thinking...";

pub const MAIN_MENU_ITEMS: [&str; 2] = ["Start a new adventure", "Exit"];

pub enum AppCommand {
    ProcessMessage(String),
}

/// Result of one spawned turn, delivered back through the event loop.
pub type TurnEvent = Box<std::result::Result<TurnOutcome, TurnError>>;

pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    pub main_menu_index: usize,

    pub settings: Settings,
    ai_client: Arc<GameAI>,

    /// One session at a time, owned here (the transport layer) and handed by
    /// reference to the dispatcher. Dropped when the player leaves the game.
    pub session: Option<Arc<Mutex<SessionState>>>,
    /// Everything shown in the chat view, including UI-only System messages
    /// that never become model context.
    pub game_content: Vec<Message>,
    pub is_processing: bool,

    pub input: String,
    /// Scroll offset in lines, counted from the bottom of the chat.
    pub scroll_offset: usize,

    command_sender: mpsc::UnboundedSender<AppCommand>,
    turn_sender: mpsc::UnboundedSender<TurnEvent>,
}

impl App {
    pub fn new(
        settings: Settings,
        ai_client: Arc<GameAI>,
        turn_sender: mpsc::UnboundedSender<TurnEvent>,
    ) -> (Self, mpsc::UnboundedReceiver<AppCommand>) {
        let (command_sender, command_receiver) = mpsc::unbounded_channel();

        let app = Self {
            state: AppState::MainMenu,
            should_quit: false,
            main_menu_index: 0,

            settings,
            ai_client,

            session: None,
            game_content: Vec::new(),
            is_processing: false,

            input: String::new(),
            scroll_offset: 0,

            command_sender,
            turn_sender,
        };
        (app, command_receiver)
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.state {
            AppState::MainMenu => self.handle_main_menu_key(key),
            AppState::InGame => self.handle_in_game_key(key),
        }
    }

    fn handle_main_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.main_menu_index = self.main_menu_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.main_menu_index = (self.main_menu_index + 1).min(MAIN_MENU_ITEMS.len() - 1);
            }
            KeyCode::Enter => match self.main_menu_index {
                0 => self.start_session(),
                _ => self.should_quit = true,
            },
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_in_game_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.end_session(),
            KeyCode::Enter => self.submit_input(),
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll_offset = self.scroll_offset.saturating_add(1),
            KeyCode::Down => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyCode::PageUp => self.scroll_offset = self.scroll_offset.saturating_add(10),
            KeyCode::PageDown => self.scroll_offset = self.scroll_offset.saturating_sub(10),
            _ => {}
        }
    }

    /// Fresh session: empty history, Narrator active, welcome message shown.
    fn start_session(&mut self) {
        self.session = Some(Arc::new(Mutex::new(SessionState::new())));
        self.game_content.clear();
        self.input.clear();
        self.is_processing = false;
        self.add_message(Message::new(MessageType::System, WELCOME));
        self.state = AppState::InGame;
        log::info!("session started");
    }

    /// Leaving the game discards the session entirely; nothing persists.
    fn end_session(&mut self) {
        self.session = None;
        self.game_content.clear();
        self.input.clear();
        self.is_processing = false;
        self.state = AppState::MainMenu;
        log::info!("session ended");
    }

    fn submit_input(&mut self) {
        // One turn at a time: input is held back while a turn is in flight.
        if self.is_processing {
            return;
        }
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.input.clear();
        // Claim the turn slot here, not when the command is drained: the
        // event loop may service another keypress before the command.
        self.is_processing = true;
        self.add_message(Message::new(MessageType::User, text.clone()));
        let _ = self.command_sender.send(AppCommand::ProcessMessage(text));
    }

    /// Run one turn on the runtime so the UI keeps drawing while we wait on
    /// the model. `is_processing` guarantees turns never overlap.
    pub fn process_message(&mut self, text: String) {
        let Some(session) = self.session.clone() else {
            return;
        };
        self.is_processing = true;
        self.add_message(Message::new(MessageType::System, THINKING));

        let ai_client = Arc::clone(&self.ai_client);
        let turn_sender = self.turn_sender.clone();
        tokio::spawn(async move {
            let mut session = session.lock().await;
            let result = dispatcher::process_turn(&mut session, &text, ai_client.as_ref()).await;
            let _ = turn_sender.send(Box::new(result));
        });
    }

    pub fn handle_turn_event(&mut self, event: TurnEvent) {
        self.is_processing = false;
        if let Some(last) = self.game_content.last() {
            if last.message_type == MessageType::System && last.content == THINKING {
                self.game_content.pop();
            }
        }

        match *event {
            Ok(outcome) => {
                if let Some(persona) = outcome.switched_to {
                    self.add_message(Message::new(MessageType::System, persona.switch_notice()));
                }
                self.add_message(Message::new(MessageType::Assistant, outcome.reply));
            }
            Err(error) => {
                // The session stays usable; the failed turn degrades to a
                // visible error reply and a log entry.
                log::error!("turn failed: {error}");
                self.add_message(Message::new(
                    MessageType::System,
                    dispatcher::error_reply(&error),
                ));
            }
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.game_content.push(message);
        self.scroll_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{DEFAULT_API_BASE, DEFAULT_MODEL};

    fn test_app() -> (App, mpsc::UnboundedReceiver<AppCommand>) {
        let ai_client = Arc::new(GameAI::new(
            "test-key".to_string(),
            DEFAULT_API_BASE,
            DEFAULT_MODEL,
            true,
        ));
        // These tests never spawn a turn, so the turn receiver can drop.
        let (turn_sender, _turn_receiver) = mpsc::unbounded_channel();
        App::new(Settings::default(), ai_client, turn_sender)
    }

    #[test]
    fn a_second_submit_is_held_back_until_the_turn_lands() {
        let (mut app, mut commands) = test_app();
        app.state = AppState::InGame;
        app.session = Some(Arc::new(Mutex::new(SessionState::new())));

        app.input = "attack the goblin".to_string();
        app.submit_input();
        assert!(app.is_processing);
        assert!(matches!(
            commands.try_recv(),
            Ok(AppCommand::ProcessMessage(text)) if text == "attack the goblin"
        ));

        // Enter pressed again before the first command is drained: no second
        // turn is enqueued and no second user message is shown.
        app.input = "attack again".to_string();
        app.submit_input();
        assert!(commands.try_recv().is_err());
        let user_messages = app
            .game_content
            .iter()
            .filter(|message| message.message_type == MessageType::User)
            .count();
        assert_eq!(user_messages, 1);
    }

    #[test]
    fn empty_input_claims_nothing() {
        let (mut app, mut commands) = test_app();
        app.state = AppState::InGame;

        app.input = "   ".to_string();
        app.submit_input();
        assert!(!app.is_processing);
        assert!(commands.try_recv().is_err());
    }
}
