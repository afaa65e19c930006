//! TUI application model (Elm architecture).

use std::io;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event::DisableMouseCapture, event::EnableMouseCapture, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;

use sentiview_core::{Command, DemoState, Session};

use crate::donut::render_donut;
use crate::footer::render_footer;
use crate::gauge::render_confidence;
use crate::header::render_header;
use crate::heatmap::render_heatmap;
use crate::input::render_input;
use crate::keymap::{map_key, Focus, KeyAction};
use crate::logs::{render_logs, LogScrollState};
use crate::messages::AppMessage;
use crate::tiles::{render_catalog, PANE_COUNT};

/// Keep only this many activity log entries.
const LOG_CAP: usize = 500;

/// Loading indicator frames shown in the input panel title.
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// TUI application state (Elm Model).
pub struct DashApp {
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Which panel receives keyboard input.
    pub focus: Focus,
    /// Selected cell in the token strip.
    pub selected_token: usize,
    /// Selected catalog pane.
    pub selected_pane: usize,
    /// Activity log lines.
    pub logs: Vec<String>,
    /// Scroll state of the activity log.
    pub log_scroll: LogScrollState,
    /// Whether the activity log panel is shown.
    pub show_logs: bool,
    /// Terminal width.
    pub terminal_width: u16,
    /// Terminal height.
    pub terminal_height: u16,
    /// Intent layer owning the dashboard state.
    session: Session,
    /// Edit position in the input text, in characters.
    cursor: usize,
    /// Current loading-spinner frame.
    spinner_frame: usize,
    /// Completion receiver fed by the worker.
    rx: Receiver<AppMessage>,
    /// Command sender draining into the worker.
    cmd_tx: Sender<Command>,
}

impl DashApp {
    /// Create a new dashboard app.
    #[must_use]
    pub fn new(rx: Receiver<AppMessage>, cmd_tx: Sender<Command>) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Input,
            selected_token: 0,
            selected_pane: 0,
            logs: Vec::new(),
            log_scroll: LogScrollState::new(),
            show_logs: true,
            terminal_width: 80,
            terminal_height: 24,
            session: Session::new(),
            cursor: 0,
            spinner_frame: 0,
            rx,
            cmd_tx,
        }
    }

    /// Read access to the dashboard state for rendering and tests.
    #[must_use]
    pub fn state(&self) -> &DemoState {
        self.session.state()
    }

    /// Current edit position in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Dispatch the startup fetches (classes, status, catalog).
    pub fn start(&mut self) {
        for cmd in self.session.startup() {
            self.dispatch(cmd);
        }
    }

    /// Update the model with incoming messages (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::PredictDone(outcome) => {
                self.session.predict_resolved(outcome);
                self.clamp_selection();
            }
            AppMessage::MaskDone(outcome) => {
                self.session.mask_resolved(outcome);
            }
            AppMessage::ExampleDone(outcome) => {
                if let Some(cmd) = self.session.example_resolved(outcome) {
                    self.dispatch(cmd);
                }
                self.cursor = self.state().input.text.chars().count();
            }
            AppMessage::ClassesDone(outcome) => {
                self.session.classes_resolved(outcome);
            }
            AppMessage::StatusDone(outcome) => {
                self.session.status_resolved(outcome);
            }
            AppMessage::DatasetsDone(datasets) => {
                self.session.datasets_resolved(datasets);
            }
            AppMessage::ModelsDone(models) => {
                self.session.models_resolved(models);
            }
            AppMessage::ResultsDone(results) => {
                self.session.results_resolved(results);
            }
            AppMessage::Log(line) => {
                self.push_log(line);
            }
            AppMessage::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit | KeyAction::Cancel => {
                self.should_quit = true;
            }
            KeyAction::CycleFocus => {
                self.focus = self.focus.next();
            }
            KeyAction::InsertChar(c) => {
                let mut text = self.state().input.text.clone();
                text.insert(byte_index(&text, self.cursor), c);
                self.session.set_input_text(text);
                self.cursor += 1;
            }
            KeyAction::Backspace => {
                if self.cursor > 0 {
                    let mut text = self.state().input.text.clone();
                    text.remove(byte_index(&text, self.cursor - 1));
                    self.session.set_input_text(text);
                    self.cursor -= 1;
                }
            }
            KeyAction::DeleteChar => {
                let mut text = self.state().input.text.clone();
                if self.cursor < text.chars().count() {
                    text.remove(byte_index(&text, self.cursor));
                    self.session.set_input_text(text);
                }
            }
            KeyAction::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyAction::CursorRight => {
                let len = self.state().input.text.chars().count();
                self.cursor = (self.cursor + 1).min(len);
            }
            KeyAction::CursorHome => {
                self.cursor = 0;
            }
            KeyAction::CursorEnd => {
                self.cursor = self.state().input.text.chars().count();
            }
            KeyAction::Submit => {
                if let Some(cmd) = self.session.submit() {
                    self.dispatch(cmd);
                }
            }
            KeyAction::SelectLeft => match self.focus {
                Focus::Tokens => {
                    self.selected_token = self.selected_token.saturating_sub(1);
                }
                _ => {
                    self.selected_pane = (self.selected_pane + PANE_COUNT - 1) % PANE_COUNT;
                }
            },
            KeyAction::SelectRight => match self.focus {
                Focus::Tokens => {
                    self.selected_token += 1;
                    self.clamp_selection();
                }
                _ => {
                    self.selected_pane = (self.selected_pane + 1) % PANE_COUNT;
                }
            },
            KeyAction::ToggleToken => {
                if self.state().predictions.prediction.is_some() {
                    self.session.toggle_token(self.selected_token);
                    if let Some(cmd) = self.session.recompute_with_mask() {
                        self.dispatch(cmd);
                    }
                }
            }
            KeyAction::LoadExample => {
                let cmd = self.session.load_example();
                self.dispatch(cmd);
            }
            KeyAction::Refresh => {
                self.dispatch(Command::FetchStatus);
                self.dispatch(Command::FetchCatalog);
            }
            KeyAction::ToggleLogs => {
                self.show_logs = !self.show_logs;
            }
            KeyAction::ScrollUp => {
                self.log_scroll.scroll_up();
            }
            KeyAction::ScrollDown => {
                self.log_scroll.scroll_down(self.logs.len());
            }
            KeyAction::PageUp => {
                self.log_scroll.page_up(10);
            }
            KeyAction::PageDown => {
                self.log_scroll.page_down(10, self.logs.len());
            }
            KeyAction::Home => {
                self.log_scroll.home();
            }
            KeyAction::End => {
                self.log_scroll.end(self.logs.len());
            }
            KeyAction::None => {}
        }
    }

    /// Send a command to the worker.
    fn dispatch(&mut self, cmd: Command) {
        tracing::debug!(?cmd, "dispatch");
        if self.cmd_tx.send(cmd).is_err() {
            self.push_log("[ERROR] command channel closed".to_string());
        }
    }

    /// Append a log line, bounded by [`LOG_CAP`].
    fn push_log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > LOG_CAP {
            self.logs.remove(0);
            if self.log_scroll.offset > 0 {
                self.log_scroll.offset -= 1;
            }
        }
        self.log_scroll.on_new_message(self.logs.len());
    }

    /// Keep the token selection inside the current token strip.
    fn clamp_selection(&mut self) {
        let len = self
            .state()
            .predictions
            .prediction
            .as_ref()
            .map_or(0, |p| p.tokens.len());
        self.selected_token = self.selected_token.min(len.saturating_sub(1));
    }

    /// Compute the outer layout.
    ///
    /// Returns (header, main, footer) rects.
    #[must_use]
    pub fn compute_layout(area: Rect) -> (Rect, Rect, Rect) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Min(10),   // main content
                Constraint::Length(2), // footer
            ])
            .split(area);
        (outer[0], outer[1], outer[2])
    }

    /// Split the main area into the editing column and the summary column.
    #[must_use]
    pub fn compute_main_layout(main: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(main);
        (chunks[0], chunks[1])
    }

    /// Split the left column into input bar, heat-map, and catalog tiles.
    #[must_use]
    pub fn compute_left_layout(left: Rect) -> (Rect, Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // input bar + status line
                Constraint::Min(6),    // heat-map
                Constraint::Length(7), // catalog tiles
            ])
            .split(left);
        (chunks[0], chunks[1], chunks[2])
    }

    /// Split the right column into donut, gauge, and (optionally) the log.
    #[must_use]
    pub fn compute_right_layout(right: Rect, show_logs: bool) -> (Rect, Rect, Option<Rect>) {
        if show_logs {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(8),         // donut + legend
                    Constraint::Length(3),      // confidence gauge
                    Constraint::Percentage(35), // activity log
                ])
                .split(right);
            (chunks[0], chunks[1], Some(chunks[2]))
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(8), Constraint::Length(3)])
                .split(right);
            (chunks[0], chunks[1], None)
        }
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let state = self.state();
        let prediction = state.predictions.prediction.as_ref();
        let loading = state.predictions.loading || state.input.loading;
        let spinner = loading.then(|| SPINNER[self.spinner_frame % SPINNER.len()]);

        let (header_area, main_area, footer_area) = Self::compute_layout(frame.area());
        render_header(frame, header_area, &state.status);

        let (left, right) = Self::compute_main_layout(main_area);
        let (input_area, heat_area, tiles_area) = Self::compute_left_layout(left);
        render_input(
            frame,
            input_area,
            state,
            self.cursor,
            self.focus == Focus::Input,
            spinner,
        );
        render_heatmap(
            frame,
            heat_area,
            prediction,
            self.selected_token,
            self.focus == Focus::Tokens,
        );
        render_catalog(
            frame,
            tiles_area,
            &state.catalog,
            self.selected_pane,
            self.focus == Focus::Tiles,
        );

        let (donut_area, gauge_area, logs_area) =
            Self::compute_right_layout(right, self.show_logs);
        render_donut(frame, donut_area, prediction, &state.input.classes);
        render_confidence(frame, gauge_area, prediction);
        if let Some(logs_area) = logs_area {
            render_logs(frame, logs_area, &self.logs, &self.log_scroll);
        }

        render_footer(frame, footer_area, self.focus);
    }

    /// Set up the terminal for TUI mode.
    ///
    /// Returns a configured Terminal or an error.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop.
    ///
    /// This sets up the terminal, runs the main loop (poll events, update,
    /// render), and tears down on exit.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if self.should_quit {
                break;
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key_event) => {
                        let action = map_key(key_event, self.focus);
                        self.handle_key_action(action);
                    }
                    Event::Resize(w, h) => {
                        self.terminal_width = w;
                        self.terminal_height = h;
                    }
                    _ => {}
                }
            } else {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }

            self.update();
        }

        Self::teardown_terminal(&mut terminal)?;
        Ok(())
    }
}

/// Byte offset of the `char_index`-th character, or the end of the string.
fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use ratatui::backend::TestBackend;
    use sentiview_core::{ErrorInfo, Prediction, Sentiment, ServiceStatus, VALIDATION_MESSAGE};

    fn make_app() -> (
        DashApp,
        crossbeam_channel::Sender<AppMessage>,
        crossbeam_channel::Receiver<Command>,
    ) {
        let (msg_tx, msg_rx) = unbounded();
        let (cmd_tx, cmd_rx) = unbounded();
        let app = DashApp::new(msg_rx, cmd_tx);
        (app, msg_tx, cmd_rx)
    }

    fn sample_prediction() -> Prediction {
        Prediction::from_wire(
            vec![
                "Hey".into(),
                ",".into(),
                "I".into(),
                "love".into(),
                "this".into(),
            ],
            vec![0.1, 0.1, 0.2, 0.5, 0.1],
            Sentiment::Positive,
            vec![0.7, 0.2, 0.1],
        )
    }

    fn type_text(app: &mut DashApp, text: &str) {
        for c in text.chars() {
            app.handle_key_action(KeyAction::InsertChar(c));
        }
    }

    #[test]
    fn initial_state() {
        let (app, _tx, _cmd_rx) = make_app();
        assert!(!app.should_quit);
        assert_eq!(app.focus, Focus::Input);
        assert_eq!(app.selected_token, 0);
        assert_eq!(app.cursor(), 0);
        assert!(app.logs.is_empty());
        assert!(app.show_logs);
        assert!(app.state().input.text.is_empty());
    }

    #[test]
    fn start_dispatches_ambient_fetches() {
        let (mut app, _tx, cmd_rx) = make_app();
        app.start();
        let cmds: Vec<Command> = cmd_rx.try_iter().collect();
        assert_eq!(
            cmds,
            vec![Command::FetchClasses, Command::FetchStatus, Command::FetchCatalog]
        );
    }

    #[test]
    fn typing_edits_input_text() {
        let (mut app, _tx, _cmd_rx) = make_app();
        type_text(&mut app, "good day");
        assert_eq!(app.state().input.text, "good day");
        assert_eq!(app.cursor(), 8);
    }

    #[test]
    fn cursor_editing_mid_string() {
        let (mut app, _tx, _cmd_rx) = make_app();
        type_text(&mut app, "god");
        app.handle_key_action(KeyAction::CursorLeft);
        app.handle_key_action(KeyAction::InsertChar('o'));
        assert_eq!(app.state().input.text, "good");
        assert_eq!(app.cursor(), 3);
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let (mut app, _tx, _cmd_rx) = make_app();
        type_text(&mut app, "hey!");
        app.handle_key_action(KeyAction::Backspace);
        assert_eq!(app.state().input.text, "hey");
        assert_eq!(app.cursor(), 3);

        // At the start of the line backspace is a no-op.
        app.handle_key_action(KeyAction::CursorHome);
        app.handle_key_action(KeyAction::Backspace);
        assert_eq!(app.state().input.text, "hey");
    }

    #[test]
    fn delete_removes_at_cursor() {
        let (mut app, _tx, _cmd_rx) = make_app();
        type_text(&mut app, "hey");
        app.handle_key_action(KeyAction::CursorHome);
        app.handle_key_action(KeyAction::DeleteChar);
        assert_eq!(app.state().input.text, "ey");
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn cursor_clamps_to_text_bounds() {
        let (mut app, _tx, _cmd_rx) = make_app();
        type_text(&mut app, "hi");
        app.handle_key_action(KeyAction::CursorRight);
        assert_eq!(app.cursor(), 2);
        app.handle_key_action(KeyAction::CursorHome);
        app.handle_key_action(KeyAction::CursorLeft);
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn multibyte_text_edits_on_char_boundaries() {
        let (mut app, _tx, _cmd_rx) = make_app();
        type_text(&mut app, "héllo");
        app.handle_key_action(KeyAction::Backspace);
        assert_eq!(app.state().input.text, "héll");
    }

    #[test]
    fn submit_dispatches_predict_command() {
        let (mut app, _tx, cmd_rx) = make_app();
        type_text(&mut app, "good day");
        app.handle_key_action(KeyAction::Submit);
        assert_eq!(
            cmd_rx.try_recv(),
            Ok(Command::Predict {
                text: "good day".into()
            })
        );
        assert!(app.state().predictions.loading);
    }

    #[test]
    fn submit_empty_shows_validation_error_without_command() {
        let (mut app, _tx, cmd_rx) = make_app();
        app.handle_key_action(KeyAction::Submit);
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(
            app.state().predictions.error.as_ref().unwrap().message,
            VALIDATION_MESSAGE
        );
    }

    #[test]
    fn predict_done_routes_into_state() {
        let (mut app, tx, _cmd_rx) = make_app();
        tx.send(AppMessage::PredictDone(Ok(sample_prediction())))
            .unwrap();
        app.update();
        assert!(app.state().predictions.prediction.is_some());
    }

    #[test]
    fn predict_done_clamps_token_selection() {
        let (mut app, tx, _cmd_rx) = make_app();
        app.selected_token = 42;
        tx.send(AppMessage::PredictDone(Ok(sample_prediction())))
            .unwrap();
        app.update();
        assert_eq!(app.selected_token, 4);
    }

    #[test]
    fn toggle_dispatches_masked_recompute() {
        let (mut app, tx, cmd_rx) = make_app();
        type_text(&mut app, "Hey, I love this");
        tx.send(AppMessage::PredictDone(Ok(sample_prediction())))
            .unwrap();
        app.update();

        app.focus = Focus::Tokens;
        app.selected_token = 2;
        app.handle_key_action(KeyAction::ToggleToken);

        match cmd_rx.try_recv() {
            Ok(Command::PredictMasked { text, tokens }) => {
                assert_eq!(text, "Hey, I love this");
                assert_eq!(tokens, vec!["Hey", ",", "", "love", "this"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn toggle_without_prediction_is_noop() {
        let (mut app, _tx, cmd_rx) = make_app();
        app.focus = Focus::Tokens;
        app.handle_key_action(KeyAction::ToggleToken);
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn mask_done_splices_weights() {
        let (mut app, tx, _cmd_rx) = make_app();
        tx.send(AppMessage::PredictDone(Ok(sample_prediction())))
            .unwrap();
        app.update();
        app.focus = Focus::Tokens;
        app.selected_token = 2;
        app.handle_key_action(KeyAction::ToggleToken);

        tx.send(AppMessage::MaskDone(Ok(sentiview_core::MaskedScores {
            attention_weights: vec![0.1, 0.2, 0.3, 0.4],
            label: Sentiment::Positive,
            probs: vec![0.7, 0.2, 0.1],
        })))
        .unwrap();
        app.update();

        let pred = app.state().predictions.prediction.as_ref().unwrap();
        assert_eq!(pred.attention_weights, vec![0.1, 0.2, 0.0, 0.3, 0.4]);
    }

    #[test]
    fn example_done_chains_into_predict() {
        let (mut app, tx, cmd_rx) = make_app();
        tx.send(AppMessage::ExampleDone(Ok("sample tweet".into())))
            .unwrap();
        app.update();

        assert_eq!(app.state().input.text, "sample tweet");
        assert_eq!(app.cursor(), "sample tweet".chars().count());
        assert_eq!(
            cmd_rx.try_recv(),
            Ok(Command::Predict {
                text: "sample tweet".into()
            })
        );
    }

    #[test]
    fn load_example_dispatches_fetch() {
        let (mut app, _tx, cmd_rx) = make_app();
        app.handle_key_action(KeyAction::LoadExample);
        assert_eq!(cmd_rx.try_recv(), Ok(Command::FetchExample));
        assert!(app.state().input.loading);
    }

    #[test]
    fn status_done_flips_online_flag() {
        let (mut app, tx, _cmd_rx) = make_app();
        tx.send(AppMessage::StatusDone(Ok(ServiceStatus {
            load: 0.5,
            model: "lstm-attention".into(),
            graphics_card: "RTX 2080".into(),
            memory_usage: 512,
        })))
        .unwrap();
        app.update();
        assert!(app.state().status.online);

        tx.send(AppMessage::StatusDone(Err(ErrorInfo::for_text(
            -1,
            "connection refused",
            "",
        ))))
        .unwrap();
        app.update();
        assert!(!app.state().status.online);
    }

    #[test]
    fn log_messages_append_and_cap() {
        let (mut app, _tx, _cmd_rx) = make_app();
        for i in 0..510 {
            app.handle_message(AppMessage::Log(format!("line {i}")));
        }
        assert_eq!(app.logs.len(), 500);
        assert_eq!(app.logs[0], "line 10");
    }

    #[test]
    fn quit_paths() {
        let (mut app, _tx, _cmd_rx) = make_app();
        app.handle_key_action(KeyAction::Quit);
        assert!(app.should_quit);

        let (mut app, _tx, _cmd_rx) = make_app();
        app.handle_key_action(KeyAction::Cancel);
        assert!(app.should_quit);
    }

    #[test]
    fn quit_message_stops_the_app() {
        let (mut app, tx, _cmd_rx) = make_app();
        tx.send(AppMessage::Quit).unwrap();
        app.update();
        assert!(app.should_quit);
    }

    #[test]
    fn focus_cycles_with_tab() {
        let (mut app, _tx, _cmd_rx) = make_app();
        app.handle_key_action(KeyAction::CycleFocus);
        assert_eq!(app.focus, Focus::Tokens);
        app.handle_key_action(KeyAction::CycleFocus);
        assert_eq!(app.focus, Focus::Tiles);
        app.handle_key_action(KeyAction::CycleFocus);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn token_selection_moves_and_clamps() {
        let (mut app, tx, _cmd_rx) = make_app();
        tx.send(AppMessage::PredictDone(Ok(sample_prediction())))
            .unwrap();
        app.update();
        app.focus = Focus::Tokens;

        for _ in 0..10 {
            app.handle_key_action(KeyAction::SelectRight);
        }
        assert_eq!(app.selected_token, 4);

        app.handle_key_action(KeyAction::SelectLeft);
        assert_eq!(app.selected_token, 3);
    }

    #[test]
    fn pane_selection_wraps() {
        let (mut app, _tx, _cmd_rx) = make_app();
        app.focus = Focus::Tiles;
        app.handle_key_action(KeyAction::SelectLeft);
        assert_eq!(app.selected_pane, 2);
        app.handle_key_action(KeyAction::SelectRight);
        assert_eq!(app.selected_pane, 0);
    }

    #[test]
    fn refresh_refetches_status_and_catalog() {
        let (mut app, _tx, cmd_rx) = make_app();
        app.handle_key_action(KeyAction::Refresh);
        let cmds: Vec<Command> = cmd_rx.try_iter().collect();
        assert_eq!(cmds, vec![Command::FetchStatus, Command::FetchCatalog]);
    }

    #[test]
    fn toggle_logs_panel() {
        let (mut app, _tx, _cmd_rx) = make_app();
        assert!(app.show_logs);
        app.handle_key_action(KeyAction::ToggleLogs);
        assert!(!app.show_logs);
    }

    #[test]
    fn layout_computation() {
        let area = Rect::new(0, 0, 100, 30);
        let (header, main, footer) = DashApp::compute_layout(area);
        assert_eq!(header.height, 3);
        assert_eq!(footer.height, 2);
        assert_eq!(header.height + main.height + footer.height, area.height);

        let (left, right) = DashApp::compute_main_layout(main);
        assert_eq!(left.width + right.width, main.width);

        let (input, heat, tiles) = DashApp::compute_left_layout(left);
        assert_eq!(input.height, 4);
        assert_eq!(tiles.height, 7);
        assert!(heat.height > 0);
    }

    #[test]
    fn right_layout_with_and_without_logs() {
        let right = Rect::new(0, 0, 40, 25);
        let (_, gauge, logs) = DashApp::compute_right_layout(right, true);
        assert_eq!(gauge.height, 3);
        assert!(logs.is_some());

        let (_, _, logs) = DashApp::compute_right_layout(right, false);
        assert!(logs.is_none());
    }

    #[test]
    fn render_full_dashboard() {
        let (mut app, tx, _cmd_rx) = make_app();
        type_text(&mut app, "Hey, I love this");
        tx.send(AppMessage::PredictDone(Ok(sample_prediction())))
            .unwrap();
        tx.send(AppMessage::Log("classified".into())).unwrap();
        app.update();

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    #[test]
    fn render_tiny_terminal_does_not_panic() {
        let (app, _tx, _cmd_rx) = make_app();
        let backend = TestBackend::new(20, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
