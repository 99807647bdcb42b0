use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::game::{GameConfig, GameSession};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Frame cadence, independent of the simulation tick
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive play in the terminal
///
/// Owns the current round and the `running` flag. Key handling and ticks
/// run on the same task, so the session is never touched concurrently.
pub struct HumanMode {
    config: GameConfig,
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    running: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let session = GameSession::new(&config);

        Self {
            config,
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            running: true,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = undo_on_error(enter_terminal(), restore_terminal_modes)?;

        info!(
            grid_size = self.config.grid_size,
            tick_ms = self.config.tick_interval_ms,
            "starting human mode"
        );

        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup runs whether or not the loop failed
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(Duration::from_millis(self.config.tick_interval_ms));
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.running {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => {
                            warn!("terminal event stream closed");
                            self.running = false;
                        }
                    }
                }

                _ = tick_timer.tick() => {
                    self.tick();
                }

                _ = render_timer.tick() => {
                    self.metrics.observe(&self.session);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.running = false;
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self
                .input_handler
                .handle_key_event(key, self.session.status());
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => {
                if !self.session.steer(direction) {
                    debug!(?direction, "ignored reversing turn");
                }
            }
            KeyAction::Restart => self.start_new_session(),
            KeyAction::Quit => self.running = false,
            KeyAction::None => {}
        }
    }

    /// Advance the round by one step while it is still active
    fn tick(&mut self) {
        if !self.session.is_active() {
            return;
        }

        self.session.update();
        self.metrics.observe(&self.session);
    }

    /// Discard the finished round and start a fresh one
    fn start_new_session(&mut self) {
        if self.session.is_active() {
            return;
        }

        self.session = GameSession::new(&self.config);
        self.metrics.on_new_session();
        info!(games_played = self.metrics.games_played, "new round");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Alternate screen, hidden cursor and a cleared ratatui terminal on stderr
fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Leave raw mode and the alternate screen without a live `Terminal`
fn restore_terminal_modes() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(stderr(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    Ok(())
}

/// Run `undo` if `result` failed, keeping the original error
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce() -> Result<()>) -> Result<T> {
    if result.is_err() {
        if let Err(err) = undo() {
            warn!(error = %err, "failed to restore terminal after setup error");
        }
    }
    result
}
