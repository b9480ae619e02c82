use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Command, GameConfig, TickOutcome};
use crate::input::{InputHandler, KeyAction, SwipeTracker};
use crate::render::{Hud, Renderer, ScreenLayout, food_pulse};
use crate::schedule::{Scheduler, TickTimer};
use crate::session::Session;
use crate::storage::HighScoreStore;

/// Interactive play in the terminal
pub struct HumanMode<S: HighScoreStore> {
    session: Session<S>,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe: SwipeTracker,
    /// Regions from the last drawn frame, used to hit-test pointer input
    layout: ScreenLayout,
    haptics: bool,
    /// Where bell pulses go; the terminal by default
    bell: Box<dyn Write>,
    started_at: Instant,
    should_quit: bool,
}

impl<S: HighScoreStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S, haptics: bool) -> Self {
        let swipe = SwipeTracker::new(config.min_swipe_distance);

        Self {
            session: Session::new(config, store),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swipe,
            layout: ScreenLayout::new(Default::default()),
            haptics,
            bell: Box::new(stderr()),
            started_at: Instant::now(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut timer = TickTimer::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        let size = terminal.size().context("Failed to read terminal size")?;
        self.fit_to_viewport(size.width, size.height);
        info!("Session ready, high score {}", self.session.high_score());

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event, &mut timer)? {
                            self.draw(terminal)?;
                        }
                    }
                }

                // Game logic tick, armed by the session
                _ = timer.fired() => {
                    self.step(&mut timer)?;
                    self.draw(terminal)?;
                    timer.restart();
                }

                // Keep the food pulse animating between ticks
                _ = render_timer.tick() => {
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!("Quitting after {} games", self.session.metrics().games_played);
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.session.metrics_mut().update();
        let pulse = food_pulse(self.started_at.elapsed().as_millis());

        terminal
            .draw(|frame| {
                self.layout = ScreenLayout::new(frame.area());
                let hud = Hud {
                    high_score: self.session.high_score(),
                    metrics: self.session.metrics(),
                    last_game: self.session.last_game(),
                    pulse,
                };
                self.renderer.render(frame, self.session.state(), &hud);
            })
            .context("Failed to draw frame")?;

        Ok(())
    }

    /// Run one scheduled tick and give feedback for its outcome
    fn step(&mut self, scheduler: &mut impl Scheduler) -> Result<TickOutcome> {
        let outcome = self.session.tick(scheduler);
        self.feedback(outcome)?;
        Ok(outcome)
    }

    /// Apply a terminal event. Returns true when the board changed in a way
    /// that must be drawn right away.
    fn handle_event(&mut self, event: Event, scheduler: &mut impl Scheduler) -> Result<bool> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(false);
                }

                let command = match self.input_handler.handle_key_event(key) {
                    KeyAction::GameCommand(command) => command,
                    KeyAction::Confirm if self.session.state().is_over() => Command::PlayAgain,
                    KeyAction::Confirm => Command::Start,
                    KeyAction::Quit => {
                        self.should_quit = true;
                        return Ok(false);
                    }
                    KeyAction::None => return Ok(false),
                };

                let applied = self.session.apply(command, scheduler);
                Ok(applied && !matches!(command, Command::Turn(_)))
            }
            Event::Mouse(mouse) => {
                let pad = self.layout.control_pad();
                if let Some(direction) = self.swipe.handle_mouse_event(mouse, &pad) {
                    if self.session.turn(direction) {
                        self.buzz(1)?;
                    }
                }
                Ok(false)
            }
            Event::Resize(cols, rows) => {
                self.fit_to_viewport(cols, rows);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn fit_to_viewport(&mut self, cols: u16, rows: u16) {
        let tile_count = self.session.config().tile_count_for_viewport(cols, rows);
        debug!("Viewport {}x{} fits {} tiles", cols, rows, tile_count);
        self.session.resize(tile_count);
    }

    fn feedback(&mut self, outcome: TickOutcome) -> Result<()> {
        match outcome {
            TickOutcome::Ate => self.buzz(1),
            outcome if outcome.is_terminal() => self.buzz(2),
            _ => Ok(()),
        }
    }

    /// Ring the terminal bell as a stand-in for vibration
    fn buzz(&mut self, pulses: usize) -> Result<()> {
        if !self.haptics {
            return Ok(());
        }
        self.bell
            .write_all("\x07".repeat(pulses).as_bytes())
            .and_then(|_| self.bell.flush())
            .context("Failed to ring terminal bell")
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
