//! Terminal front end for the terrain generator using ratatui
//!
//! A ticker thread scrolls the shared generator at a fixed rate while the UI thread redraws the
//! latest snapshot and handles keys. SPACE pauses, R resets, Q / Esc quits.

use std::error::Error;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::info;

use runner_terrain::sampler::SegmentSampler;
use runner_terrain::segment::SegmentType;
use runner_terrain::shared::{SharedTerrain, TerrainSnapshot};

/// How long the UI waits for a key before redrawing
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Colors for a segment glyph (foreground, background)
fn segment_colors(kind: SegmentType) -> (Color, Color) {
    match kind {
        SegmentType::Ground | SegmentType::SlopeUp | SegmentType::SlopeDown => (Color::Green, Color::Reset),
        SegmentType::Cavity => (Color::Red, Color::DarkGray),
        SegmentType::Spike => (Color::Yellow, Color::Reset),
    }
}

/// Flags shared between the UI and the ticker thread
#[derive(Clone, Default)]
struct RunFlags {
    paused: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
}

impl RunFlags {
    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::Relaxed)
    }

    fn should_quit(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    fn request_quit(&self) {
        self.quit.store(true, Ordering::Relaxed);
    }
}

fn spawn_ticker<S>(terrain: SharedTerrain<S>, flags: RunFlags, tick: Duration) -> JoinHandle<()>
where
    S: SegmentSampler + Send + 'static,
{
    thread::spawn(move || {
        while !flags.should_quit() {
            if !flags.is_paused() {
                terrain.advance();
            }
            wait_tick(&flags, tick);
        }
    })
}

/// Sleep for one tick in short slices so a quit request is seen within `INPUT_POLL`.
fn wait_tick(flags: &RunFlags, tick: Duration) {
    let deadline = Instant::now() + tick;
    loop {
        let now = Instant::now();
        if flags.should_quit() || now >= deadline {
            return;
        }
        thread::sleep((deadline - now).min(INPUT_POLL));
    }
}

/// UI state
struct Runner<S> {
    terrain: SharedTerrain<S>,
    flags: RunFlags,
    seed: u64,
    tick: Duration,
    /// Message to display temporarily
    message: Option<String>,
}

impl<S: SegmentSampler> Runner<S> {
    fn render_strip(&self, snapshot: &TerrainSnapshot, area: Rect, buf: &mut Buffer) {
        for (x, segment) in snapshot.segments.iter().enumerate() {
            let row = segment.glyph_row();
            if row < 0 || x as u16 >= area.width || row as u16 >= area.height {
                continue;
            }

            let (fg, bg) = segment_colors(segment.kind);
            buf.get_mut(area.x + x as u16, area.y + row as u16)
                .set_char(segment.kind.glyph())
                .set_style(Style::default().fg(fg).bg(bg));
        }
    }

    fn render_paused(&self, area: Rect, buf: &mut Buffer) {
        let text = "Paused. Press SPACE to resume...";
        if area.height < 3 || area.width < 4 {
            return;
        }
        let width = (text.len() as u16 + 4).min(area.width);
        let popup = Rect::new(area.x, area.y, width, 3);

        Clear.render(popup, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::DarkGray));
        let inner = block.inner(popup);
        block.render(popup, buf);
        buf.set_string(inner.x + 1, inner.y, text, Style::default().fg(Color::White));
    }

    fn status_line(&self, snapshot: &TerrainSnapshot) -> String {
        let state = if self.flags.is_paused() { "PAUSED" } else { "RUNNING" };
        let msg_str = self.message.as_ref().map(|m| format!(" | {}", m)).unwrap_or_default();
        format!(
            " Seed {} | Tick {} | {} | {}ms{} | SPACE:Pause  R:Reset  Q:Quit",
            self.seed,
            snapshot.ticks,
            state,
            self.tick.as_millis(),
            msg_str,
        )
    }
}

/// Run the interactive terminal loop until the user quits.
pub fn run_terminal<S>(terrain: SharedTerrain<S>, seed: u64, tick: Duration) -> Result<(), Box<dyn Error>>
where
    S: SegmentSampler + Send + 'static,
{
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let flags = RunFlags::default();
    let ticker = spawn_ticker(terrain.clone(), flags.clone(), tick);
    let mut runner = Runner {
        terrain,
        flags,
        seed,
        tick,
        message: None,
    };

    let result = event_loop(&mut terminal, &mut runner);

    // Cleanup runs even when the loop failed
    runner.flags.request_quit();
    let _ = ticker.join();
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;

    if result.is_ok() {
        println!("Exiting... Goodbye!");
    }
    result
}

fn event_loop<S: SegmentSampler>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    runner: &mut Runner<S>,
) -> Result<(), Box<dyn Error>> {
    loop {
        let snapshot = runner.terrain.snapshot();

        terminal.draw(|f| {
            let size = f.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            runner.render_strip(&snapshot, chunks[0], f.buffer_mut());
            if runner.flags.is_paused() {
                runner.render_paused(chunks[0], f.buffer_mut());
            }

            let status = Paragraph::new(runner.status_line(&snapshot))
                .style(Style::default().bg(Color::DarkGray).fg(Color::White));
            f.render_widget(status, chunks[1]);
        })?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                runner.message = None;

                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => {
                        let paused = runner.flags.toggle_pause();
                        info!(paused, "pause toggled");
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        runner.terrain.initialize();
                        runner.message = Some("Terrain reset".to_string());
                        info!("terrain reset");
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_pause_reports_new_state() {
        let flags = RunFlags::default();
        assert!(!flags.is_paused());
        assert!(flags.toggle_pause());
        assert!(flags.is_paused());
        assert!(!flags.toggle_pause());
        assert!(!flags.is_paused());
    }

    #[test]
    fn test_ticker_quits_without_waiting_full_tick() {
        use runner_terrain::config::TerrainConfig;
        use runner_terrain::generator::SeededGenerator;

        let terrain = SharedTerrain::new(SeededGenerator::seeded(TerrainConfig::default(), 3).unwrap());
        let flags = RunFlags::default();
        let ticker = spawn_ticker(terrain.clone(), flags.clone(), Duration::from_secs(60));

        let start = Instant::now();
        flags.request_quit();
        ticker.join().unwrap();
        assert!(start.elapsed() < Duration::from_secs(5), "quit took {:?}", start.elapsed());
        assert!(terrain.snapshot().ticks <= 1);
    }

    #[test]
    fn test_paused_ticker_does_not_advance() {
        use runner_terrain::config::TerrainConfig;
        use runner_terrain::generator::SeededGenerator;

        let terrain = SharedTerrain::new(SeededGenerator::seeded(TerrainConfig::default(), 3).unwrap());
        let flags = RunFlags::default();
        flags.toggle_pause();
        let ticker = spawn_ticker(terrain.clone(), flags.clone(), Duration::from_millis(1));

        thread::sleep(Duration::from_millis(30));
        flags.request_quit();
        ticker.join().unwrap();
        assert_eq!(terrain.snapshot().ticks, 0);
    }

    #[test]
    fn test_cavity_colors_stand_out() {
        assert_eq!(segment_colors(SegmentType::Cavity), (Color::Red, Color::DarkGray));
        assert_eq!(segment_colors(SegmentType::Spike).0, Color::Yellow);
        assert_eq!(segment_colors(SegmentType::SlopeDown).0, Color::Green);
    }
}
