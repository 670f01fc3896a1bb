/// Terminal host for the KView mesh viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};
use kview_core::{BaseMesh, MeshModel, Viewer};
use log::info;
use std::io::{self, stdout, Stdout, Write};

pub mod config;
pub mod display;
pub mod panel;
pub mod renderer;

pub use config::{ViewArgs, ViewConfig};
pub use display::{TerminalDisplay, Viewport};
pub use panel::{ControlPanel, PanelAction};
pub use renderer::AsciiRenderer;

/// Window title
pub const TITLE: &str = "3D Viewer: Letter K";

/// Split the terminal into the 3D viewport and the panel on the right,
/// below a one-line title bar
pub fn layout(width: u16, height: u16) -> Viewport {
    Viewport {
        left: 0,
        top: 1,
        width: width.saturating_sub(panel::PANEL_WIDTH).max(1),
        height: height.saturating_sub(1).max(1),
    }
}

/// Run the interactive viewer until the user quits
pub fn run(mesh: BaseMesh, config: &ViewConfig) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = TerminalApp::new(mesh, config).and_then(|mut app| app.main_loop());

    // Cleanup
    terminal::disable_raw_mode()?;
    execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

    result
}

/// Main application struct for the interactive viewer
pub struct TerminalApp {
    viewer: Viewer<TerminalDisplay<Stdout>>,
    panel: ControlPanel,
    size: (u16, u16),
    running: bool,
}

impl TerminalApp {
    /// Set up the viewer, draw the first frame and apply startup commands.
    /// Expects the terminal to be in raw mode on the alternate screen.
    pub fn new(mesh: BaseMesh, config: &ViewConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let display = TerminalDisplay::new(
            stdout(),
            config.style.axis_limits,
            layout(width, height),
            config.color,
        );
        let mut viewer = Viewer::new(MeshModel::new(mesh), config.style.clone(), display)?;
        for &command in &config.startup {
            viewer.apply(command)?;
        }

        let mut app = Self {
            viewer,
            panel: ControlPanel::new(),
            size: (width, height),
            running: true,
        };
        app.draw_chrome()?;
        Ok(app)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        info!("viewer started at {}x{}", self.size.0, self.size.1);

        // Nothing changes between events, so block until the next one
        while self.running {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key)?,
                Event::Resize(width, height) => self.resize(width, height)?,
                _ => {}
            }
        }

        info!("viewer closed after {} redraws", self.viewer.redraw_count());
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> io::Result<()> {
        match self.panel.handle_key(key) {
            Some(PanelAction::Command(command)) => self.viewer.apply(command)?,
            Some(PanelAction::Quit) => self.running = false,
            None => {}
        }
        if self.running {
            self.draw_panel()?;
        }
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.size = (width, height);
        let display = self.viewer.display_mut();
        let writer = display.writer_mut();
        execute!(writer, terminal::Clear(ClearType::All))?;
        display.set_viewport(layout(width, height));
        self.viewer.redraw()?;
        self.draw_chrome()
    }

    /// Title bar and control panel
    fn draw_chrome(&mut self) -> io::Result<()> {
        let width = self.size.0 as usize;
        let title: String = format!("{TITLE:^width$}").chars().take(width).collect();
        let writer = self.viewer.display_mut().writer_mut();
        queue!(
            writer,
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Reverse),
            Print(title),
            SetAttribute(Attribute::Reset)
        )?;
        self.draw_panel()
    }

    fn draw_panel(&mut self) -> io::Result<()> {
        let viewport = self.viewer.display().viewport();
        let left = viewport.left + viewport.width;
        let state = *self.viewer.model().state();
        let writer = self.viewer.display_mut().writer_mut();
        self.panel
            .draw(writer, left, viewport.top, viewport.height, &state)?;
        writer.flush()
    }
}
