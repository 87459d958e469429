use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use overlay_wm::components::FormsheetPanel;
use overlay_wm::drivers::{ConsoleDriver, InputDriver};
use overlay_wm::keybindings::{Action, KeyBindings};
use overlay_wm::runner::{OverlayApp, RunnerError, run_app};
use overlay_wm::ui::UiFrame;
use overlay_wm::window::{
    FormsheetFrame, OverlayConfig, OverlayStack, ParentHandle, ParentSurface,
};
use overlay_wm::{theme, tracing_sub};

const HELP: &str = indoc! {"
    f  present a formsheet over the host
    a  present a centered alert sheet
    t  toggle entrance/exit animation
    Esc or click outside  dismiss the top sheet
    Ctrl+Q  quit
"};

#[derive(Parser, Debug)]
#[command(
    name = "overlay-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Formsheet overlay demo host"
)]
struct Cli {
    /// UI loop poll interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Present and dismiss sheets without animation.
    #[arg(long)]
    no_animation: bool,
}

fn main() -> Result<(), RunnerError> {
    let cli = Cli::parse();
    tracing_sub::init_default();

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut driver = ConsoleDriver::new();
    driver.set_mouse_capture(true)?;

    let mut app = App::new(!cli.no_animation);
    let result = run_app(
        &mut terminal,
        &mut driver,
        &mut app,
        Duration::from_millis(cli.tick_ms.max(1)),
    );

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        event::DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

struct HostScreen {
    area: Rect,
    status: String,
}

impl ParentSurface for HostScreen {
    fn screen(&self) -> Rect {
        self.area
    }

    fn focus_restored(&mut self) {
        self.status = "focus returned to host".to_string();
    }
}

struct App {
    overlays: OverlayStack,
    host: Rc<RefCell<HostScreen>>,
    bindings: KeyBindings,
    animate: bool,
    presented: usize,
}

impl App {
    fn new(animate: bool) -> Self {
        Self {
            overlays: OverlayStack::new(),
            host: Rc::new(RefCell::new(HostScreen {
                area: Rect::default(),
                status: "no overlays yet".to_string(),
            })),
            bindings: KeyBindings::default(),
            animate,
            presented: 0,
        }
    }

    fn parent_handle(&self) -> ParentHandle {
        let surface: Rc<RefCell<dyn ParentSurface>> = self.host.clone();
        Rc::downgrade(&surface)
    }

    fn present_formsheet(&mut self) {
        self.presented += 1;
        let panel = FormsheetPanel::new(
            format!(" Formsheet #{} ", self.presented),
            "Press Esc (or click outside the sheet) to dismiss.\n\
             Press f again to stack another sheet on top.",
        );
        self.overlays.present(
            self.parent_handle(),
            Box::new(panel),
            FormsheetFrame::Percent {
                width: 70,
                height: 60,
            },
            OverlayConfig::default(),
            self.animate,
        );
        self.host.borrow_mut().status = format!("presented formsheet #{}", self.presented);
    }

    fn present_alert(&mut self) {
        self.presented += 1;
        let panel = FormsheetPanel::new(
            " Alert ",
            "Something noteworthy happened.\nEsc dismisses this sheet.",
        );
        self.overlays.present(
            self.parent_handle(),
            Box::new(panel),
            FormsheetFrame::Centered {
                width: 44,
                height: 7,
            },
            OverlayConfig {
                // Alerts pop rather than slide.
                slide_rows: 2,
                ..OverlayConfig::default()
            },
            self.animate,
        );
        self.host.borrow_mut().status = format!("presented alert #{}", self.presented);
    }
}

impl OverlayApp for App {
    fn overlays(&mut self) -> &mut OverlayStack {
        &mut self.overlays
    }

    fn render_host(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        // The host screen tracks the terminal so live overlays follow a
        // resize on their next render.
        self.host.borrow_mut().area = area;

        let block = Block::default()
            .title(" overlay-wm demo host ")
            .borders(Borders::ALL)
            .style(Style::default().bg(theme::host_bg()).fg(theme::host_fg()));
        let body = format!(
            "{}\nactive overlays: {}   animation: {}",
            HELP,
            self.overlays.manager().len(),
            if self.animate { "on" } else { "off" },
        );
        frame.render_widget(Paragraph::new(body).block(block), area);

        if area.height > 2 {
            let status_area = Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
                height: 1,
            };
            let host = self.host.borrow();
            let status = Paragraph::new(host.status.as_str()).style(
                Style::default()
                    .bg(theme::status_bg())
                    .fg(theme::status_fg()),
            );
            frame.render_widget(status, status_area);
        }
    }

    fn handle_host_event(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match self.bindings.action_for_key(key) {
            Some(Action::PresentFormsheet) => {
                self.present_formsheet();
                true
            }
            Some(Action::PresentAlert) => {
                self.present_alert();
                true
            }
            Some(Action::ToggleAnimation) => {
                self.animate = !self.animate;
                true
            }
            _ => false,
        }
    }

    fn should_quit(&mut self, event: Option<&Event>) -> bool {
        matches!(
            event,
            Some(Event::Key(key)) if self.bindings.matches(Action::Quit, key)
        )
    }
}
