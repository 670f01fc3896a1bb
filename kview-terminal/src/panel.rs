/// Right-docked control panel: shift inputs and the command buttons
use crossterm::{
    cursor,
    event::{KeyCode, KeyEvent, KeyModifiers},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    QueueableCommand,
};
use kview_core::{parse_number, AffineState, Command, InputError, SCALE_DOWN, SCALE_UP};
use log::debug;
use std::io::{self, Write};

/// Columns taken by the panel, border included
pub const PANEL_WIDTH: u16 = 30;

const FIELD_NAMES: [&str; 3] = ["shift x", "shift y", "shift z"];
const FIELD_LABELS: [&str; 3] = ["Shift X:", "Shift Y:", "Shift Z:"];
const FIELD_WIDTH: usize = 12;

const HELP: [&str; 4] = [
    "Tab/arrows: move focus",
    "Enter/Space: activate",
    "F2 shift  F3 +  F4 -",
    "F5 reset  Esc quit",
];

/// Focusable widgets, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    ShiftX,
    ShiftY,
    ShiftZ,
    ShiftButton,
    ScaleUp,
    ScaleDown,
    Reset,
}

impl Widget {
    const ORDER: [Widget; 7] = [
        Widget::ShiftX,
        Widget::ShiftY,
        Widget::ShiftZ,
        Widget::ShiftButton,
        Widget::ScaleUp,
        Widget::ScaleDown,
        Widget::Reset,
    ];

    fn field(self) -> Option<usize> {
        match self {
            Widget::ShiftX => Some(0),
            Widget::ShiftY => Some(1),
            Widget::ShiftZ => Some(2),
            _ => None,
        }
    }
}

/// What the host should do after a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    Command(Command),
    Quit,
}

pub struct ControlPanel {
    fields: [String; 3],
    focus: usize,
    status: Option<String>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            fields: [String::new(), String::new(), String::new()],
            focus: 0,
            status: None,
        }
    }

    pub fn focus(&self) -> Widget {
        Widget::ORDER[self.focus]
    }

    pub fn field_text(&self, axis: usize) -> &str {
        &self.fields[axis]
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PanelAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(PanelAction::Quit);
        }

        match key.code {
            KeyCode::Esc => Some(PanelAction::Quit),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % Widget::ORDER.len();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + Widget::ORDER.len() - 1) % Widget::ORDER.len();
                None
            }
            KeyCode::F(2) => self.shift_command(),
            KeyCode::F(3) => self.issue(Command::Scale(SCALE_UP)),
            KeyCode::F(4) => self.issue(Command::Scale(SCALE_DOWN)),
            KeyCode::F(5) => self.issue(Command::Reset),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Backspace => {
                if let Some(field) = self.focus().field() {
                    self.fields[field].pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.focus().field() {
                    if is_number_char(c) && self.fields[field].len() < FIELD_WIDTH {
                        self.fields[field].push(c);
                    }
                }
                None
            }
            _ => None,
        }
    }

    fn activate(&mut self) -> Option<PanelAction> {
        match self.focus() {
            Widget::ShiftX | Widget::ShiftY | Widget::ShiftZ | Widget::ShiftButton => {
                self.shift_command()
            }
            Widget::ScaleUp => self.issue(Command::Scale(SCALE_UP)),
            Widget::ScaleDown => self.issue(Command::Scale(SCALE_DOWN)),
            Widget::Reset => self.issue(Command::Reset),
        }
    }

    /// Read the three inputs. Any invalid one cancels the shift.
    fn shift_command(&mut self) -> Option<PanelAction> {
        match self.read_fields() {
            Ok([dx, dy, dz]) => self.issue(Command::shift(dx, dy, dz)),
            Err(e) => {
                debug!("shift rejected: {e}");
                self.status = Some(e.to_string());
                None
            }
        }
    }

    fn read_fields(&self) -> Result<[f32; 3], InputError> {
        let mut values = [0.0; 3];
        for (i, value) in values.iter_mut().enumerate() {
            *value = parse_number(FIELD_NAMES[i], &self.fields[i])?;
        }
        Ok(values)
    }

    fn issue(&mut self, command: Command) -> Option<PanelAction> {
        self.status = None;
        Some(PanelAction::Command(command))
    }

    /// Queue the panel at column `left`, rows `top..top + height`
    pub fn draw<W: Write>(
        &self,
        writer: &mut W,
        left: u16,
        top: u16,
        height: u16,
        state: &AffineState,
    ) -> io::Result<()> {
        let inner = PANEL_WIDTH as usize - 2;
        let mut rows: Vec<(String, Option<Color>, bool)> = Vec::new();

        rows.push(("Control Panel".to_string(), Some(Color::Yellow), false));
        rows.push((String::new(), None, false));
        for (i, label) in FIELD_LABELS.iter().enumerate() {
            let text = format!("{label} [{:<width$}]", self.fields[i], width = FIELD_WIDTH);
            rows.push((text, None, self.focus == i));
        }
        rows.push(("[ Shift ]".to_string(), None, self.focus() == Widget::ShiftButton));
        rows.push((String::new(), None, false));
        rows.push(("[ Scale + ]".to_string(), None, self.focus() == Widget::ScaleUp));
        rows.push(("[ Scale - ]".to_string(), None, self.focus() == Widget::ScaleDown));
        rows.push(("[ Reset ]".to_string(), None, self.focus() == Widget::Reset));
        rows.push((String::new(), None, false));

        let t = state.translation;
        rows.push((format!("scale  {:.3}", state.scale), Some(Color::DarkGrey), false));
        rows.push((
            format!("offset {:.2} {:.2} {:.2}", t.x, t.y, t.z),
            Some(Color::DarkGrey),
            false,
        ));
        rows.push((String::new(), None, false));
        if let Some(status) = &self.status {
            rows.push((status.clone(), Some(Color::Red), false));
            rows.push((String::new(), None, false));
        }
        for line in HELP {
            rows.push((line.to_string(), Some(Color::DarkGrey), false));
        }

        for y in 0..height {
            writer.queue(cursor::MoveTo(left, top + y))?;
            writer.queue(SetForegroundColor(Color::DarkGrey))?;
            writer.queue(Print('|'))?;
            writer.queue(ResetColor)?;
            writer.queue(Print(' '))?;

            let (text, color, focused) = rows
                .get(y as usize)
                .cloned()
                .unwrap_or((String::new(), None, false));
            let text: String = text.chars().take(inner).collect();
            if let Some(color) = color {
                writer.queue(SetForegroundColor(color))?;
            }
            if focused {
                writer.queue(SetAttribute(Attribute::Reverse))?;
            }
            writer.queue(Print(format!("{text:<inner$}")))?;
            writer.queue(SetAttribute(Attribute::Reset))?;
            writer.queue(ResetColor)?;
        }
        Ok(())
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}
