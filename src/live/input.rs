use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::config::{KeyBindings, WORLD_HEIGHT, WORLD_WIDTH, matches_binding};
use crate::screen::CANVAS_OFFSET;
use crate::types::{Point, TerminalContract};

pub enum Action {
    Continue,
    Quit,
    TogglePause,
    ToggleFullscreen,
    Resize(u16, u16),
}

/// Which mouse buttons are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl Buttons {
    fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Middle => self.middle = down,
            MouseButton::Right => self.right = down,
        }
    }

    /// `L M R` with a dash for each released button.
    pub fn label(&self) -> String {
        let mark = |held, c| if held { c } else { '-' };
        format!("{} {} {}", mark(self.left, 'L'), mark(self.middle, 'M'), mark(self.right, 'R'))
    }
}

/// Pointer state fed by terminal mouse events.
pub struct Pointer {
    pub position: Point,
    pub buttons: Buttons,
}

impl Pointer {
    pub fn centered() -> Self {
        Pointer {
            position: Point::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0),
            buttons: Buttons::default(),
        }
    }
}

pub fn handle_event(
    event: Event,
    bindings: &KeyBindings,
    contract: TerminalContract,
    pointer: &mut Pointer,
) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&key, bindings),
        Event::Mouse(mouse) => {
            handle_mouse(&mouse, contract, pointer);
            Action::Continue
        }
        Event::Resize(w, h) => Action::Resize(w, h),
        _ => Action::Continue,
    }
}

fn handle_key(key: &KeyEvent, bindings: &KeyBindings) -> Action {
    if matches_binding(&bindings.quit, key) || matches_binding(&bindings.alt_quit, key) {
        Action::Quit
    } else if matches_binding(&bindings.pause, key) {
        Action::TogglePause
    } else if matches_binding(&bindings.fullscreen, key) {
        Action::ToggleFullscreen
    } else {
        Action::Continue
    }
}

fn handle_mouse(mouse: &MouseEvent, contract: TerminalContract, pointer: &mut Pointer) {
    match mouse.kind {
        MouseEventKind::Down(button) => pointer.buttons.set(button, true),
        MouseEventKind::Up(button) => pointer.buttons.set(button, false),
        _ => {}
    }
    if matches!(
        mouse.kind,
        MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)
    ) {
        // Rows above the canvas clamp to its top edge.
        let row = mouse.row.saturating_sub(CANVAS_OFFSET);
        pointer.position = contract.cell_to_world(mouse.column, row, WORLD_WIDTH, WORLD_HEIGHT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    const CONTRACT: TerminalContract = TerminalContract { width: 192, height: 54 };

    #[test]
    fn mouse_motion_moves_pointer_into_world_space() {
        let mut pointer = Pointer::centered();
        let bindings = KeyBindings::default();
        handle_event(mouse(MouseEventKind::Moved, 0, CANVAS_OFFSET), &bindings, CONTRACT, &mut pointer);
        assert!((pointer.position.x - 5.0).abs() < 1e-9);
        assert!((pointer.position.y - 10.0).abs() < 1e-9);

        handle_event(mouse(MouseEventKind::Moved, 191, 54), &bindings, CONTRACT, &mut pointer);
        assert!((pointer.position.x - 1915.0).abs() < 1e-9);
        assert!((pointer.position.y - 1070.0).abs() < 1e-9);
    }

    #[test]
    fn buttons_track_down_and_up() {
        let mut pointer = Pointer::centered();
        let bindings = KeyBindings::default();
        let down = MouseEventKind::Down(MouseButton::Right);
        handle_event(mouse(down, 3, 3), &bindings, CONTRACT, &mut pointer);
        assert_eq!(pointer.buttons, Buttons { left: false, middle: false, right: true });
        assert_eq!(pointer.buttons.label(), "- - R");

        let up = MouseEventKind::Up(MouseButton::Right);
        handle_event(mouse(up, 3, 3), &bindings, CONTRACT, &mut pointer);
        assert_eq!(pointer.buttons, Buttons::default());
    }

    #[test]
    fn keys_map_to_actions() {
        let mut pointer = Pointer::centered();
        let bindings = KeyBindings::default();
        let mut act = |e| handle_event(e, &bindings, CONTRACT, &mut pointer);
        assert!(matches!(act(press(KeyCode::Esc)), Action::Quit));
        assert!(matches!(act(press(KeyCode::Char('q'))), Action::Quit));
        assert!(matches!(act(press(KeyCode::Char(' '))), Action::TogglePause));
        assert!(matches!(act(press(KeyCode::F(11))), Action::ToggleFullscreen));
        assert!(matches!(act(press(KeyCode::Char('x'))), Action::Continue));
        assert!(matches!(act(Event::Resize(80, 24)), Action::Resize(80, 24)));
    }
}
