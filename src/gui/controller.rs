use std::time::Instant;

use kiss3d::event::{Action, Event, Key, MouseButton, WindowEvent};
use nalgebra::{Point2, Vector2};

use crate::model::Command;

// Key config, all in one place
const KEY_PREV_FOCUS: Key = Key::Q;
const KEY_NEXT_FOCUS: Key = Key::E;
const KEY_RELEASE_FOCUS: Key = Key::F;
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_REWIND: Key = Key::R;
const KEY_VIEW_MODE: Key = Key::V;
const KEY_TOGGLE_ORBITS: Key = Key::O;
const KEY_TOGGLE_LIGHTING: Key = Key::L;
const KEY_FOCUS_SLOTS: [Key; 10] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
    Key::Key0,
];

// A press and release closer together than this counts as a click rather than a drag
const CLICK_TOLERANCE_PIXELS: f32 = 3.0;

/// What the user asked for. Some of these need the scene to resolve them into a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    Command(Command),
    /// Move the selection forward or back through the body list.
    CycleFocus(isize),
    /// Pick the body at this position in the body list.
    FocusSlot(usize),
    /// A click (not a drag) at this window position.
    Click(Point2<f32>),
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

pub struct Controller {
    cursor_pos: Point2<f32>,
    press_pos: Option<Point2<f32>>,
    fps_counter: FpsCounter,
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            cursor_pos: Point2::origin(),
            press_pos: None,
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: Event) -> Option<UserInput> {
        self.process_window_event(event.value)
    }

    fn process_window_event(&mut self, event: WindowEvent) -> Option<UserInput> {
        let command = match event {
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor_pos = Point2::new(x as f32, y as f32);
                return None;
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                self.press_pos = Some(self.cursor_pos);
                return None;
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                let pressed_at = self.press_pos.take()?;
                let dragged: Vector2<f32> = self.cursor_pos - pressed_at;
                if dragged.norm() > CLICK_TOLERANCE_PIXELS {
                    return None;
                }
                return Some(UserInput::Click(self.cursor_pos));
            }
            WindowEvent::Key(KEY_NEXT_FOCUS, Action::Press, _) => {
                return Some(UserInput::CycleFocus(1));
            }
            WindowEvent::Key(KEY_PREV_FOCUS, Action::Press, _) => {
                return Some(UserInput::CycleFocus(-1));
            }
            WindowEvent::Key(key, Action::Press, _) if KEY_FOCUS_SLOTS.contains(&key) => {
                let slot = KEY_FOCUS_SLOTS.iter().position(|k| *k == key)?;
                return Some(UserInput::FocusSlot(slot));
            }
            WindowEvent::Key(KEY_RELEASE_FOCUS, Action::Press, _) => Command::Release,
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => Command::ScaleSpeed(2.0),
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => Command::ScaleSpeed(0.5),
            WindowEvent::Key(KEY_REWIND, Action::Press, _) => Command::ReverseSpeed,
            WindowEvent::Key(KEY_VIEW_MODE, Action::Press, _) => Command::ToggleViewMode,
            WindowEvent::Key(KEY_TOGGLE_ORBITS, Action::Press, _) => Command::ToggleOrbits,
            WindowEvent::Key(KEY_TOGGLE_LIGHTING, Action::Press, _) => Command::ToggleLighting,
            _ => return None,
        };
        Some(UserInput::Command(command))
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use kiss3d::event::Modifiers;

    use super::*;

    fn key(key: Key) -> WindowEvent {
        WindowEvent::Key(key, Action::Press, Modifiers::empty())
    }

    fn button(action: Action) -> WindowEvent {
        WindowEvent::MouseButton(MouseButton::Button1, action, Modifiers::empty())
    }

    fn cursor(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorPos(x, y, Modifiers::empty())
    }

    #[test]
    fn test_key_bindings() {
        let mut controller = Controller::new();
        assert_eq!(
            controller.process_window_event(key(Key::O)),
            Some(UserInput::Command(Command::ToggleOrbits))
        );
        assert_eq!(
            controller.process_window_event(key(Key::L)),
            Some(UserInput::Command(Command::ToggleLighting))
        );
        assert_eq!(
            controller.process_window_event(key(Key::E)),
            Some(UserInput::CycleFocus(1))
        );
        assert_eq!(
            controller.process_window_event(key(Key::Key3)),
            Some(UserInput::FocusSlot(2))
        );
        assert_eq!(
            controller.process_window_event(key(Key::Key0)),
            Some(UserInput::FocusSlot(9))
        );
        assert_eq!(controller.process_window_event(key(Key::Z)), None);
    }

    #[test]
    fn test_click_versus_drag() {
        let mut controller = Controller::new();

        controller.process_window_event(cursor(100.0, 200.0));
        assert_eq!(controller.process_window_event(button(Action::Press)), None);
        controller.process_window_event(cursor(101.0, 201.0));
        assert_eq!(
            controller.process_window_event(button(Action::Release)),
            Some(UserInput::Click(Point2::new(101.0, 201.0)))
        );

        controller.process_window_event(button(Action::Press));
        controller.process_window_event(cursor(180.0, 240.0));
        assert_eq!(controller.process_window_event(button(Action::Release)), None);

        // A release with no press (e.g. the press happened outside the window)
        assert_eq!(controller.process_window_event(button(Action::Release)), None);
    }
}
