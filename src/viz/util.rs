use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::style::Color;

/// Takes an event, checks if it is a key press event, and returns the [`KeyCode`]
pub(super) fn event_keycode(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key.code),
        _ => None,
    }
}

/// Background color for a utility, fading from red through black to green
pub(super) fn utility_color(utility: f32) -> Color {
    let intensity = (utility.clamp(-1.0, 1.0).abs() * 160.0) as u8;
    if utility >= 0.0 {
        Color::Rgb(0, intensity, 0)
    } else {
        Color::Rgb(intensity, 0, 0)
    }
}
