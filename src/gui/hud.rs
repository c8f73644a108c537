//! All the text drawn over the scene.

use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3};

use crate::model::{LightingMode, SimulationState, ViewMode};
use crate::orbital_data::ElementsPanel;

const FONT_SIZE: f32 = 60.0;

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn status_line(target: Option<&str>) -> String {
    match target {
        Some(name) => format!("You are now viewing {}", capitalize(name)),
        None => String::from("Free camera"),
    }
}

pub fn orbits_label(visible: bool) -> &'static str {
    if visible {
        "Hide Orbits"
    } else {
        "Show Orbits"
    }
}

pub fn lighting_label(mode: LightingMode) -> &'static str {
    match mode {
        LightingMode::Sun => "Enable Studio Lighting",
        LightingMode::Studio => "Disable Studio Lighting",
    }
}

pub fn view_mode_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Orbit => "Orbit View",
        ViewMode::FirstPerson => "First Person View",
    }
}

pub fn controls_text(state: &SimulationState) -> String {
    let mut text = format!(
        "{}
Speed: {}x
[Q/E] or [1-0] select body, [F] free camera
[,/.] slower/faster, [R] reverse",
        status_line(state.focus().target()),
        state.speed_multiplier(),
    );
    if state.has_scene_toggles() {
        text.push_str(&format!(
            "
Mode: {}
[V] toggle view
[O] {}
[L] {}",
            view_mode_label(state.view_mode()),
            orbits_label(state.orbits_visible()),
            lighting_label(state.lighting()),
        ));
    }
    text
}

/// Formats milliseconds as minutes and seconds.
pub fn format_elapsed(millis: f64) -> String {
    let mut total_millis = millis.max(0.0) as u64;
    let n_seconds = 1000;
    let n_minutes = 60 * n_seconds;
    let n_hours = 60 * n_minutes;

    macro_rules! count_and_remainder {
        ($variable:ident, $divisor:expr) => {
            let $variable = total_millis / $divisor;
            total_millis %= $divisor;
        };
    }

    count_and_remainder!(hours, n_hours);
    count_and_remainder!(minutes, n_minutes);
    count_and_remainder!(seconds, n_seconds);

    format!(
        "{:02}:{:02}:{:02}.{:03}",
        hours, minutes, seconds, total_millis
    )
}

pub fn time_summary_text(time: f64, fps: f64) -> String {
    format!("Time: {}\nFPS: {:.0}", format_elapsed(time), fps)
}

pub fn panel_text(panel: &ElementsPanel) -> String {
    panel
        .rows()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draws the usual two blocks: controls on the left, time on the right.
pub fn draw(window: &mut Window, left: &str, right: &str) {
    let font = Font::default();
    let color = Point3::new(1.0, 1.0, 1.0);
    window.draw_text(left, &Point2::origin(), FONT_SIZE, &font, &color);
    window.draw_text(
        right,
        // text coordinates are in physical pixels, twice the window size on HiDPI screens
        &Point2::new(window.width() as f32 * 2.0 - 600.0, 0.0),
        FONT_SIZE,
        &font,
        &color,
    );
}

/// A third block under the time summary.
pub fn draw_panel(window: &mut Window, panel: &ElementsPanel) {
    window.draw_text(
        &panel_text(panel),
        &Point2::new(window.width() as f32 * 2.0 - 900.0, 200.0),
        FONT_SIZE * 0.75,
        &Font::default(),
        &Point3::new(0.8, 0.9, 1.0),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BodyInfo, Command, FollowStyle, Orrery};
    use crate::orbital_data::{ERROR_TEXT, LOADING_TEXT};

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(Some("mercury")), "You are now viewing Mercury");
        assert_eq!(status_line(Some("")), "You are now viewing ");
        assert_eq!(status_line(None), "Free camera");
    }

    #[test]
    fn test_labels_follow_state() {
        let mut orrery = Orrery::new();
        orrery.add_body(BodyInfo::fixed("sun", 20.0)).unwrap();
        let mut state = SimulationState::new(FollowStyle::fixed());

        assert!(controls_text(&state).contains("Hide Orbits"));
        assert!(controls_text(&state).contains("Enable Studio Lighting"));

        state.apply(Command::ToggleOrbits, &orrery);
        state.apply(Command::ToggleLighting, &orrery);
        let text = controls_text(&state);
        assert!(text.contains("Show Orbits"));
        assert!(text.contains("Disable Studio Lighting"));

        state.apply(Command::Select("sun".to_owned()), &orrery);
        assert!(controls_text(&state).starts_with("You are now viewing Sun"));
    }

    #[test]
    fn test_no_toggle_labels_without_toggles() {
        let state = SimulationState::new(FollowStyle::chase())
            .with_lighting(LightingMode::Studio)
            .without_scene_toggles();
        let text = controls_text(&state);
        assert!(text.starts_with("Free camera"));
        assert!(text.contains("[F] free camera"));
        for hidden in ["[V]", "[O]", "[L]", "Mode:"] {
            assert!(!text.contains(hidden), "{:?} should not be listed", hidden);
        }
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "00:00:00.000");
        assert_eq!(format_elapsed(61_234.0), "00:01:01.234");
        assert_eq!(format_elapsed(3_600_000.0 + 5.0), "01:00:00.005");
        assert_eq!(format_elapsed(-10.0), "00:00:00.000");
    }

    #[test]
    fn test_panel_text() {
        let mut panel = ElementsPanel::new();
        let text = panel_text(&panel);
        assert_eq!(text.lines().count(), 8);
        assert!(text.lines().all(|l| l.ends_with(LOADING_TEXT)));

        panel.show_error();
        assert!(panel_text(&panel).lines().all(|l| l.ends_with(ERROR_TEXT)));
    }
}
