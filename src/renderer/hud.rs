//! Score and key help overlay

use super::Surface;

const SCORE_FONT: &str = "italic 25px arial";
const HELP_FONT: &str = "italic 15px arial";
const TEXT_STYLE: &str = "#fff";

/// Help lines as (label, x, offset above the bottom edge)
const HELP_LINES: [(&str, f32, f32); 7] = [
    ("[Arrows] -> Move", 10.0, 90.0),
    ("[1] -> Buggers Mode", 10.0, 50.0),
    ("[X] -> Shoot", 10.0, 30.0),
    ("[C] -> Bombs", 10.0, 10.0),
    ("[Av Pag] -> Speed up", 250.0, 50.0),
    ("[Re Pag] -> Speed down", 250.0, 30.0),
    ("[0] -> Clear enemies", 250.0, 10.0),
];

/// Draw the HUD on top of everything else
pub fn draw_hud(surface: &mut impl Surface, score: u64) {
    surface.set_font(SCORE_FONT);
    surface.set_fill_style(TEXT_STYLE);
    surface.fill_text(&format!("Score: {}", score), 50.0, 50.0);

    let height = surface.height();
    surface.set_font(HELP_FONT);
    for (label, x, from_bottom) in HELP_LINES {
        surface.fill_text(label, x, height - from_bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCall, RecordingSurface};

    #[test]
    fn test_hud_lines_anchor_to_bottom() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_hud(&mut surface, 42);

        let texts = surface.texts();
        assert_eq!(texts.len(), 8);
        assert_eq!(texts[0], "Score: 42");
        assert_eq!(surface.fill_style(), "#fff");

        let last = surface.calls.last().unwrap();
        assert_eq!(
            *last,
            DrawCall::Text {
                text: "[0] -> Clear enemies".into(),
                x: 250.0,
                y: 590.0,
                font: HELP_FONT.into(),
            }
        );
    }
}
