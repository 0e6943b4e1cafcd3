//! Turns the machine into a flat list of coloured triangles

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::machine::SlotMachine;
use crate::ui::{Glyph, Layout, SpinButton, WinAnimation};

const PAY_LINE_THICKNESS: f32 = 2.0;
const BUTTON_OUTLINE: f32 = 2.0;
const CIRCLE_SEGMENTS: u32 = 48;

/// All vertices for one frame, in stage coordinates
pub fn build(machine: &SlotMachine) -> Vec<Vertex> {
    let layout = &machine.layout;
    let mut vertices = Vec::with_capacity(1024);

    reels(machine, layout, &mut vertices);
    pay_line(layout, &mut vertices);
    button(&machine.button, &mut vertices);
    if let Some(animation) = &machine.win_animation {
        win_animation(animation, &mut vertices);
    }

    vertices
}

fn reels(machine: &SlotMachine, layout: &Layout, out: &mut Vec<Vertex>) {
    let size = layout.symbol_size;
    // Leave a margin so neighbouring swatches read as separate tiles
    let inset = size * 0.04;

    for reel in &machine.state.reels {
        let window = layout.reel_window(reel.index);
        out.extend(shapes::rect(window.min, window.max, colors::REEL_WINDOW));

        for symbol in &reel.symbols {
            let min = layout.to_stage(reel.index, symbol.y) + Vec2::splat(inset);
            let max = min + Vec2::splat(size - 2.0 * inset);
            out.extend(shapes::clipped_rect(min, max, &window, symbol.kind.color()));
        }
    }
}

fn pay_line(layout: &Layout, out: &mut Vec<Vertex>) {
    let area = layout.reel_area();
    let y = layout.pay_line_stage();
    out.extend(shapes::rect(
        Vec2::new(area.min.x, y - PAY_LINE_THICKNESS / 2.0),
        Vec2::new(area.max.x, y + PAY_LINE_THICKNESS / 2.0),
        colors::PAY_LINE,
    ));
}

fn button(button: &SpinButton, out: &mut Vec<Vertex>) {
    let fill = if button.is_interactive() {
        colors::BUTTON_FILL
    } else {
        colors::BUTTON_DISABLED
    };
    out.extend(shapes::circle(button.center, button.radius, fill, CIRCLE_SEGMENTS));
    out.extend(shapes::ring(
        button.center,
        button.radius - BUTTON_OUTLINE,
        button.radius,
        colors::BUTTON_OUTLINE,
        CIRCLE_SEGMENTS,
    ));

    // Glyphs are 20x20, drawn around the button centre
    let c = button.center;
    match button.glyph() {
        Glyph::Play => out.extend(shapes::triangle(
            c + Vec2::new(-7.0, -10.0),
            c + Vec2::new(13.0, 0.0),
            c + Vec2::new(-7.0, 10.0),
            colors::GLYPH,
        )),
        Glyph::Pause => {
            out.extend(shapes::rect(
                c + Vec2::new(-10.0, -10.0),
                c + Vec2::new(-4.0, 10.0),
                colors::GLYPH,
            ));
            out.extend(shapes::rect(
                c + Vec2::new(4.0, -10.0),
                c + Vec2::new(10.0, 10.0),
                colors::GLYPH,
            ));
        }
    }
}

fn win_animation(animation: &WinAnimation, out: &mut Vec<Vertex>) {
    let region = animation.region;
    let t = (animation.frame() + 1) as f32 / animation.frame_count() as f32;
    let fade = 1.0 - animation.progress();

    let mut overlay = colors::WIN_OVERLAY;
    overlay[3] *= fade;
    out.extend(shapes::rect(region.min, region.max, overlay));

    // Burst ring grows to the region's half-extent over the sequence
    let max_radius = region.size().min_element() / 2.0;
    let outer = max_radius * t;
    let inner = (outer - max_radius * 0.15).max(0.0);
    let mut burst = colors::WIN_BURST;
    burst[3] = fade.max(0.2);
    out.extend(shapes::ring(region.center(), inner, outer, burst, CIRCLE_SEGMENTS));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_scene_stays_inside_view() {
        let machine = SlotMachine::new(Settings::default(), 1);
        let vertices = build(&machine);
        assert!(!vertices.is_empty());
        let view = machine.layout.view_size;
        for v in &vertices {
            assert!(v.position[0] >= -0.01 && v.position[0] <= view.x + 0.01);
            assert!(v.position[1] >= -0.01 && v.position[1] <= view.y + 0.01);
        }
    }

    #[test]
    fn test_symbols_outside_window_are_not_drawn() {
        let machine = SlotMachine::new(Settings::default(), 1);
        let visible = build(&machine).len();

        // Three visible rows per reel, six vertices each, plus background
        let mut hidden = SlotMachine::new(Settings::default(), 1);
        for reel in &mut hidden.state.reels {
            reel.shift(-10_000.0);
        }
        assert_eq!(visible - build(&hidden).len(), 3 * 3 * 6);
    }
}
