//! Canvas 2D painter
//!
//! Paints a [`FrameOutput`] with plain rectangles and one triangle path.

use web_sys::CanvasRenderingContext2d;

use super::shapes::{Color, Decal, Drawable};
use crate::game::FrameOutput;
use crate::sim::GamePhase;

const ARMOR: Color = Color::rgb(0x66, 0x66, 0x66);
const BAR_BACK: Color = Color::rgb(0x33, 0x33, 0x33);
const BAR_FILL: Color = Color::rgb(0x00, 0xff, 0x00);
const OVERLAY_TEXT: Color = Color::rgb(0x00, 0xd4, 0xff);

/// Paint a whole frame
pub fn paint(ctx: &CanvasRenderingContext2d, frame: &FrameOutput, width: f64, height: f64) {
    ctx.set_fill_style_str("#000");
    ctx.fill_rect(0.0, 0.0, width, height);

    for drawable in &frame.drawables {
        paint_drawable(ctx, drawable);
    }

    // Debug overlay
    ctx.set_fill_style_str("#fff");
    ctx.set_font("16px Arial");
    ctx.set_text_align("left");
    let _ = ctx.fill_text(&format!("Enemies: {}", frame.enemy_count), 10.0, 30.0);
    let _ = ctx.fill_text(
        &format!("Spawn Timer: {}ms", frame.spawn_timer_ms.floor()),
        10.0,
        50.0,
    );

    if frame.phase == GamePhase::Paused {
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
        ctx.fill_rect(0.0, 0.0, width, height);
        ctx.set_fill_style_str(&OVERLAY_TEXT.to_css(1.0));
        ctx.set_font("48px Arial");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("PAUSED", width / 2.0, height / 2.0);
    }
}

fn fill(ctx: &CanvasRenderingContext2d, color: Color, alpha: f32, x: f32, y: f32, w: f32, h: f32) {
    ctx.set_fill_style_str(&color.to_css(alpha));
    ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
}

fn paint_drawable(ctx: &CanvasRenderingContext2d, d: &Drawable) {
    let (x, y) = (d.pos.x, d.pos.y);
    let (w, h) = (d.size.x, d.size.y);

    match d.decal {
        // Fast: body plus a white arrowhead, nothing shared
        Decal::Arrow => {
            fill(ctx, d.color, d.alpha, x, y, w, h);
            ctx.set_fill_style_str(&Color::WHITE.to_css(d.alpha));
            ctx.begin_path();
            ctx.move_to((x + w / 2.0) as f64, (y + 5.0) as f64);
            ctx.line_to((x + 5.0) as f64, (y + h - 5.0) as f64);
            ctx.line_to((x + w - 5.0) as f64, (y + h - 5.0) as f64);
            ctx.close_path();
            ctx.fill();
            return;
        }
        Decal::Ship => {
            fill(ctx, d.color, d.alpha, x, y, w, h);
            fill(ctx, Color::WHITE, d.alpha, x + 5.0, y + 5.0, w - 10.0, h - 10.0);
            fill(ctx, d.color, d.alpha, x + 15.0, y + 15.0, 10.0, 10.0);
            return;
        }
        Decal::None => {
            fill(ctx, d.color, d.alpha, x, y, w, h);
            return;
        }
        Decal::Core | Decal::Armor | Decal::Zigzag => {}
    }

    // Shared enemy body
    fill(ctx, d.color, d.alpha, x, y, w, h);
    fill(ctx, Color::WHITE, d.alpha, x + 5.0, y + 5.0, w - 10.0, h - 10.0);
    fill(ctx, d.color, d.alpha, x + 10.0, y + 10.0, 10.0, 10.0);

    if let Some(ratio) = d.health_bar {
        fill(ctx, BAR_BACK, d.alpha, x, y - 8.0, w, 4.0);
        fill(ctx, BAR_FILL, d.alpha, x, y - 8.0, w * ratio, 4.0);
    }

    match d.decal {
        Decal::Armor => {
            for (dx, dy) in [(2.0, 2.0), (w - 7.0, 2.0), (2.0, h - 7.0), (w - 7.0, h - 7.0)] {
                fill(ctx, ARMOR, d.alpha, x + dx, y + dy, 5.0, 5.0);
            }
        }
        Decal::Zigzag => {
            for i in 0..3 {
                let offset = i as f32 * 8.0;
                fill(ctx, Color::WHITE, d.alpha, x + 8.0 + offset, y + 5.0, 3.0, 3.0);
                fill(ctx, Color::WHITE, d.alpha, x + 5.0 + offset, y + 15.0, 3.0, 3.0);
            }
        }
        _ => {}
    }
}
