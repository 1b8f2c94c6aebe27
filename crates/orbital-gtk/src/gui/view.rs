use crate::gui::theme::{self, ShapeStyle, ThemeColors};
use cairo::Context;
use orbital::{Layer, OrbitEngine, Point};
use std::f64::consts::TAU;

fn draw_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    style: &ShapeStyle,
) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.arc(center.x, center.y, radius, 0.0, TAU);
    theme::paint_path(cr, style)
}

fn draw_background(cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
    theme::set_source(cr, colors.background);
    cr.paint()
}

fn draw_spokes(cr: &Context, engine: &OrbitEngine, colors: &ThemeColors) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.set_antialias(cairo::Antialias::None);
    cr.new_path();
    for spoke in &engine.scene().spokes {
        cr.move_to(spoke.start.x, spoke.start.y);
        cr.line_to(spoke.end.x, spoke.end.y);
    }
    theme::paint_path(cr, &colors.spoke)?;
    cr.restore()
}

/// Draws the static ring, the visible guide layers and the orbiting assembly.
pub fn draw(cr: &Context, engine: &OrbitEngine, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let scene = engine.scene();
    let frame = engine.frame();

    draw_background(cr, colors)?;
    draw_circle(cr, scene.center, scene.rim_radius, &colors.rim)?;

    if engine.is_visible(Layer::InnerCircle) {
        draw_circle(cr, scene.center, scene.inner_radius, &colors.inner_circle)?;
    }
    if engine.is_visible(Layer::Lines) {
        draw_spokes(cr, engine, colors)?;
    }
    if engine.is_visible(Layer::RotateCircle) {
        draw_circle(cr, frame.orbit_center, scene.rotate_radius, &colors.rotate_circle)?;
    }

    for ball in &frame.balls {
        draw_circle(cr, *ball, scene.ball_radius, &colors.ball)?;
        draw_circle(cr, *ball, scene.ball_center_radius, &colors.ball)?;
    }
    Ok(())
}
