use cairo::Context;
use palette::{Srgb, Srgba, WithAlpha};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Srgba<f64>,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapeStyle {
    pub fill: Option<Srgba<f64>>,
    pub stroke: Option<Stroke>,
}

impl ShapeStyle {
    fn filled(fill: Srgba<f64>, stroke: Srgba<f64>, width: f64) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(Stroke {
                color: stroke,
                width,
            }),
        }
    }

    fn outline(stroke: Srgba<f64>, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(Stroke {
                color: stroke,
                width,
            }),
        }
    }
}

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub rim: ShapeStyle,
    pub inner_circle: ShapeStyle,
    pub spoke: ShapeStyle,
    pub rotate_circle: ShapeStyle,
    pub ball: ShapeStyle,
}

fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Srgba<f64> {
    Srgb::new(r, g, b).into_format::<f64>().with_alpha(alpha)
}

impl Default for ThemeColors {
    fn default() -> Self {
        let red = |a| rgba(0xdd, 0x00, 0x00, a);
        let white = |a| rgba(0xff, 0xff, 0xff, a);

        Self {
            background: rgba(0x00, 0x00, 0x00, 1.0),
            rim: ShapeStyle::filled(red(0.3), white(0.4), 3.0),
            inner_circle: ShapeStyle::outline(rgba(0x00, 0xdc, 0xff, 0.2), 1.0),
            spoke: ShapeStyle::outline(rgba(0x00, 0x00, 0x00, 0.3), 1.0),
            rotate_circle: ShapeStyle::filled(rgba(0xff, 0x00, 0x00, 0.1), white(0.2), 1.0),
            ball: ShapeStyle::filled(red(0.3), white(0.4), 1.0),
        }
    }
}

pub fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Fills and then strokes the current path, consuming it.
pub fn paint_path(cr: &Context, style: &ShapeStyle) -> Result<(), cairo::Error> {
    if let Some(fill) = style.fill {
        set_source(cr, fill);
        cr.fill_preserve()?;
    }
    if let Some(stroke) = style.stroke {
        set_source(cr, stroke.color);
        cr.set_line_width(stroke.width);
        cr.stroke_preserve()?;
    }
    cr.new_path();
    Ok(())
}
