use super::model::{Frame, Stage};
use super::{BORDER_WIDTH, CORNER_RADIUS, LABEL_FONT_SIZE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use spindle_core::carousel::{VisualTransform, layout};
use spindle_core::geometry::{Rect, Size};
use std::f64::consts::{FRAC_PI_2, PI};

struct FrameRenderer<'a> {
    frame: &'a Frame,
    transform: &'a VisualTransform,
    bounds: Rect,
}

impl<'a> FrameRenderer<'a> {
    fn new(frame: &'a Frame, transform: &'a VisualTransform, bounds: Rect) -> Self {
        Self {
            frame,
            transform,
            bounds,
        }
    }

    /// Paints the whole card as one group so opacity applies uniformly.
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.push_group();
        self.draw_card(cr, colors)?;
        self.draw_content(cr, colors)?;
        self.draw_border(cr, colors)?;
        cr.pop_group_to_source()?;
        cr.paint_with_alpha(self.transform.opacity)?;
        cr.restore()
    }

    fn radius(&self) -> f64 {
        CORNER_RADIUS * self.transform.depth_scale
    }

    fn draw_card(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let state = FrameState::resolve(self.frame);
        let (r, g, b, a) = state.color(colors).into_components();
        cr.set_source_rgba(r, g, b, a);
        rounded_rect(cr, &self.bounds, self.radius());
        cr.fill()
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if let Some(pixbuf) = &self.frame.pixbuf {
            self.draw_image(cr, pixbuf)
        } else if let Some(number) = self.frame.item.source.placeholder_number() {
            self.draw_label(cr, colors, &number.to_string())
        } else {
            self.draw_label(cr, colors, "?")
        }
    }

    fn draw_image(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let Rect { origin, size } = self.bounds;
        let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
        // cover the card, cropping the overflow
        let scale = (size.width / pw).max(size.height / ph);
        let (iw, ih) = (pw * scale, ph * scale);
        let (ix, iy) = (
            origin.x + (size.width - iw) / 2.0,
            origin.y + (size.height - ih) / 2.0,
        );

        cr.save()?;
        rounded_rect(cr, &self.bounds, self.radius());
        cr.clip();
        cr.translate(ix, iy);
        cr.scale(scale, scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors, text: &str) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.caption.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE * self.transform.depth_scale);
        if let Ok(ext) = cr.text_extents(text) {
            let Rect { origin, size } = self.bounds;
            cr.move_to(
                origin.x + (size.width - ext.width()) / 2.0 - ext.x_bearing(),
                origin.y + (size.height - ext.height()) / 2.0 - ext.y_bearing(),
            );
            cr.show_text(text)?;
        }
        Ok(())
    }

    fn draw_border(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color = if self.transform.is_centered() {
            colors.centered
        } else {
            colors.shadow
        };
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.set_line_width(BORDER_WIDTH * self.transform.depth_scale);
        rounded_rect(cr, &self.bounds, self.radius());
        cr.stroke()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    Broken,
    Placeholder(usize),
    Image,
}

impl FrameState {
    fn resolve(frame: &Frame) -> Self {
        if frame.is_broken() {
            Self::Broken
        } else if let Some(number) = frame.item.source.placeholder_number() {
            Self::Placeholder(number)
        } else {
            Self::Image
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Broken => colors.broken,
            Self::Placeholder(number) => ThemeColors::placeholder(*number),
            Self::Image => colors.card,
        }
    }
}

fn rounded_rect(cr: &Context, rect: &Rect, radius: f64) {
    let Rect { origin, size } = *rect;
    let r = radius.min(size.width / 2.0).min(size.height / 2.0);
    let (left, top) = (origin.x, origin.y);
    let (right, bottom) = (origin.x + size.width, origin.y + size.height);

    cr.new_sub_path();
    cr.arc(right - r, top + r, r, -FRAC_PI_2, 0.0);
    cr.arc(right - r, bottom - r, r, 0.0, FRAC_PI_2);
    cr.arc(left + r, bottom - r, r, FRAC_PI_2, PI);
    cr.arc(left + r, top + r, r, PI, 3.0 * FRAC_PI_2);
    cr.close_path();
}

/// Draws visible frames back to front.
pub fn draw(cr: &Context, stage: &Stage, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let transforms = stage.transforms();

    for i in layout::paint_order(&transforms) {
        let transform = &transforms[i];
        let bounds = transform.bounds(stage.center, stage.item_size);
        if is_degenerate(bounds.size) {
            continue;
        }
        FrameRenderer::new(&stage.frames[i], transform, bounds).draw(cr, colors)?;
    }
    Ok(())
}

fn is_degenerate(size: Size) -> bool {
    size.width < 1.0 || size.height < 1.0
}
