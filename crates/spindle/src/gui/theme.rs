use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{FromColor, Hsv, Srgb, Srgba, WithAlpha};

/// Hue step between consecutive placeholder cards.
const PLACEHOLDER_HUE_STEP: f64 = 47.0;

pub struct ThemeColors {
    pub card: Srgba<f64>,
    pub centered: Srgba<f64>,
    pub broken: Srgba<f64>,
    pub caption: Srgba<f64>,
    pub shadow: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            card: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.18, 0.18, 0.2, 1.0),
                Some(1.0),
            ),
            centered: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
            broken: Self::lookup_color(
                context,
                "error_bg_color",
                Srgba::new(0.8, 0.2, 0.2, 0.8),
                Some(0.8),
            ),
            caption: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.95, 0.95, 0.95, 1.0),
                None,
            ),
            shadow: Srgba::new(0.0, 0.0, 0.0, 0.35),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }

    /// Tint for `placeholder:<number>` cards.
    pub fn placeholder(number: usize) -> Srgba<f64> {
        let hue = (number as f64 * PLACEHOLDER_HUE_STEP) % 360.0;
        let hsv = Hsv::<palette::encoding::Srgb, f64>::new(hue, 0.45, 0.8);
        let rgb: Srgb<f64> = Srgb::from_color(hsv);
        rgb.with_alpha(1.0)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.spindle-stage {
    background-color: alpha(@theme_fg_color, 0.04);
}
.spindle-caption {
    font-weight: bold;
}
.spindle-indicator {
    opacity: 0.7;
    font-feature-settings: \"tnum\";
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
