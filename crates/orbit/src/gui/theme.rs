use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use orbitcam::layout::{MenuLayout, StyleTarget, apply_layout_to_css};
use palette::Srgba;
use std::collections::BTreeMap;

pub struct ThemeColors {
    pub highlight: Srgba<f64>,
    pub child: Srgba<f64>,
    pub text: Srgba<f64>,
    pub backdrop: Srgba<f64>,
    pub center_circle: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            highlight: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
            child: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.85),
                Some(0.85),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            backdrop: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.05, 0.05, 0.05, 0.6),
                Some(0.6),
            ),
            center_circle: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.2, 0.2, 0.2, 0.15),
                Some(0.1),
            ),
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
}

const BASE_CSS: &str = "
.orbit-window, .orbit-drawing-area {
    background: none;
    background-color: transparent;
}
";

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(BASE_CSS);
    add_provider(&provider);
}

fn add_provider(provider: &gtk::CssProvider) {
    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

/// Layout custom properties collected for the window's stylesheet.
#[derive(Debug, Default)]
pub struct StyleSheet {
    properties: BTreeMap<String, String>,
}

impl StyleTarget for StyleSheet {
    fn set_property(&mut self, name: &str, value: String) {
        self.properties.insert(name.to_string(), value);
    }
}

impl StyleSheet {
    pub fn from_layout(layout: &MenuLayout) -> Self {
        let mut sheet = Self::default();
        apply_layout_to_css(layout, &mut sheet);
        sheet
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn to_css(&self) -> String {
        let body: String = self
            .properties
            .iter()
            .map(|(name, value)| format!("    {name}: {value};\n"))
            .collect();
        format!(".orbit-window {{\n{body}}}\n")
    }
}

/// Owns the provider carrying the layout properties so each resize replaces
/// the previous values instead of stacking providers.
pub struct LayoutStyle {
    provider: gtk::CssProvider,
}

impl LayoutStyle {
    pub fn install() -> Self {
        let provider = gtk::CssProvider::new();
        add_provider(&provider);
        Self { provider }
    }

    pub fn update(&self, layout: &MenuLayout) {
        self.provider
            .load_from_data(&StyleSheet::from_layout(layout).to_css());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitcam::geometry::Size;

    #[test]
    fn test_stylesheet_collects_layout_properties() {
        let layout = MenuLayout::compute(Size::new(100.0, 100.0), 4);
        let sheet = StyleSheet::from_layout(&layout);

        assert_eq!(sheet.get("--menu-radius"), Some("200px"));
        assert_eq!(sheet.get("--tile-size"), Some("90px"));

        let css = sheet.to_css();
        assert!(css.starts_with(".orbit-window {\n"));
        assert!(css.contains("    --menu-radius: 200px;\n"));
        assert!(css.ends_with("}\n"));
    }
}
