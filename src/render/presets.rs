// src/render/presets.rs
use crate::utils::error::RenderError;
use once_cell::sync::Lazy;

/// Page geometry and base type size for one e-reader screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenPreset {
    pub name: String,
    pub width_mm: f32,
    pub height_mm: f32,
    pub ppi: u32,
    pub base_font_pt: f32,
    pub description: String,
}

pub const DEFAULT_PRESET: &str = "kindle-paperwhite";
const CUSTOM_PPI: u32 = 300;

impl ScreenPreset {
    /// One line for the `--list-screens` listing.
    pub fn summary_line(&self, key: &str) -> String {
        format!(
            "{:<20} {:>3}x{:<3}mm  {:>3} ppi  {}",
            key, self.width_mm, self.height_mm, self.ppi, self.description
        )
    }
}

fn preset(name: &str, width_mm: f32, height_mm: f32, ppi: u32, base_font_pt: f32, description: &str) -> ScreenPreset {
    ScreenPreset {
        name: name.to_string(),
        width_mm,
        height_mm,
        ppi,
        base_font_pt,
        description: description.to_string(),
    }
}

/// Built-in presets keyed by their command-line name, in display order.
pub static SCREEN_PRESETS: Lazy<Vec<(&'static str, ScreenPreset)>> = Lazy::new(|| {
    vec![
        ("kindle-paperwhite", preset("Kindle Paperwhite 6.8\"", 105.0, 140.0, 300, 11.0, "Kindle Paperwhite 6.8-inch (2021+)")),
        ("kindle-paperwhite-6", preset("Kindle Paperwhite 6\"", 91.0, 123.0, 300, 10.0, "Kindle Paperwhite 6-inch (older models)")),
        ("kindle-scribe", preset("Kindle Scribe", 158.0, 210.0, 300, 12.0, "Kindle Scribe 10.2-inch")),
        ("kobo-clara", preset("Kobo Clara", 91.0, 123.0, 300, 10.0, "Kobo Clara 6-inch")),
        ("kobo-libra", preset("Kobo Libra", 107.0, 142.0, 300, 11.0, "Kobo Libra 7-inch")),
        ("remarkable", preset("reMarkable 2", 158.0, 210.0, 226, 12.0, "reMarkable 2 10.3-inch")),
        ("a5", preset("A5 Paper", 148.0, 210.0, 300, 11.0, "A5 paper size (148x210mm)")),
    ]
});

/// Looks up a built-in preset by its key, e.g. `kindle-scribe`.
pub fn get_preset(key: &str) -> Result<&'static ScreenPreset, RenderError> {
    SCREEN_PRESETS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, p)| p)
        .ok_or_else(|| RenderError::UnknownPreset {
            name: key.to_string(),
            available: SCREEN_PRESETS.iter().map(|(k, _)| *k).collect::<Vec<_>>().join(", "),
        })
}

/// A page size not covered by the built-ins.
pub fn custom_preset(width_mm: f32, height_mm: f32, base_font_pt: f32) -> Result<ScreenPreset, RenderError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(width_mm) || !valid(height_mm) || !valid(base_font_pt) {
        return Err(RenderError::InvalidPageSize { width_mm, height_mm });
    }
    Ok(ScreenPreset {
        name: "Custom".to_string(),
        width_mm,
        height_mm,
        ppi: CUSTOM_PPI,
        base_font_pt,
        description: format!("Custom {}x{}mm", width_mm, height_mm),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_presets() {
        let scribe = get_preset("kindle-scribe").unwrap();
        assert_eq!(scribe.width_mm, 158.0);
        assert_eq!(scribe.height_mm, 210.0);
        assert_eq!(get_preset("remarkable").unwrap().ppi, 226);
        assert!(get_preset(DEFAULT_PRESET).is_ok());
        assert_eq!(SCREEN_PRESETS.len(), 7);
    }

    #[test]
    fn test_unknown_preset_lists_available() {
        let err = get_preset("nook").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unknown screen preset 'nook'"));
        assert!(message.contains("kindle-paperwhite"));
        assert!(message.contains("a5"));
    }

    #[test]
    fn test_summary_line_reports_density() {
        let remarkable = get_preset("remarkable").unwrap();
        let line = remarkable.summary_line("remarkable");
        assert!(line.starts_with("remarkable "));
        assert!(line.contains("158x210mm"));
        assert!(line.contains("226 ppi"));
        assert!(line.ends_with("reMarkable 2 10.3-inch"));

        assert!(custom_preset(100.0, 150.0, 11.0).unwrap().summary_line("custom").contains("300 ppi"));
    }

    #[test]
    fn test_lookup_borrows_builtin_table() {
        let first = get_preset("a5").unwrap();
        let second = get_preset("a5").unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_custom_preset() {
        let custom = custom_preset(100.0, 150.0, 11.0).unwrap();
        assert_eq!(custom.name, "Custom");
        assert_eq!(custom.ppi, 300);
        assert_eq!(custom.description, "Custom 100x150mm");
        assert!(custom_preset(0.0, 150.0, 11.0).is_err());
        assert!(custom_preset(100.0, f32::NAN, 11.0).is_err());
    }
}
