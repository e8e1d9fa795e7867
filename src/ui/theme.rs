use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Indigo,
    Paper,
    Catppuccin,
}

impl ThemePreset {
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Indigo, ThemePreset::Paper, ThemePreset::Catppuccin]
    }

    /// Display name, also accepted by `from_name`
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Indigo => "Indigo",
            ThemePreset::Paper => "Paper",
            ThemePreset::Catppuccin => "Catppuccin Mocha",
        }
    }

    /// Parse a preset from its display or config name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name) || format!("{:?}", p).eq_ignore_ascii_case(name))
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Indigo => Theme::indigo(),
            ThemePreset::Paper => Theme::paper(),
            ThemePreset::Catppuccin => Theme::catppuccin(),
        }
    }
}

/// Colors the views draw with
#[derive(Debug, Clone)]
pub struct Theme {
    pub dark: bool,

    /// Window and panel background
    pub background: Color32,
    /// List cards
    pub surface: Color32,

    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    pub accent: Color32,
    pub success: Color32,
    pub error: Color32,
    pub border: Color32,
}

impl Theme {
    /// Material indigo on dark slate
    pub fn indigo() -> Self {
        Self {
            dark: true,
            background: Color32::from_rgb(22, 25, 37),
            surface: Color32::from_rgb(31, 35, 51),
            text_primary: Color32::from_rgb(245, 246, 250),
            text_secondary: Color32::from_rgb(196, 200, 216),
            text_muted: Color32::from_rgb(130, 136, 160),
            accent: Color32::from_rgb(92, 107, 192),
            success: Color32::from_rgb(102, 187, 106),
            error: Color32::from_rgb(239, 83, 80),
            border: Color32::from_rgb(58, 63, 88),
        }
    }

    /// Light theme close to the web client's default look
    pub fn paper() -> Self {
        Self {
            dark: false,
            background: Color32::from_rgb(245, 245, 245),
            surface: Color32::WHITE,
            text_primary: Color32::from_rgb(33, 33, 33),
            text_secondary: Color32::from_rgb(97, 97, 97),
            text_muted: Color32::from_rgb(158, 158, 158),
            accent: Color32::from_rgb(63, 81, 181),
            success: Color32::from_rgb(56, 142, 60),
            error: Color32::from_rgb(211, 47, 47),
            border: Color32::from_rgb(224, 224, 224),
        }
    }

    /// Catppuccin Mocha
    pub fn catppuccin() -> Self {
        Self {
            dark: true,
            background: Color32::from_rgb(24, 24, 37), // Mantle
            surface: Color32::from_rgb(30, 30, 46),    // Base
            text_primary: Color32::from_rgb(205, 214, 244),
            text_secondary: Color32::from_rgb(186, 194, 222),
            text_muted: Color32::from_rgb(147, 153, 178),
            accent: Color32::from_rgb(137, 180, 250), // Blue
            success: Color32::from_rgb(166, 227, 161),
            error: Color32::from_rgb(243, 139, 168),
            border: Color32::from_rgb(69, 71, 90),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark { Visuals::dark() } else { Visuals::light() };

        visuals.window_fill = self.background;
        visuals.panel_fill = self.background;
        visuals.faint_bg_color = self.surface;
        visuals.override_text_color = Some(self.text_primary);

        let widgets = &mut visuals.widgets;
        widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);
        widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        widgets.active.bg_fill = self.accent;
        widgets.active.weak_bg_fill = self.accent;

        // Also colors checked checkboxes and selected filter buttons
        visuals.selection.bg_fill = self.accent.gamma_multiply(0.35);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        visuals.hyperlink_color = self.accent;
        visuals.window_stroke = Stroke::new(1.0, self.border);

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_name() {
        assert_eq!(ThemePreset::from_name("paper"), Some(ThemePreset::Paper));
        assert_eq!(ThemePreset::from_name("Catppuccin Mocha"), Some(ThemePreset::Catppuccin));
        assert_eq!(ThemePreset::from_name("catppuccin"), Some(ThemePreset::Catppuccin));
        assert_eq!(ThemePreset::from_name("neon"), None);
    }

    #[test]
    fn test_only_paper_is_light() {
        let light: Vec<_> = ThemePreset::all().iter().filter(|p| !p.theme().dark).collect();
        assert_eq!(light, vec![&ThemePreset::Paper]);
    }
}
