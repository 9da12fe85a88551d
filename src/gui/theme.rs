/// Theme system — switchable color themes for the application

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AppTheme {
    Light,
    Dark,
}

impl AppTheme {
    pub fn label(&self) -> &'static str {
        match self {
            AppTheme::Light => "☀ Light",
            AppTheme::Dark => "🌙 Dark",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AppTheme::Light => AppTheme::Dark,
            AppTheme::Dark => AppTheme::Light,
        }
    }
}

/// All colors a theme needs to provide
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Panels & backgrounds
    pub panel_fill: egui::Color32,
    pub window_fill: egui::Color32,
    pub faint_bg: egui::Color32,

    // Widgets
    pub widget_bg: egui::Color32,
    pub widget_bg_stroke: egui::Color32,
    pub widget_inactive_bg: egui::Color32,
    pub widget_inactive_stroke: egui::Color32,
    pub widget_hovered_bg: egui::Color32,
    pub widget_hovered_stroke: egui::Color32,
    pub widget_active_bg: egui::Color32,
    pub widget_active_fg: egui::Color32,

    // Selection
    pub selection_bg: egui::Color32,
    pub selection_stroke: egui::Color32,

    // Text
    pub text_secondary: egui::Color32,
    pub text_muted: egui::Color32,
    pub text_heading: egui::Color32,

    // Accent colors
    pub accent: egui::Color32,
    pub accent_dim: egui::Color32,

    // Plot overlay
    pub crosshair: egui::Color32,
    pub readout_text: egui::Color32,
    pub readout_bg: egui::Color32,

    // Status bar
    pub status_bar_bg: egui::Color32,
    pub status_text: egui::Color32,

    // Shadow
    pub shadow_color: egui::Color32,

    // Whether this is a dark theme
    pub is_dark: bool,
}

impl ThemeColors {
    pub fn from_theme(theme: AppTheme) -> Self {
        match theme {
            AppTheme::Light => Self::light(),
            AppTheme::Dark => Self::dark(),
        }
    }

    fn light() -> Self {
        Self {
            panel_fill: egui::Color32::from_rgb(0xF7, 0xF7, 0xF8),
            window_fill: egui::Color32::from_rgb(0xFF, 0xFF, 0xFF),
            faint_bg: egui::Color32::from_rgb(0xF0, 0xF1, 0xF3),

            widget_bg: egui::Color32::from_rgb(0xEB, 0xEC, 0xEE),
            widget_bg_stroke: egui::Color32::from_rgb(0xD0, 0xD2, 0xD6),
            widget_inactive_bg: egui::Color32::from_rgb(0xE3, 0xE5, 0xE8),
            widget_inactive_stroke: egui::Color32::from_rgb(0xC8, 0xCA, 0xCE),
            widget_hovered_bg: egui::Color32::from_rgb(0xD8, 0xDD, 0xE6),
            widget_hovered_stroke: egui::Color32::from_rgb(0x5B, 0x9B, 0xD5),
            widget_active_bg: egui::Color32::from_rgb(0x3B, 0x7D, 0xC0),
            widget_active_fg: egui::Color32::WHITE,

            selection_bg: egui::Color32::from_rgba_premultiplied(0x3B, 0x7D, 0xC0, 0x40),
            selection_stroke: egui::Color32::from_rgb(0x3B, 0x7D, 0xC0),

            text_secondary: egui::Color32::from_rgb(0x44, 0x48, 0x52),
            text_muted: egui::Color32::from_rgb(0x88, 0x8C, 0x94),
            text_heading: egui::Color32::from_rgb(0x2A, 0x2E, 0x36),

            accent: egui::Color32::from_rgb(0x3B, 0x7D, 0xC0),
            accent_dim: egui::Color32::from_rgb(0x70, 0x75, 0x80),

            crosshair: egui::Color32::from_rgb(0xD0, 0x30, 0x30),
            readout_text: egui::Color32::from_rgb(0x20, 0x22, 0x28),
            readout_bg: egui::Color32::from_rgba_premultiplied(0xF8, 0xF8, 0xF8, 0xC8),

            status_bar_bg: egui::Color32::from_rgb(0xF0, 0xF1, 0xF3),
            status_text: egui::Color32::from_rgb(0x44, 0x48, 0x52),

            shadow_color: egui::Color32::from_rgba_premultiplied(0, 0, 0, 25),

            is_dark: false,
        }
    }

    fn dark() -> Self {
        Self {
            panel_fill: egui::Color32::from_rgb(0x1B, 0x1D, 0x22),
            window_fill: egui::Color32::from_rgb(0x21, 0x24, 0x2A),
            faint_bg: egui::Color32::from_rgb(0x26, 0x29, 0x30),

            widget_bg: egui::Color32::from_rgb(0x2A, 0x2E, 0x36),
            widget_bg_stroke: egui::Color32::from_rgb(0x3A, 0x3F, 0x49),
            widget_inactive_bg: egui::Color32::from_rgb(0x2E, 0x32, 0x3B),
            widget_inactive_stroke: egui::Color32::from_rgb(0x42, 0x47, 0x52),
            widget_hovered_bg: egui::Color32::from_rgb(0x37, 0x3D, 0x49),
            widget_hovered_stroke: egui::Color32::from_rgb(0x5B, 0x9B, 0xD5),
            widget_active_bg: egui::Color32::from_rgb(0x3B, 0x7D, 0xC0),
            widget_active_fg: egui::Color32::WHITE,

            selection_bg: egui::Color32::from_rgba_premultiplied(0x3B, 0x7D, 0xC0, 0x50),
            selection_stroke: egui::Color32::from_rgb(0x5B, 0x9B, 0xD5),

            text_secondary: egui::Color32::from_rgb(0xC2, 0xC6, 0xCE),
            text_muted: egui::Color32::from_rgb(0x7A, 0x7F, 0x89),
            text_heading: egui::Color32::from_rgb(0xE4, 0xE7, 0xEC),

            accent: egui::Color32::from_rgb(0x5B, 0x9B, 0xD5),
            accent_dim: egui::Color32::from_rgb(0x8A, 0x90, 0x9C),

            crosshair: egui::Color32::from_rgb(0xE8, 0x55, 0x55),
            readout_text: egui::Color32::from_rgb(0xE4, 0xE7, 0xEC),
            readout_bg: egui::Color32::from_rgba_premultiplied(0x20, 0x22, 0x28, 0xC8),

            status_bar_bg: egui::Color32::from_rgb(0x17, 0x19, 0x1D),
            status_text: egui::Color32::from_rgb(0xB0, 0xB4, 0xBC),

            shadow_color: egui::Color32::from_rgba_premultiplied(0, 0, 0, 60),

            is_dark: true,
        }
    }
}

/// Apply a theme to the egui context
pub fn apply_theme(ctx: &egui::Context, theme: AppTheme) {
    let c = ThemeColors::from_theme(theme);

    let mut visuals = if c.is_dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.panel_fill = c.panel_fill;
    visuals.window_fill = c.window_fill;
    visuals.faint_bg_color = c.faint_bg;

    visuals.widgets.noninteractive.bg_fill = c.widget_bg;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(0.5, c.widget_bg_stroke);
    visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(3);
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, c.text_secondary);

    visuals.widgets.inactive.bg_fill = c.widget_inactive_bg;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(0.5, c.widget_inactive_stroke);
    visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(4);

    visuals.widgets.hovered.bg_fill = c.widget_hovered_bg;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, c.widget_hovered_stroke);

    visuals.widgets.active.bg_fill = c.widget_active_bg;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.5, c.widget_active_fg);

    visuals.selection.bg_fill = c.selection_bg;
    visuals.selection.stroke = egui::Stroke::new(1.5, c.selection_stroke);

    visuals.window_shadow = egui::epaint::Shadow {
        offset: [0, 2],
        blur: 8,
        spread: 0,
        color: c.shadow_color,
    };

    ctx.set_visuals(visuals);
}
