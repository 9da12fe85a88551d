/// Main application state and eframe::App implementation
///
/// Ties together the data model, viewport planning, cursor tracking,
/// and the GUI panels.

use std::path::PathBuf;

use eframe::egui;

use crate::data::parser;
use crate::data::spectrum::SpectrumCollection;
use crate::gui::legend_panel::{self, LegendAction};
use crate::gui::spectrum_view::{self, SpectrumViewState};
use crate::gui::theme::{self, AppTheme, ThemeColors};
use crate::gui::toolbar::{self, ToolbarAction};
use crate::view::viewport::{self, Viewport};

/// The main application
pub struct SpectralApp {
    /// Single source of truth for loaded spectra
    collection: SpectrumCollection,

    /// Last computed display frame. Kept as-is when the visible set
    /// empties out, so hiding everything does not collapse the view.
    viewport: Option<Viewport>,

    /// GUI sub-state
    view_state: SpectrumViewState,

    /// Status messages
    status_message: String,
    show_about: bool,

    /// Current theme
    current_theme: AppTheme,
    theme_colors: ThemeColors,

    /// Dropped files buffer
    dropped_files: Vec<PathBuf>,
}

impl SpectralApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // ── Apply default theme ──
        let default_theme = AppTheme::Light;
        theme::apply_theme(&cc.egui_ctx, default_theme);
        let theme_colors = ThemeColors::from_theme(default_theme);

        // ── Typography: scale for monitor DPI ──
        let ppi = cc.egui_ctx.pixels_per_point();
        let base_size = if ppi > 1.5 { 14.0 } else { 13.0 };
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(base_size, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::new(base_size, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(base_size * 1.25, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            egui::FontId::new(base_size * 0.85, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            egui::FontId::new(base_size * 0.92, egui::FontFamily::Monospace),
        );
        style.spacing.item_spacing = egui::vec2(8.0, 5.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        cc.egui_ctx.set_style(style);

        Self {
            collection: SpectrumCollection::new(),
            viewport: None,
            view_state: SpectrumViewState::default(),
            status_message: "Ready — open spectrum files to begin".to_string(),
            show_about: false,
            current_theme: default_theme,
            theme_colors,
            dropped_files: Vec::new(),
        }
    }

    /// Load a batch of spectrum files.
    ///
    /// A failed file never aborts the batch; the outcome is reported in
    /// aggregate, and the viewport is recomputed exactly once at the end
    /// so intermediate frames are never shown.
    fn load_paths(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }

        let mut loaded = 0usize;
        let mut failed: Vec<String> = Vec::new();

        for path in &paths {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());

            let result = parser::load_spectrum_file(path)
                .map_err(|e| e.to_string())
                .and_then(|(wavelengths, reflectances)| {
                    self.collection
                        .add_series(wavelengths, reflectances, filename.clone())
                        .map_err(|e| e.to_string())
                });

            match result {
                Ok(index) => {
                    log::info!("Loaded {} as series {}", path.display(), index);
                    loaded += 1;
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {}", path.display(), e);
                    failed.push(filename);
                }
            }
        }

        if loaded > 0 {
            self.refresh_viewport();
            self.view_state.auto_scale = true;
        }

        self.status_message = if failed.is_empty() {
            format!(
                "Loaded {} file(s) ({} total)",
                loaded,
                self.collection.len()
            )
        } else if loaded > 0 {
            format!(
                "Loaded {} file(s). Errors: {}",
                loaded,
                failed.join(", ")
            )
        } else {
            format!("Failed to load: {}", failed.join(", "))
        };
    }

    /// Re-frame the visible set. An empty visible set keeps the previous
    /// viewport untouched.
    fn refresh_viewport(&mut self) {
        if let Some(vp) = viewport::frame_visible(&self.collection) {
            self.viewport = Some(vp);
        }
    }

    fn clear_all(&mut self) {
        self.collection.clear();
        self.viewport = None;
        self.view_state.tracker.reset();
        self.view_state.auto_scale = true;
        self.status_message = "Cleared all spectra".to_string();
    }

    /// Handle toolbar actions
    fn handle_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::OpenFiles => {
                if let Some(paths) = toolbar::open_files_dialog() {
                    self.load_paths(paths);
                }
            }
            ToolbarAction::ClearAll => self.clear_all(),
            ToolbarAction::ResetZoom => {
                self.refresh_viewport();
                self.view_state.auto_scale = true;
                self.status_message = "Zoom reset".to_string();
            }
            ToolbarAction::CursorModeToggle => {
                let mode = self.view_state.tracker.mode.next();
                self.view_state.tracker.mode = mode;
                self.view_state.tracker.reset();
                self.status_message = format!("Cursor mode: {}", mode.label());
            }
            ToolbarAction::ThemeToggle => {
                self.current_theme = self.current_theme.next();
                self.theme_colors = ThemeColors::from_theme(self.current_theme);
            }
            ToolbarAction::ShowAbout => {
                self.show_about = true;
            }
            ToolbarAction::None => {}
        }
    }
}

impl eframe::App for SpectralApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Re-apply theme each frame (ensures toggle takes effect) ──
        theme::apply_theme(ctx, self.current_theme);

        // Handle drag-and-drop
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                for file in &i.raw.dropped_files {
                    if let Some(path) = &file.path {
                        self.dropped_files.push(path.clone());
                    }
                }
            }
        });

        // Process dropped files as one batch
        if !self.dropped_files.is_empty() {
            let paths = std::mem::take(&mut self.dropped_files);
            self.load_paths(paths);
        }

        // ── Toolbar ──
        let toolbar_action = toolbar::show_toolbar(
            ctx,
            self.current_theme.label(),
            self.view_state.tracker.mode.label(),
            !self.collection.is_empty(),
        );
        if toolbar_action != ToolbarAction::None {
            self.handle_toolbar_action(toolbar_action);
        }

        // ── Status Bar ──
        let tc = &self.theme_colors;
        let sb_bg = tc.status_bar_bg;
        let sb_text = tc.status_text;
        let sb_muted = tc.text_muted;
        let sb_accent = tc.accent;
        let cursor_label = self.view_state.tracker.mode.label();
        let file_count = self.collection.len();
        let visible_count = self.collection.visible_count();

        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::default().fill(sb_bg).inner_margin(egui::Margin::same(6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(sb_text, &self.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.colored_label(
                            sb_accent,
                            egui::RichText::new(format!("🎯 {}", cursor_label)).size(11.0),
                        );
                        ui.separator();
                        ui.colored_label(
                            sb_muted,
                            egui::RichText::new(format!("Visible: {}", visible_count)).size(11.0),
                        );
                        ui.separator();
                        ui.colored_label(
                            sb_muted,
                            egui::RichText::new(format!("Files: {}", file_count)).size(11.0),
                        );
                    });
                });
            });

        // ── Left Panel: Legend ──
        let mut legend_action = LegendAction::None;
        egui::SidePanel::left("legend_panel")
            .resizable(true)
            .default_width(230.0)
            .min_width(180.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                legend_action = legend_panel::show_legend_panel(ui, &mut self.collection);
            });
        if legend_action == LegendAction::VisibilityChanged {
            self.refresh_viewport();
            self.view_state.auto_scale = true;
        }

        // ── Central Panel: Spectrum Display ──
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.collection.is_empty() {
                // Welcome screen
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.28);
                    ui.heading(
                        egui::RichText::new("🔬 FT-IR Spectral Viewer")
                            .size(26.0)
                            .color(self.theme_colors.text_heading),
                    );
                    ui.add_space(16.0);
                    ui.label(
                        egui::RichText::new("Drag & drop spectrum files here")
                            .size(14.5)
                            .color(self.theme_colors.text_muted),
                    );
                    ui.label(
                        egui::RichText::new("or use File → Add Spectra")
                            .size(14.5)
                            .color(self.theme_colors.text_muted),
                    );
                    ui.add_space(24.0);
                    ui.label(
                        egui::RichText::new("DPT (.dpt)  ·  CSV  ·  tab / whitespace tables")
                            .size(12.0)
                            .color(self.theme_colors.accent_dim),
                    );
                });
            } else {
                spectrum_view::show_spectrum_view(
                    ui,
                    &self.collection,
                    self.viewport.as_ref(),
                    &mut self.view_state,
                    &self.theme_colors,
                );
            }
        });

        // ── About Dialog ──
        if self.show_about {
            egui::Window::new("About")
                .open(&mut self.show_about)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading("🔬 FT-IR Spectral Viewer");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(10.0);
                    ui.label("Built with Rust + egui");
                    ui.add_space(10.0);
                    ui.label("Features:");
                    ui.label("• Overlay any number of reflectance spectra");
                    ui.label("• Per-spectrum visibility and color");
                    ui.label("• Snap or free cursor with live readout");
                    ui.label("• Auto-ranging zoom with rectangle select");
                });
        }

        // Handle keyboard shortcuts
        let mut open_requested = false;
        ctx.input(|i| {
            if (i.modifiers.ctrl || i.modifiers.command) && i.key_pressed(egui::Key::O) {
                open_requested = true;
            }
        });
        if open_requested {
            if let Some(paths) = toolbar::open_files_dialog() {
                self.load_paths(paths);
            }
        }
    }
}
