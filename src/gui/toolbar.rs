/// Toolbar — top menu bar with file operations and quick actions

use std::path::PathBuf;

/// Actions that can be triggered from the toolbar
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    None,
    OpenFiles,
    ClearAll,
    ResetZoom,
    CursorModeToggle,
    ThemeToggle,
    ShowAbout,
}

/// Render the toolbar and return any triggered action
pub fn show_toolbar(
    ctx: &egui::Context,
    theme_label: &str,
    cursor_label: &str,
    has_data: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File menu
            ui.menu_button("📁 File", |ui| {
                if ui.button("📂 Add Spectra…").clicked() {
                    action = ToolbarAction::OpenFiles;
                    ui.close_menu();
                }
                ui.separator();
                if ui
                    .add_enabled(has_data, egui::Button::new("🗑 Clear All"))
                    .clicked()
                {
                    action = ToolbarAction::ClearAll;
                    ui.close_menu();
                }
            });

            // View menu
            ui.menu_button("🔍 View", |ui| {
                if ui
                    .add_enabled(has_data, egui::Button::new("🔄 Reset Zoom"))
                    .clicked()
                {
                    action = ToolbarAction::ResetZoom;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button(format!("🎯 Cursor: {}", cursor_label)).clicked() {
                    action = ToolbarAction::CursorModeToggle;
                    ui.close_menu();
                }
                if ui.button(format!("🎨 Theme: {}", theme_label)).clicked() {
                    action = ToolbarAction::ThemeToggle;
                    ui.close_menu();
                }
            });

            // Help menu
            ui.menu_button("❓ Help", |ui| {
                if ui.button("ℹ About").clicked() {
                    action = ToolbarAction::ShowAbout;
                    ui.close_menu();
                }
            });

            // Spacer + quick theme toggle
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add(
                        egui::Button::new(egui::RichText::new(theme_label).size(12.0))
                            .corner_radius(12.0),
                    )
                    .clicked()
                {
                    action = ToolbarAction::ThemeToggle;
                }
                ui.separator();
                ui.label(
                    egui::RichText::new("FT-IR Spectral Viewer")
                        .color(egui::Color32::from_rgb(0x70, 0x75, 0x80))
                        .size(12.0),
                );
            });
        });
    });

    action
}

/// Show the multi-select open dialog for spectrum files
pub fn open_files_dialog() -> Option<Vec<PathBuf>> {
    rfd::FileDialog::new()
        .set_title("Open Spectrum Files")
        .add_filter("DPT Spectrum", &["dpt"])
        .add_filter("CSV", &["csv"])
        .add_filter("Text Table", &["txt", "dat"])
        .add_filter("All Files", &["*"])
        .pick_files()
}
