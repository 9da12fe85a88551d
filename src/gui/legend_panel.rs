/// Legend panel — one row per loaded spectrum with a color swatch and a
/// visibility checkbox, in load order.

use egui::Color32;

use crate::data::spectrum::SpectrumCollection;

/// What the legend changed this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendAction {
    None,
    /// A visibility checkbox was toggled; the viewport needs a recompute
    VisibilityChanged,
    /// Only a curve color changed
    ColorChanged,
}

/// Render the legend list and return what changed
pub fn show_legend_panel(ui: &mut egui::Ui, collection: &mut SpectrumCollection) -> LegendAction {
    let mut action = LegendAction::None;

    ui.heading("Spectra");
    ui.separator();

    if collection.is_empty() {
        ui.weak("No spectra loaded");
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for index in 0..collection.len() {
                let (filename, color, visible) = match collection.get(index) {
                    Some(record) => (record.filename.clone(), record.color, record.visible),
                    None => continue,
                };

                ui.horizontal(|ui| {
                    let mut rgb = [color.r(), color.g(), color.b()];
                    if ui
                        .color_edit_button_srgb(&mut rgb)
                        .on_hover_text("Change color")
                        .changed()
                    {
                        collection.set_color(index, Color32::from_rgb(rgb[0], rgb[1], rgb[2]));
                        if action == LegendAction::None {
                            action = LegendAction::ColorChanged;
                        }
                    }

                    let mut shown = visible;
                    let response = ui.checkbox(&mut shown, truncated(&filename, 28));
                    if response.changed() {
                        collection.set_visible(index, shown);
                        action = LegendAction::VisibilityChanged;
                    }
                    response.on_hover_text(&filename);
                });
            }
        });

    action
}

/// Shorten long filenames for the row label; the full name stays in the tooltip.
fn truncated(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let head: String = name.chars().take(max_chars - 1).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_keeps_short_names() {
        assert_eq!(truncated("basalt.dpt", 28), "basalt.dpt");
    }

    #[test]
    fn test_truncated_shortens_long_names() {
        let long = "a_very_long_instrument_export_name_2024-11-03.dpt";
        let label = truncated(long, 28);
        assert_eq!(label.chars().count(), 28);
        assert!(label.ends_with('…'));
    }
}
