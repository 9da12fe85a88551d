/// Overlay plot — visible spectra with the crosshair and cursor readout

use egui_plot::{
    Corner, HLine, Legend, Line, MarkerShape, Plot, PlotBounds, PlotPoints, PlotUi, Points, Text,
    VLine,
};

use crate::data::spectrum::SpectrumCollection;
use crate::gui::theme::ThemeColors;
use crate::view::cursor::{CursorMode, CursorState, CursorTracker};
use crate::view::viewport::Viewport;

/// State for the spectrum plot
pub struct SpectrumViewState {
    /// Apply the computed viewport on the next frame
    pub auto_scale: bool,
    /// Incremented on auto-scale to give the plot a fresh ID (resets zoom)
    pub plot_generation: u32,
    pub tracker: CursorTracker,
}

impl Default for SpectrumViewState {
    fn default() -> Self {
        Self {
            auto_scale: true,
            plot_generation: 0,
            tracker: CursorTracker::new(CursorMode::Snap),
        }
    }
}

/// Show the overlay plot for every visible spectrum
pub fn show_spectrum_view(
    ui: &mut egui::Ui,
    collection: &SpectrumCollection,
    viewport: Option<&Viewport>,
    state: &mut SpectrumViewState,
    colors: &ThemeColors,
) {
    // Controls above the plot
    ui.horizontal(|ui| {
        if ui.button("⊞ Auto Scale").clicked() {
            state.auto_scale = true;
        }
        ui.separator();
        ui.label(title_text(collection));
    });

    let visible_count = collection.visible_count();

    // Bump generation to reset internal plot view state on auto-scale
    let apply_bounds = if state.auto_scale {
        state.plot_generation = state.plot_generation.wrapping_add(1);
        viewport.copied()
    } else {
        None
    };
    state.auto_scale = false;

    let mut plot = Plot::new(format!("spectrum_overlay_{}", state.plot_generation))
        .height(ui.available_height() - 4.0)
        .x_axis_label("Wavelength (μm)")
        .y_axis_label("Reflectance")
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .allow_boxed_zoom(true)
        .show_grid([true, true]);
    if visible_count > 1 {
        plot = plot.legend(
            Legend::default()
                .position(Corner::LeftTop)
                .background_alpha(0.75),
        );
    }

    // Snapshot the overlay; the tracker itself is refreshed after layout,
    // once this frame's plot transform is known.
    let cursor_state = state.tracker.state().clone();
    let anchor = state.tracker.anchor();
    let mode = state.tracker.mode;
    let crosshair_color = colors.crosshair;
    let readout_text_color = colors.readout_text;
    let readout_bg = colors.readout_bg;

    let plot_resp = plot.show(ui, |plot_ui: &mut PlotUi| {
        if let Some(vp) = apply_bounds {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [vp.x_range.0, vp.y_range.0],
                [vp.x_range.1, vp.y_range.1],
            ));
        }

        for (_, record) in collection.visible_records() {
            let points: PlotPoints = record
                .wavelengths()
                .iter()
                .zip(record.reflectances().iter())
                .map(|(&x, &y)| [x, y])
                .collect();
            plot_ui.line(
                Line::new(points)
                    .name(&record.filename)
                    .color(record.color)
                    .width(1.5),
            );
        }

        if let Some([cx, cy]) = cursor_state.crosshair {
            plot_ui.vline(VLine::new(cx).color(crosshair_color).width(1.0));
            match mode {
                CursorMode::Snap => {
                    // Highlight the snapped sample on the reference series
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[cx, cy]]))
                            .color(crosshair_color)
                            .radius(4.0)
                            .shape(MarkerShape::Circle),
                    );
                }
                CursorMode::Free => {
                    plot_ui.hline(HLine::new(cy).color(crosshair_color).width(1.0));
                }
            }
        }

        // Readout box pinned to the viewport's top-right corner
        let readout = readout_text(&cursor_state, mode);
        if !readout.is_empty() {
            plot_ui.text(
                Text::new(
                    anchor.into(),
                    egui::RichText::new(readout)
                        .size(13.0)
                        .strong()
                        .color(readout_text_color)
                        .background_color(readout_bg),
                )
                .anchor(egui::Align2::RIGHT_TOP),
            );
        }
    });

    // Track this frame's axis ranges, then feed the pointer (if any)
    let bounds = plot_resp.transform.bounds();
    state.tracker.on_viewport_changed(
        (bounds.min()[0], bounds.max()[0]),
        (bounds.min()[1], bounds.max()[1]),
        collection.is_empty(),
    );
    if let Some(pos) = plot_resp.response.hover_pos() {
        let coord = plot_resp.transform.value_from_position(pos);
        state.tracker.on_pointer_move(collection, coord.x, coord.y);
    }
}

fn title_text(collection: &SpectrumCollection) -> String {
    let total = collection.len();
    let visible = collection.visible_count();
    if total == 1 {
        match collection.first() {
            Some(record) => format!("Reflectance Spectrum: {}", record.filename),
            None => "Reflectance Spectrum".to_string(),
        }
    } else if visible > 0 {
        format!("Reflectance Spectra ({}/{} files visible)", visible, total)
    } else {
        format!("Reflectance Spectra ({} files)", total)
    }
}

fn readout_text(state: &CursorState, mode: CursorMode) -> String {
    let Some([x, y]) = state.crosshair else {
        return String::new();
    };
    match mode {
        CursorMode::Snap => {
            let mut lines = vec![format!("Wavelength: {:.5} μm", x)];
            for (filename, value) in &state.readout {
                lines.push(format!("{}: {:.5}", filename, value));
            }
            lines.join("\n")
        }
        CursorMode::Free => format!("x: {:.5} μm   y: {:.5}", x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection_of(n: usize) -> SpectrumCollection {
        let mut collection = SpectrumCollection::new();
        for i in 0..n {
            collection
                .add_series(vec![1.0, 2.0], vec![0.2, 0.3], format!("s{}.dpt", i))
                .unwrap();
        }
        collection
    }

    #[test]
    fn test_title_single_file_names_it() {
        let collection = collection_of(1);
        assert_eq!(title_text(&collection), "Reflectance Spectrum: s0.dpt");
    }

    #[test]
    fn test_title_counts_visible_files() {
        let mut collection = collection_of(3);
        collection.set_visible(2, false);
        assert_eq!(
            title_text(&collection),
            "Reflectance Spectra (2/3 files visible)"
        );
        collection.set_visible(0, false);
        collection.set_visible(1, false);
        assert_eq!(title_text(&collection), "Reflectance Spectra (3 files)");
    }

    #[test]
    fn test_readout_snap_lists_series_values() {
        let state = CursorState {
            crosshair: Some([2.0, 0.3]),
            readout: vec![("a.dpt".to_string(), 0.3), ("b.dpt".to_string(), 0.6)],
        };
        let text = readout_text(&state, CursorMode::Snap);
        assert_eq!(
            text,
            "Wavelength: 2.00000 μm\na.dpt: 0.30000\nb.dpt: 0.60000"
        );
    }

    #[test]
    fn test_readout_free_reports_raw_coordinates() {
        let state = CursorState {
            crosshair: Some([2.125, 0.4375]),
            readout: Vec::new(),
        };
        let text = readout_text(&state, CursorMode::Free);
        assert_eq!(text, "x: 2.12500 μm   y: 0.43750");
    }

    #[test]
    fn test_readout_empty_without_crosshair() {
        assert!(readout_text(&CursorState::default(), CursorMode::Snap).is_empty());
    }
}
