pub mod legend_panel;
pub mod spectrum_view;
pub mod theme;
pub mod toolbar;
