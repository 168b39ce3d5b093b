pub mod app;
pub mod pattern_view;
pub mod trace_panel;
