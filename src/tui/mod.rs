pub mod setup_panel;
