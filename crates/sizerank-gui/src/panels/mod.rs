/// Central panels.

pub mod results_panel;
