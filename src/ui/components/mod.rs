pub mod picker_grid;
pub mod preview_bar;
pub mod tab_bar;
