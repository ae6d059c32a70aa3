pub mod board_view;
pub mod console;
