pub mod mask;
pub mod models;
pub mod services;
pub mod square;
pub mod state;
