pub mod estimate;
pub mod health;

pub use estimate::AppState;
