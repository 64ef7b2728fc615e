pub mod listing;
pub mod model;

// Re-export commonly used types/functions for consumers
pub use listing::{listing, render_text, Line};
pub use model::{load_raw_bin, Image};
