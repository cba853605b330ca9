mod visuals;
pub use visuals::Visuals;
