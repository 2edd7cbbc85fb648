pub mod classification;
pub mod implementations;
pub mod optimization;
pub mod traits;
