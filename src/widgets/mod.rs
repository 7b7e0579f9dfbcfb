// Reusable UI widgets

pub mod avatar;

pub use avatar::Avatar;
