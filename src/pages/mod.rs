pub mod bubbles;
pub mod charts;
pub mod home;
pub mod not_found;
