pub mod facility;
pub mod listing;
pub mod property;
