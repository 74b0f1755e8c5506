pub mod ask;
pub mod cards;
pub mod decks;
pub mod sessions;
pub mod translate;
