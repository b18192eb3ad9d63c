pub mod card;
pub mod controller;
pub mod deck;
pub mod hand;
pub mod player;
pub mod rank;
pub mod score;
pub mod suit;
pub mod trick;
