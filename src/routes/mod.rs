pub mod health;
pub mod lookups;
pub mod players;
