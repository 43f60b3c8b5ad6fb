pub mod circles;
pub mod health;
pub mod plans;
pub mod streaks;
