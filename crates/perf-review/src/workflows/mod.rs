pub mod review;
pub mod roster;
