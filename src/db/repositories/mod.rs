pub mod cafes;
pub mod coffees;
pub mod reviews;
