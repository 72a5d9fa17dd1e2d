pub mod cafe;
pub mod coffee;
pub mod review;

pub use cafe::Cafe;
pub use coffee::Coffee;
pub use review::{Brew, Review, ReviewScores, ReviewSubmission};
