pub mod reviews;

pub use reviews::{BookReview, ReviewStore};
