pub mod book;
pub mod recommendation;
pub mod review;
pub mod user;

pub use book::Book;
pub use recommendation::Recommendation;
pub use review::Review;
pub use user::User;
