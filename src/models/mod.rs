pub mod user;
pub mod refresh_token;
pub mod booking;
pub mod booking_history;
pub mod review;
pub mod review_history;
pub mod menu;

pub use user::User;
pub use refresh_token::RefreshToken;
pub use booking::Booking;
pub use booking_history::BookingHistory;
pub use review::{Review, ReviewWithAuthor};
pub use review_history::ReviewHistory;
pub use menu::{MenuCategory, MenuItem};
