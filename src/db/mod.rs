pub mod users;
pub mod refresh_tokens;
pub mod bookings;
pub mod reviews;
pub mod history;
pub mod menu;
