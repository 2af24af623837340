pub mod booking;
pub mod credential;
pub mod driver;
pub mod estimate;
