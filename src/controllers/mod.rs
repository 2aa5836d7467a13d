//! Business logic, one controller per surface

pub mod admin_controller;
pub mod booking_controller;
pub mod car_controller;
pub mod settings_controller;
pub mod wishlist_controller;
