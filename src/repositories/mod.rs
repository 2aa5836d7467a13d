//! Storage access layer, one repository per aggregate

pub mod booking_repository;
pub mod car_repository;
pub mod dealership_repository;
pub mod user_repository;
pub mod wishlist_repository;
