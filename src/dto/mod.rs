//! Request/response DTOs

pub mod ai_dto;
pub mod booking_dto;
pub mod car_dto;
pub mod settings_dto;
pub mod user_dto;
