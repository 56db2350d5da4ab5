pub mod group_dto;
pub mod group_entity;
pub mod user_entity;
