//! Conversions between the persisted employee row and [`EmployeeDto`].

use entity::employees;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

use crate::EmployeeDto;

/// Drops the store-owned timestamps; every other field is carried over.
pub fn to_transfer(model: employees::Model) -> EmployeeDto {
    EmployeeDto {
        id: Some(model.id),
        first_name: model.first_name,
        last_name: model.last_name,
        email: Some(model.email),
        active: Some(model.active),
    }
}

/// Builds a writable row from a DTO. Without an id the row is new; with one it
/// addresses an existing row. Timestamps are left for the store.
pub fn to_active_model(dto: EmployeeDto) -> employees::ActiveModel {
    let id = match dto.id {
        Some(id) => Unchanged(id),
        None => NotSet,
    };
    employees::ActiveModel {
        id,
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        email: Set(dto.email.unwrap_or_default()),
        active: Set(dto.active.unwrap_or(true)),
        created_at: NotSet,
        updated_at: NotSet,
    }
}
