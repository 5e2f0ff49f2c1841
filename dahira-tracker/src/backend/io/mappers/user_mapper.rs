//! Mappers for converting between account domain models and shared DTOs.

use crate::backend::domain::commands::user::CreateUserCommand;
use crate::backend::domain::models::User as DomainUser;
use shared::{CreateUserRequest, User as SharedUser};

pub struct UserMapper;

impl UserMapper {
    /// The password hash is dropped here and never leaves the backend
    pub fn to_dto(domain: DomainUser) -> SharedUser {
        SharedUser {
            id: domain.id,
            name: domain.name,
            email: domain.email,
            role: domain.role,
            member_id: domain.member_id,
            active: domain.active,
        }
    }

    pub fn to_create_command(request: CreateUserRequest) -> CreateUserCommand {
        CreateUserCommand {
            name: request.name,
            email: request.email,
            password: request.password,
            role: request.role,
            member_id: request.member_id,
        }
    }
}
