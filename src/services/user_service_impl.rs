//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;

use crate::api::types::UserDto;
use crate::db::{NewUser, Store, UserUpdate};
use crate::services::user_service::{
    CreateUserRequest, UpdateUserRequest, UserError, UserService,
};

pub struct SeaOrmUserService {
    store: Store,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Fails when `national_id` belongs to someone other than `except`.
    async fn ensure_national_id_free(
        &self,
        national_id: &str,
        except: Option<i32>,
    ) -> Result<(), UserError> {
        match self.store.get_user_by_national_id(national_id).await? {
            Some(existing) if Some(existing.id) != except => {
                Err(UserError::Conflict(national_id.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn list(&self) -> Result<Vec<UserDto>, UserError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    async fn get(&self, id: i32) -> Result<UserDto, UserError> {
        self.store
            .get_user(id)
            .await?
            .map(UserDto::from)
            .ok_or(UserError::NotFound(id))
    }

    async fn create(&self, request: CreateUserRequest) -> Result<UserDto, UserError> {
        let national_id = request.national_id.trim().to_string();
        self.ensure_national_id_free(&national_id, None).await?;

        let user = self
            .store
            .create_user(NewUser {
                national_id,
                name: request.name.trim().to_string(),
                email: request.email.trim().to_string(),
                phone: request.phone.trim().to_string(),
                user_type: request.user_type,
            })
            .await?;

        Ok(user.into())
    }

    async fn update(&self, id: i32, request: UpdateUserRequest) -> Result<UserDto, UserError> {
        let current = self
            .store
            .get_user(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let national_id = request.national_id.trim().to_string();
        self.ensure_national_id_free(&national_id, Some(id)).await?;

        let user = self
            .store
            .update_user(
                id,
                UserUpdate {
                    national_id,
                    name: request.name.trim().to_string(),
                    email: request.email.trim().to_string(),
                    phone: request
                        .phone
                        .map_or(current.phone, |phone| phone.trim().to_string()),
                    user_type: request.user_type.unwrap_or(current.user_type),
                    blocked: request.blocked.unwrap_or(current.blocked),
                },
            )
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    async fn delete(&self, id: i32) -> Result<(), UserError> {
        if self.store.delete_user(id).await? {
            Ok(())
        } else {
            Err(UserError::NotFound(id))
        }
    }
}
