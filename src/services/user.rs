// src/services/user.rs - Account business logic
use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use log::{info, warn};
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::{LoginDto, SignupDto, User};
use crate::repositories::UserRepositoryTrait;

type Result<T> = std::result::Result<T, ServiceError>;

#[async_trait]
pub trait UserServiceTrait {
    /// Registers a new account. The password is stored as an argon2 hash.
    async fn signup(&self, dto: SignupDto) -> Result<User>;

    /// Authenticates by email and password. Fails with `NotFound` when the
    /// email is unknown or the password does not match, exactly like the
    /// lookup miss it replaces.
    async fn login(&self, dto: LoginDto) -> Result<User>;
}

pub struct UserService<T: UserRepositoryTrait> {
    repository: Arc<T>,
}

impl<T: UserRepositoryTrait> UserService<T> {
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<T: UserRepositoryTrait + Send + Sync> UserServiceTrait for UserService<T> {
    async fn signup(&self, dto: SignupDto) -> Result<User> {
        if let Err(e) = dto.validate() {
            return Err(ServiceError::ValidationError(e.to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(dto.password.as_bytes(), &salt)
            .map_err(|e| ServiceError::InternalError(format!("Failed to hash password: {}", e)))?
            .to_string();

        let user = self
            .repository
            .save(&dto.name, &dto.email, &password_hash)
            .await?;

        info!("Created user {}", user.id);
        Ok(user)
    }

    async fn login(&self, dto: LoginDto) -> Result<User> {
        let user = match self.repository.find_by_email(&dto.email).await? {
            Some(user) => user,
            None => {
                warn!("Login failed: unknown email");
                return Err(ServiceError::NotFound("User not found".to_string()));
            }
        };

        let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
            ServiceError::InternalError(format!("Failed to parse stored password hash: {}", e))
        })?;

        if Argon2::default()
            .verify_password(dto.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            warn!("Login failed: wrong password for user {}", user.id);
            return Err(ServiceError::NotFound("User not found".to_string()));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::UserRole;
    use crate::repositories::MockUserRepositoryTrait;

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn user_with_password(email: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            email: email.to_string(),
            password_hash: hash(password),
            role: UserRole::Normal,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn signup_hashes_password_before_saving() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_save()
            .withf(|_, _, stored| stored != "p" && stored.starts_with("$argon2"))
            .returning(|name, email, hash| {
                let mut user = user_with_password(email, "ignored");
                user.name = name.to_string();
                user.password_hash = hash.to_string();
                Ok(user)
            });

        let service = UserService::new(Arc::new(repo));
        let user = service
            .signup(SignupDto {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn signup_rejects_empty_fields() {
        let repo = MockUserRepositoryTrait::new();
        let service = UserService::new(Arc::new(repo));

        let result = service
            .signup(SignupDto {
                name: "".to_string(),
                email: "a@x.com".to_string(),
                password: "p".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn login_succeeds_with_signup_credentials() {
        let stored = user_with_password("a@x.com", "p");
        let mut repo = MockUserRepositoryTrait::new();
        let returned = stored.clone();
        repo.expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .returning(move |_| Ok(Some(returned.clone())));

        let service = UserService::new(Arc::new(repo));
        let user = service
            .login(LoginDto {
                email: "a@x.com".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, stored.id);
    }

    #[tokio::test]
    async fn login_fails_with_wrong_password() {
        let stored = user_with_password("a@x.com", "p");
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = UserService::new(Arc::new(repo));
        let result = service
            .login(LoginDto {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn login_fails_with_unknown_email() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repo));
        let result = service
            .login(LoginDto {
                email: "nobody@x.com".to_string(),
                password: "p".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }
}
