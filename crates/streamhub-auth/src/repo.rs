use crate::error::{AuthError, AuthResult};
use std::collections::HashMap;
use std::sync::RwLock;
use streamhub_commons::{User, UserId, UserPatch};

/// Abstraction over user persistence for authentication flows.
///
/// The session layer only needs these four shapes; it is agnostic to the
/// persistence technology behind them.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by id.
    async fn find_by_id(&self, id: &UserId) -> AuthResult<User>;

    /// Look up a user by username or email, case-insensitively.
    async fn find_by_login(&self, identifier: &str) -> AuthResult<User>;

    /// Insert a new user. The uniqueness constraint on username and
    /// email is enforced here, atomically with the insert; callers rely
    /// on `AuthError::DuplicateUser` rather than a prior existence check.
    async fn create(&self, user: User) -> AuthResult<User>;

    /// Apply a partial update and return the updated record.
    async fn update(&self, id: &UserId, patch: UserPatch) -> AuthResult<User>;
}

/// Map-backed repository.
///
/// The write lock spans the duplicate check and the insert, which is
/// what makes `create` atomic under concurrent registration.
#[derive(Default)]
pub struct InMemoryUserRepo {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> AuthError {
        AuthError::DatabaseError("user store lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: &UserId) -> AuthResult<User> {
        let users = self.users.read().map_err(|_| Self::lock_poisoned())?;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| AuthError::UserNotFound(format!("User '{}' not found", id)))
    }

    async fn find_by_login(&self, identifier: &str) -> AuthResult<User> {
        let needle = identifier.trim().to_lowercase();
        let users = self.users.read().map_err(|_| Self::lock_poisoned())?;
        users
            .values()
            .find(|u| u.username.as_str() == needle || u.email == needle)
            .cloned()
            .ok_or_else(|| AuthError::UserNotFound(format!("User '{}' not found", identifier)))
    }

    async fn create(&self, user: User) -> AuthResult<User> {
        let mut users = self.users.write().map_err(|_| Self::lock_poisoned())?;

        let duplicate = users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if duplicate {
            return Err(AuthError::DuplicateUser);
        }

        users.insert(user.user_id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> AuthResult<User> {
        let mut users = self.users.write().map_err(|_| Self::lock_poisoned())?;
        let user = users
            .get_mut(id)
            .ok_or_else(|| AuthError::UserNotFound(format!("User '{}' not found", id)))?;
        user.apply_patch(patch);
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamhub_commons::UserName;

    fn user(id: &str, username: &str, email: &str) -> User {
        User::new(
            UserId::new(id),
            UserName::new(username),
            email,
            "Test User",
            "$2b$04$hash",
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepo::new();
        repo.create(user("u1", "alice", "alice@example.com"))
            .await
            .unwrap();

        let by_id = repo.find_by_id(&UserId::new("u1")).await.unwrap();
        assert_eq!(by_id.username.as_str(), "alice");

        let by_name = repo.find_by_login("alice").await.unwrap();
        assert_eq!(by_name.user_id, UserId::new("u1"));

        let by_email = repo.find_by_login("alice@example.com").await.unwrap();
        assert_eq!(by_email.user_id, UserId::new("u1"));
    }

    #[tokio::test]
    async fn test_find_by_login_is_case_insensitive() {
        let repo = InMemoryUserRepo::new();
        repo.create(user("u1", "alice", "alice@example.com"))
            .await
            .unwrap();

        assert!(repo.find_by_login("ALICE").await.is_ok());
        assert!(repo.find_by_login("Alice@Example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryUserRepo::new();
        repo.create(user("u1", "alice", "alice@example.com"))
            .await
            .unwrap();

        let err = repo
            .create(user("u2", "alice", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateUser);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_regardless_of_username() {
        let repo = InMemoryUserRepo::new();
        repo.create(user("u1", "alice", "alice@example.com"))
            .await
            .unwrap();

        let err = repo
            .create(user("u2", "bob", "alice@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateUser);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepo::new();
        let err = repo
            .update(&UserId::new("nope"), UserPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound(_)));
    }
}
