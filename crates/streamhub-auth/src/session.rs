//! Session lifecycle orchestration.
//!
//! `SessionService` drives the state machine over a user's session:
//! `Anonymous -> Authenticated` (login), `Authenticated -> Authenticated`
//! (refresh, token pair replaced), `Authenticated -> Anonymous` (logout).
//! The persisted refresh token is the single source of truth for which
//! refresh token is currently live; rotation on every refresh bounds the
//! window in which a stolen refresh token remains usable.

use crate::context::CurrentUser;
use crate::error::{AuthError, AuthResult};
use crate::password;
use crate::repo::UserRepository;
use crate::token::{TokenCodec, TokenPair, TokenPurpose};
use std::sync::Arc;
use streamhub_commons::{User, UserId, UserName, UserPatch};
use streamhub_configs::AuthSettings;

/// Registration payload.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Successful login: the sanitized user plus a fresh token pair.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: CurrentUser,
    pub tokens: TokenPair,
}

/// Orchestrates login, logout, refresh rotation, and password changes
/// over the user repository and the token codec.
pub struct SessionService {
    repo: Arc<dyn UserRepository>,
    codec: TokenCodec,
    settings: AuthSettings,
}

impl SessionService {
    pub fn new(repo: Arc<dyn UserRepository>, codec: TokenCodec, settings: AuthSettings) -> Self {
        Self {
            repo,
            codec,
            settings,
        }
    }

    /// Register a new account.
    ///
    /// Username and email are lowercased before storage so login lookup
    /// is case-insensitive. Uniqueness is enforced by the repository's
    /// create, not by a prior existence check.
    ///
    /// # Errors
    /// - `AuthError::MissingField` for empty required fields
    /// - `AuthError::WeakPassword` if the password fails the policy
    /// - `AuthError::DuplicateUser` if username or email is taken
    pub async fn register(&self, new_user: NewUser) -> AuthResult<CurrentUser> {
        let NewUser {
            username,
            email,
            full_name,
            password,
        } = new_user;

        for (field, value) in [
            ("username", &username),
            ("email", &email),
            ("fullName", &full_name),
            ("password", &password),
        ] {
            if value.trim().is_empty() {
                return Err(AuthError::MissingField(field.to_string()));
            }
        }

        password::validate_password(&password)?;
        let password_hash =
            password::hash_password(&password, Some(self.settings.bcrypt_cost)).await?;

        let user = User::new(
            UserId::generate(),
            UserName::new(username.trim()).to_lowercase(),
            email.trim().to_lowercase(),
            full_name.trim(),
            password_hash,
        );

        let created = self.repo.create(user).await?;
        log::info!("registered user '{}'", created.username);
        Ok(CurrentUser::from(&created))
    }

    /// Authenticate credentials and open a session.
    ///
    /// Both tokens are issued before anything is persisted, so a signing
    /// fault leaves the store untouched; the refresh token is persisted
    /// only on full success.
    ///
    /// # Errors
    /// - `AuthError::UserNotFound` if no account matches the identifier
    /// - `AuthError::InvalidCredentials` if the password is wrong
    ///
    /// Both are mapped to one indistinguishable response at the API
    /// boundary.
    pub async fn login(&self, identifier: &str, pwd: &str) -> AuthResult<LoginOutcome> {
        if identifier.trim().is_empty() {
            return Err(AuthError::MissingField("username or email".to_string()));
        }

        let user = self.repo.find_by_login(identifier).await?;

        let password_ok = password::verify_password(pwd, &user.password_hash).await?;
        if !password_ok {
            log::debug!("wrong password for user '{}'", user.username);
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_pair(&user.user_id)?;
        self.repo
            .update(
                &user.user_id,
                UserPatch {
                    refresh_token: Some(Some(tokens.refresh_token.clone())),
                    ..Default::default()
                },
            )
            .await?;

        log::info!("user '{}' logged in", user.username);
        Ok(LoginOutcome {
            user: CurrentUser::from(&user),
            tokens,
        })
    }

    /// Exchange a refresh token for a brand-new token pair.
    ///
    /// The incoming token must both verify under the refresh secret and
    /// match the persisted value byte-for-byte. The exact-value check
    /// catches replay of an old, already-rotated token even while it is
    /// still cryptographically valid. On success the stored token is
    /// overwritten with the new one (mandatory rotation).
    ///
    /// # Errors
    /// - codec errors (`TokenExpired`, `InvalidSignature`,
    ///   `MalformedToken`) if verification fails
    /// - `AuthError::UserNotFound` if the subject no longer exists
    /// - `AuthError::TokenReused` if the token is not the stored one
    pub async fn refresh(&self, incoming: &str) -> AuthResult<TokenPair> {
        let subject = self.codec.verify(incoming, TokenPurpose::Refresh)?;
        let user = self.repo.find_by_id(&subject).await?;

        match user.refresh_token.as_deref() {
            Some(stored) if stored == incoming => {}
            _ => {
                log::warn!("stale or revoked refresh token presented for '{}'", user.username);
                return Err(AuthError::TokenReused);
            }
        }

        let tokens = self.issue_pair(&user.user_id)?;
        self.repo
            .update(
                &user.user_id,
                UserPatch {
                    refresh_token: Some(Some(tokens.refresh_token.clone())),
                    ..Default::default()
                },
            )
            .await?;

        log::debug!("rotated refresh token for '{}'", user.username);
        Ok(tokens)
    }

    /// Close the user's session by clearing the persisted refresh token.
    ///
    /// Idempotent: logging out an already-logged-out (or deleted) user
    /// succeeds silently.
    pub async fn logout(&self, user_id: &UserId) -> AuthResult<()> {
        match self
            .repo
            .update(
                user_id,
                UserPatch {
                    refresh_token: Some(None),
                    ..Default::default()
                },
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(AuthError::UserNotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Change the account password after verifying the old one.
    ///
    /// The current refresh token is left in place: changing the password
    /// does not force a re-login.
    ///
    /// # Errors
    /// - `AuthError::InvalidCredentials` if `old` does not match
    /// - `AuthError::WeakPassword` if `new` fails the policy
    pub async fn change_password(&self, user_id: &UserId, old: &str, new: &str) -> AuthResult<()> {
        let user = self.repo.find_by_id(user_id).await?;

        let old_ok = password::verify_password(old, &user.password_hash).await?;
        if !old_ok {
            return Err(AuthError::InvalidCredentials);
        }

        password::validate_password(new)?;
        let password_hash = password::hash_password(new, Some(self.settings.bcrypt_cost)).await?;

        self.repo
            .update(
                user_id,
                UserPatch {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?;

        log::info!("password changed for user '{}'", user.username);
        Ok(())
    }

    /// Verify an access token and load its sanitized user.
    ///
    /// Used by the auth guard on every protected request.
    pub async fn authenticate(&self, access_token: &str) -> AuthResult<CurrentUser> {
        let subject = self.codec.verify(access_token, TokenPurpose::Access)?;
        let user = self.repo.find_by_id(&subject).await?;
        Ok(CurrentUser::from(&user))
    }

    fn issue_pair(&self, user_id: &UserId) -> AuthResult<TokenPair> {
        let access = self.codec.issue(user_id, TokenPurpose::Access)?;
        let refresh = self.codec.issue(user_id, TokenPurpose::Refresh)?;
        Ok(TokenPair {
            access_token: access.token,
            access_expires_at: access.expires_at,
            refresh_token: refresh.token,
            refresh_expires_at: refresh.expires_at,
        })
    }
}
