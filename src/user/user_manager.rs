use super::{
    auth::PasswordHasherKind, AuthToken, AuthTokenValue, UserAuthCredentials,
    UserAuthCredentialsStore, UserAuthTokenStore, UserStore, UsernamePasswordCredentials,
};
use anyhow::{bail, Context, Result};
use std::time::SystemTime;
use tracing::{debug, info};

pub struct UserManager {
    user_store: Box<dyn UserStore>,
}

impl UserManager {
    pub fn new(user_store: Box<dyn UserStore>) -> Self {
        Self { user_store }
    }

    pub fn add_user<T: AsRef<str>>(&self, user_handle: T) -> Result<usize> {
        let user_handle = user_handle.as_ref();
        if user_handle.trim().is_empty() {
            bail!("The user handle cannot be empty.")
        }
        if self.user_store.get_user_id(user_handle)?.is_some() {
            bail!("User handle already exists.");
        }

        let user_id = self.user_store.create_user(user_handle)?;
        info!("Created user {} with id {}", user_handle, user_id);
        Ok(user_id)
    }

    pub fn delete_user(&self, user_handle: &str) -> Result<()> {
        if !self.user_store.delete_user(user_handle)? {
            bail!("User with handle {} not found.", user_handle);
        }
        info!("Deleted user {}", user_handle);
        Ok(())
    }

    pub fn get_all_user_handles(&self) -> Result<Vec<String>> {
        self.user_store.get_all_user_handles()
    }

    pub fn get_user_handle(&self, user_id: usize) -> Result<Option<String>> {
        self.user_store.get_user_handle(user_id)
    }

    pub fn get_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>> {
        self.user_store.get_user_auth_token(value)
    }

    pub fn update_auth_token_last_used(&self, value: &AuthTokenValue) -> Result<()> {
        self.user_store
            .update_user_auth_token_last_used_timestamp(value)
    }

    pub fn generate_auth_token(&self, credentials: &UserAuthCredentials) -> Result<AuthToken> {
        let token = AuthToken {
            user_id: credentials.user_id,
            value: AuthTokenValue::generate(),
            created: SystemTime::now(),
            last_used: None,
        };
        self.user_store.add_user_auth_token(token.clone())?;
        Ok(token)
    }

    /// Checks a handle and password pair, returning a freshly issued token
    /// when they match. Returns Ok(None) on any mismatch.
    pub fn login(&self, user_handle: &str, password: &str) -> Result<Option<AuthToken>> {
        let Some(credentials) = self.user_store.get_user_auth_credentials(user_handle)? else {
            debug!("Login attempt for unknown user {}", user_handle);
            return Ok(None);
        };
        let Some(password_credentials) = &credentials.username_password else {
            debug!("User {} has no password credentials", user_handle);
            return Ok(None);
        };

        let verified = password_credentials
            .hasher
            .verify(password, &password_credentials.hash)?;
        self.user_store
            .touch_password_credentials(credentials.user_id, verified)?;
        if !verified {
            return Ok(None);
        }

        Ok(Some(self.generate_auth_token(&credentials)?))
    }

    fn create_hashed_password(
        user_id: usize,
        password: &str,
    ) -> Result<UsernamePasswordCredentials> {
        let hasher = PasswordHasherKind::Argon2;
        let salt = hasher.generate_b64_salt()?;
        let hash = hasher.hash(password.as_bytes(), &salt)?;
        Ok(UsernamePasswordCredentials {
            user_id,
            salt,
            hash,
            hasher,
            created: SystemTime::now(),
            last_tried: None,
            last_used: None,
        })
    }

    /// Sets the user's password, creating the password credentials if the
    /// user had none.
    pub fn set_password(&self, user_handle: &str, password: &str) -> Result<()> {
        if password.is_empty() {
            bail!("The password cannot be empty.");
        }
        let mut credentials = self
            .user_store
            .get_user_auth_credentials(user_handle)?
            .with_context(|| format!("User with handle {} not found.", user_handle))?;
        credentials.username_password =
            Some(Self::create_hashed_password(credentials.user_id, password)?);
        self.user_store.update_user_auth_credentials(credentials)
    }

    pub fn delete_auth_token(&self, user_id: usize, token_value: &AuthTokenValue) -> Result<()> {
        let removed = self.user_store.delete_user_auth_token(token_value)?;
        match removed {
            Some(removed) => {
                if removed.user_id == user_id {
                    Ok(())
                } else {
                    self.user_store.add_user_auth_token(removed.clone())?;
                    bail!(
                        "Tried to delete auth token of user {}, but the authenticated user was {}.",
                        removed.user_id,
                        user_id
                    )
                }
            }
            None => bail!("Did not find auth token"),
        }
    }

    pub fn get_user_tokens(&self, user_handle: &str) -> Result<Vec<AuthToken>> {
        self.user_store.get_all_user_auth_tokens(user_handle)
    }
}
