//! Accounts, credentials, and sessions.
//!
//! Passwords are hashed with argon2id in PHC string format. Logging in
//! verifies the credential and issues an opaque session token; the token is
//! resolved back to a verified [`AuthUser`] on every request. A missing or
//! expired token is always `Unauthenticated`, never `Forbidden`, so callers
//! can tell the two apart.

use crate::{
    core::authz::{self, Action, AuthUser, Resource, Role},
    entities::{Session, User, role, session, user},
    errors::{Error, Result},
};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// Hashes a password with argon2id and the library's current defaults.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal {
            message: format!("password hashing failed: {e}"),
        })
}

/// Verifies a password against a stored PHC hash. A mismatch is `Ok(false)`;
/// only a malformed hash or a hashing failure is an error.
pub fn verify_password(hash: &str, password: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| Error::Internal {
        message: format!("stored password hash is malformed: {e}"),
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal {
            message: format!("password verification failed: {e}"),
        }),
    }
}

/// What a successful login returns to the caller.
#[derive(Clone, Debug, Serialize)]
pub struct LoginOutcome {
    /// Opaque bearer token for subsequent requests
    pub token: String,
    /// Display name of the logged-in user
    pub nombre: String,
    /// Role name, for the client's navigation shell
    pub role: String,
}

/// Verifies a username/password pair and issues a session token.
///
/// Unknown usernames and wrong passwords produce the same error message, so
/// the endpoint does not leak which usernames exist.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    session_ttl: Duration,
) -> Result<LoginOutcome> {
    let bad_credentials = || Error::Unauthenticated {
        message: "incorrect username or password".to_string(),
    };

    let Some((user, Some(role))) = User::find()
        .filter(user::Column::Username.eq(username))
        .find_also_related(crate::entities::Role)
        .one(db)
        .await?
    else {
        warn!(username, "login attempt for unknown user");
        return Err(bad_credentials());
    };

    if !verify_password(&user.password, password)? {
        warn!(username, "login attempt with wrong password");
        return Err(bad_credentials());
    }

    let now = Utc::now();
    let session = session::ActiveModel {
        token: Set(Uuid::new_v4().to_string()),
        user_id: Set(user.id),
        created_at: Set(now),
        expires_at: Set(now + session_ttl),
    }
    .insert(db)
    .await?;

    info!(username, "login successful");
    Ok(LoginOutcome {
        token: session.token,
        nombre: user.nombre,
        role: role.nombre,
    })
}

/// Resolves a bearer token to the caller's verified identity.
///
/// An unknown role name on the user yields `role: None`: the caller is
/// authenticated but the gate will deny everything (fail closed).
pub async fn resolve_token(db: &DatabaseConnection, token: &str) -> Result<AuthUser> {
    let stale = || Error::Unauthenticated {
        message: "invalid or expired session".to_string(),
    };

    let session = Session::find_by_id(token).one(db).await?.ok_or_else(stale)?;
    if session.expires_at < Utc::now() {
        return Err(stale());
    }

    let user = User::find_by_id(session.user_id)
        .one(db)
        .await?
        .ok_or_else(stale)?;
    let role = crate::entities::Role::find_by_id(user.role_id).one(db).await?;

    Ok(AuthUser {
        id: user.id,
        username: user.username,
        role: role.as_ref().and_then(|r| Role::from_name(&r.nombre)),
    })
}

/// Changes the caller's own password, requiring the previous credential.
pub async fn change_password(
    db: &DatabaseConnection,
    caller_id: i64,
    old_password: &str,
    new_password: &str,
) -> Result<()> {
    if new_password.is_empty() {
        return Err(Error::InvalidArgument {
            message: "new password must not be empty".to_string(),
        });
    }

    let user = User::find_by_id(caller_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: format!("usuario {caller_id}"),
        })?;

    if !verify_password(&user.password, old_password)? {
        return Err(Error::Unauthenticated {
            message: "old password is incorrect".to_string(),
        });
    }

    let hash = hash_password(new_password)?;
    let mut user: user::ActiveModel = user.into();
    user.password = Set(hash);
    user.update(db).await?;
    Ok(())
}

/// Caller-supplied fields for creating a user.
#[derive(Clone, Debug, Deserialize)]
pub struct NewUserInput {
    /// Login name, unique
    pub username: String,
    /// Display name
    pub nombre: String,
    /// Initial password (hashed before storage)
    pub password: String,
    /// Role to assign
    pub role_id: i64,
}

/// A user as shown to administrators: no credential, role name joined in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserView {
    /// User id
    pub id: i64,
    /// Login name
    pub username: String,
    /// Display name
    pub nombre: String,
    /// Role name
    pub role: String,
    /// Role id, for edit forms
    pub role_id: i64,
}

/// Creates a user. Administrator-only.
pub async fn create_user(
    db: &DatabaseConnection,
    caller: &AuthUser,
    input: NewUserInput,
) -> Result<UserView> {
    authz::authorize(caller, Resource::Users, Action::Create)?;

    if input.username.trim().is_empty() || input.nombre.trim().is_empty() || input.password.is_empty()
    {
        return Err(Error::InvalidArgument {
            message: "username, nombre, and password are required".to_string(),
        });
    }

    let role = crate::entities::Role::find_by_id(input.role_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::InvalidArgument {
            message: format!("unknown role_id {}", input.role_id),
        })?;

    let taken = User::find()
        .filter(user::Column::Username.eq(input.username.trim()))
        .one(db)
        .await?
        .is_some();
    if taken {
        return Err(Error::Conflict {
            message: format!("username '{}' is already taken", input.username.trim()),
        });
    }

    let created = user::ActiveModel {
        username: Set(input.username.trim().to_string()),
        nombre: Set(input.nombre.trim().to_string()),
        password: Set(hash_password(&input.password)?),
        role_id: Set(input.role_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(UserView {
        id: created.id,
        username: created.username,
        nombre: created.nombre,
        role: role.nombre,
        role_id: created.role_id,
    })
}

/// Lists all users with their role names. Administrator-only.
pub async fn list_users(db: &DatabaseConnection, caller: &AuthUser) -> Result<Vec<UserView>> {
    authz::authorize(caller, Resource::Users, Action::Read)?;

    let rows = User::find()
        .find_also_related(crate::entities::Role)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(user, role)| UserView {
            id: user.id,
            username: user.username,
            nombre: user.nombre,
            role: role.map(|r| r.nombre).unwrap_or_default(),
            role_id: user.role_id,
        })
        .collect())
}

/// Deletes a user and their sessions. Administrator-only.
pub async fn delete_user(db: &DatabaseConnection, caller: &AuthUser, id: i64) -> Result<()> {
    authz::authorize(caller, Resource::Users, Action::Delete)?;

    let user = User::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: format!("usuario {id}"),
        })?;

    // Sessions reference the user; drop them first.
    Session::delete_many()
        .filter(session::Column::UserId.eq(id))
        .exec(db)
        .await?;
    user.delete(db).await?;
    Ok(())
}

/// Lists the seeded roles. Administrator-only.
pub async fn list_roles(db: &DatabaseConnection, caller: &AuthUser) -> Result<Vec<role::Model>> {
    authz::authorize(caller, Resource::Users, Action::Read)?;

    crate::entities::Role::find().all(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::authz::Role as RoleName,
        test_utils::{caller_with_role, create_test_user, setup_test_db},
    };

    #[test]
    fn test_hash_and_verify_round_trip() -> Result<()> {
        let hash = hash_password("hunter2")?;
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "hunter2")?);
        assert!(!verify_password(&hash, "hunter3")?);
        Ok(())
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let err = verify_password("not-a-hash", "anything").unwrap_err();
        assert!(matches!(err, Error::Internal { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_and_resolve_token() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "marta", "secreto", RoleName::Contador).await?;

        let outcome = authenticate(&db, "marta", "secreto", Duration::hours(1)).await?;
        assert_eq!(outcome.role, RoleName::Contador.name());

        let caller = resolve_token(&db, &outcome.token).await?;
        assert_eq!(caller.id, user.id);
        assert_eq!(caller.username, "marta");
        assert_eq!(caller.role, Some(RoleName::Contador));
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthenticated() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "marta", "secreto", RoleName::Contador).await?;

        let err = authenticate(&db, "marta", "incorrecto", Duration::hours(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated { .. }));

        // Unknown usernames produce the same error kind.
        let err = authenticate(&db, "nadie", "secreto", Duration::hours(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "marta", "secreto", RoleName::Contador).await?;

        let outcome = authenticate(&db, "marta", "secreto", Duration::seconds(-1)).await?;
        let err = resolve_token(&db, &outcome.token).await.unwrap_err();
        assert!(matches!(err, Error::Unauthenticated { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let err = resolve_token(&db, "no-such-token").await.unwrap_err();
        assert!(matches!(err, Error::Unauthenticated { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_change_password_requires_old_credential() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "marta", "secreto", RoleName::Contador).await?;

        let err = change_password(&db, user.id, "incorrecto", "nuevo")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated { .. }));

        change_password(&db, user.id, "secreto", "nuevo").await?;
        authenticate(&db, "marta", "nuevo", Duration::hours(1)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = caller_with_role(1, RoleName::Administrador);
        create_test_user(&db, "marta", "secreto", RoleName::Contador).await?;

        let err = create_user(
            &db,
            &admin,
            NewUserInput {
                username: "marta".to_string(),
                nombre: "Otra Marta".to_string(),
                password: "x".to_string(),
                role_id: 2,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_user_administration_is_admin_only() -> Result<()> {
        let db = setup_test_db().await?;
        let contador = caller_with_role(2, RoleName::Contador);

        let err = list_users(&db, &contador).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));

        let err = delete_user(&db, &contador, 1).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_drops_sessions() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = caller_with_role(1, RoleName::Administrador);
        let user = create_test_user(&db, "marta", "secreto", RoleName::Contador).await?;
        let outcome = authenticate(&db, "marta", "secreto", Duration::hours(1)).await?;

        delete_user(&db, &admin, user.id).await?;
        let err = resolve_token(&db, &outcome.token).await.unwrap_err();
        assert!(matches!(err, Error::Unauthenticated { .. }));
        Ok(())
    }
}
