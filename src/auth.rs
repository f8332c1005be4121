use tracing::warn;

use crate::clients::UserDirectory;
use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::models::{Room, User, UserRole};

/// Resolve the caller of a request through the user directory
///
/// # Returns
/// * `Err(Unauthenticated)` if the request carries no caller id
/// * `Err(NotFound)` if the directory does not know the caller
pub async fn resolve_caller(users: &dyn UserDirectory, ctx: &RequestContext) -> AppResult<User> {
    let caller_id = ctx.caller()?;
    users.find_by_id(ctx, caller_id).await
}

/// Require `user` to have exactly `role`
pub fn require_role(user: &User, role: UserRole) -> AppResult<()> {
    if user.role != role {
        warn!(
            "User {} has role {}, {} required",
            user.id,
            user.role.as_str(),
            role.as_str()
        );
        return Err(AppError::Unauthorized(format!(
            "User {} is not a {}",
            user.id,
            role.as_str()
        )));
    }
    Ok(())
}

/// Require `user` to be the host owning `room`
pub fn require_owner(user: &User, room: &Room) -> AppResult<()> {
    if !room.is_owned_by(user.id) {
        warn!("User {} does not own room {}", user.id, room.id);
        return Err(AppError::Unauthorized(format!(
            "Room {} is not owned by user {}",
            room.id, user.id
        )));
    }
    Ok(())
}

/// Resolve the caller and require `role` in one step
pub async fn authorize(
    users: &dyn UserDirectory,
    ctx: &RequestContext,
    role: UserRole,
) -> AppResult<User> {
    let user = resolve_caller(users, ctx).await?;
    require_role(&user, role)?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: String::new(),
            email: String::new(),
            name: String::new(),
            surname: String::new(),
            address: String::new(),
            role,
        }
    }

    fn room(host_id: i64) -> Room {
        Room {
            id: 1,
            host_id,
            name: "r".into(),
            description: String::new(),
            address: "a".into(),
            min_guests: 1,
            max_guests: 2,
            photos: vec![],
            commodities: vec![],
            availability_list_id: None,
            price_list_id: None,
            deleted: false,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&user(1, UserRole::Host), UserRole::Host).is_ok());
        let err = require_role(&user(1, UserRole::Guest), UserRole::Host).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    struct Directory(Vec<User>);

    #[async_trait::async_trait]
    impl UserDirectory for Directory {
        async fn find_by_id(&self, _ctx: &RequestContext, id: i64) -> AppResult<User> {
            self.0
                .iter()
                .find(|user| user.id == id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
        }
    }

    #[test]
    fn test_authorize() {
        let users = Directory(vec![user(1, UserRole::Host), user(2, UserRole::Guest)]);

        let host = tokio_test::block_on(authorize(&users, &RequestContext::for_caller(1), UserRole::Host)).unwrap();
        assert_eq!(host.id, 1);

        let err = tokio_test::block_on(authorize(&users, &RequestContext::for_caller(2), UserRole::Host)).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = tokio_test::block_on(authorize(&users, &RequestContext::anonymous(), UserRole::Host)).unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }

    #[test]
    fn test_require_owner() {
        assert!(require_owner(&user(2, UserRole::Host), &room(2)).is_ok());
        assert!(require_owner(&user(3, UserRole::Host), &room(2)).is_err());
    }
}
