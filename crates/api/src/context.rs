use stockroom_auth::UserRole;
use stockroom_core::UserId;

/// Authenticated actor attached to every protected request.
///
/// The role here comes from the stored account at request time, not from the
/// token, so a role change takes effect on the next request rather than at
/// the next login.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ActorContext {
    user_id: UserId,
    role: UserRole,
}

impl ActorContext {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}
