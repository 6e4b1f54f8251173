//! Pure decision logic for role and activation changes. No storage access;
//! the aggregate inputs (does any admin exist, how many other active
//! privileged accounts remain) are computed by the caller and passed in.

use thiserror::Error;

use userdesk_shared::user::Role;

use crate::store::UserRecord;

/// Why a mutation was refused. Collapsed to `false` at the public boundary;
/// kept distinct from storage failures so callers and logs never confuse
/// "the rules said no" with "the database broke".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("acting user not found")]
    ActorNotFound,

    #[error("acting user lacks privilege")]
    NotPrivileged,

    #[error("target user not found")]
    TargetNotFound,

    #[error("superadmin accounts are immutable")]
    SuperAdminImmutable,

    #[error("superadmin cannot be granted")]
    SuperAdminGrant,

    #[error("first admin can only be created by a superadmin")]
    BootstrapRequiresSuperAdmin,

    #[error("illegal role transition")]
    IllegalTransition,

    #[error("users cannot deactivate themselves")]
    SelfDeactivation,

    #[error("no other active privileged account would remain")]
    LastAdmin,
}

/// The acting user must exist and hold Admin or SuperAdmin.
pub fn authorize_actor(actor: Option<&UserRecord>) -> Result<&UserRecord, Rejection> {
    let Some(actor) = actor else {
        return Err(Rejection::ActorNotFound);
    };

    if !actor.role.is_privileged() {
        return Err(Rejection::NotPrivileged);
    }

    Ok(actor)
}

/// Legality of a role change on `target`, checks in boundary order.
///
/// `admin_exists` is whether any user currently holds `Role::Admin` --
/// deliberately not SuperAdmin, so a superadmin-only system still counts
/// as "no admin yet" and only the superadmin can mint the first one.
pub fn check_role_change(
    actor: &UserRecord,
    target: &UserRecord,
    requested: Role,
    admin_exists: bool,
) -> Result<(), Rejection> {
    if target.role == Role::SuperAdmin {
        return Err(Rejection::SuperAdminImmutable);
    }

    if requested == Role::SuperAdmin {
        return Err(Rejection::SuperAdminGrant);
    }

    if requested == Role::Admin && !admin_exists && actor.role != Role::SuperAdmin {
        return Err(Rejection::BootstrapRequiresSuperAdmin);
    }

    match (target.role, requested) {
        (Role::User, Role::Admin) | (Role::Admin, Role::User) => Ok(()),
        _ => Err(Rejection::IllegalTransition),
    }
}

/// Local checks for deactivating `target`. Returns whether the caller must
/// additionally verify that another active privileged account remains
/// (the last-admin guard, an aggregate the store answers).
pub fn check_deactivation(actor: &UserRecord, target: &UserRecord) -> Result<bool, Rejection> {
    if target.id == actor.id {
        return Err(Rejection::SelfDeactivation);
    }

    if target.role == Role::SuperAdmin {
        return Err(Rejection::SuperAdminImmutable);
    }

    Ok(target.role.is_privileged())
}
