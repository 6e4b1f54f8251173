use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Ordered by privilege: `User < Admin < SuperAdmin`.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub enum Role {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum State {
    #[default]
    Active,
    Suspended,
}

impl State {
    pub fn is_active(&self) -> bool {
        matches!(self, State::Active)
    }
}
