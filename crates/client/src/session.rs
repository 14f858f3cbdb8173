//! Signed-in account the client acts for.
//!
//! Authentication happens against the hosted backend; the client only keeps
//! the resolved identity and role to decide which actions to offer.

use serde::{Deserialize, Serialize};

use bazaar_core::UserId;
use bazaar_shopping::{Profile, Role};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn shopper(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::User,
        }
    }

    pub fn brand(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Brand,
        }
    }

    pub fn is_shopper(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_brand(&self) -> bool {
        self.role == Role::Brand
    }

    pub(crate) fn require_shopper(&self) -> ClientResult<UserId> {
        if self.is_shopper() {
            Ok(self.user_id)
        } else {
            Err(ClientError::NotShopper)
        }
    }

    pub(crate) fn require_brand(&self) -> ClientResult<UserId> {
        if self.is_brand() {
            Ok(self.user_id)
        } else {
            Err(ClientError::NotBrand)
        }
    }
}

impl From<&Profile> for Principal {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: profile.id,
            role: profile.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_gates() {
        let shopper = Principal::shopper(UserId::new());
        assert!(shopper.require_shopper().is_ok());
        assert_eq!(shopper.require_brand(), Err(ClientError::NotBrand));

        let brand = Principal::brand(UserId::new());
        assert_eq!(brand.require_shopper(), Err(ClientError::NotShopper));
        assert_eq!(brand.require_brand(), Ok(brand.user_id));
    }
}
