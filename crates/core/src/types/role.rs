//! Marketplace account roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a role tag does not name a known [`Role`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role tag: {0:?}")]
pub struct RoleTagError(pub String);

/// The closed set of marketplace account categories.
///
/// The role determines which upstream record shape to expect when fetching
/// a profile and which endpoint binding applies. It is deliberately a closed
/// enum: dispatch happens through `match`, not string comparison, so a new
/// role cannot be half-wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// A shopper placing orders.
    Customer,
    /// Delivery staff fulfilling orders.
    DeliveryStaff,
    /// An owner managing a shop.
    ShopOwner,
}

impl Role {
    /// All known roles, in wire-tag order.
    pub const ALL: [Self; 3] = [Self::Customer, Self::DeliveryStaff, Self::ShopOwner];

    /// The wire tag the upstream API uses for this role.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::DeliveryStaff => "delivery-staff",
            Self::ShopOwner => "shop-owner",
        }
    }

    /// Parse a wire tag into a `Role`.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace;
    /// upstream payloads are not consistent about either.
    ///
    /// # Errors
    ///
    /// Returns [`RoleTagError`] if the tag does not name a known role.
    pub fn from_tag(tag: &str) -> Result<Self, RoleTagError> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| RoleTagError(tag.to_owned()))
    }

    /// The generic display-name label used when upstream provides none.
    #[must_use]
    pub const fn generic_label(self) -> &'static str {
        match self {
            Self::Customer => "User",
            Self::DeliveryStaff => "Delivery Staff",
            Self::ShopOwner => "Shop Owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}
