//! The canonical profile shape.

use serde::{Deserialize, Serialize};

use super::Role;

/// Image shown when an account has no usable picture anywhere upstream.
pub const PLACEHOLDER_IMAGE_URL: &str = "/static/img/avatar-placeholder.png";

/// The canonical, role-independent profile every caller consumes.
///
/// A `Profile` is always fully populated: `display_name` and `image_url`
/// carry role-generic defaults when upstream has nothing usable, and the
/// contact fields are empty strings rather than options so rendering code
/// never branches on presence. `id` is empty only when resolution failed
/// terminally and no account identity was known either.
///
/// Profiles are built fresh on every resolution and never cached across
/// `(account, role)` pairs; three independent surfaces read them and a
/// stale cache would let those surfaces disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Upstream account identifier.
    pub id: String,
    /// Human-readable name; never empty.
    pub display_name: String,
    /// Avatar or shop image; never empty.
    pub image_url: String,
    /// Contact email, or empty.
    pub email: String,
    /// Contact phone, or empty.
    pub phone: String,
    /// City, zone, or address line, or empty.
    pub location: String,
    /// The role this profile was resolved for.
    pub role: Role,
}

impl Profile {
    /// A profile built purely from defaults plus a known account identity.
    ///
    /// This is the shape every failure path collapses to, so callers render
    /// something sensible regardless of upstream health.
    #[must_use]
    pub fn fallback(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            display_name: role.generic_label().to_owned(),
            image_url: PLACEHOLDER_IMAGE_URL.to_owned(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            role,
        }
    }
}
