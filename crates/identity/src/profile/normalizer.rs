//! Pure mapping from raw upstream records to the canonical profile.

use clove_core::{Profile, Role};

use crate::api::{CustomerRecord, ShopRecord, StaffRecord, UpstreamRecord};

/// Build a canonical [`Profile`] from whatever upstream returned.
///
/// Total and pure: missing fields fall back through an ordered candidate
/// list, an absent record yields defaults plus the known account identity,
/// and no input makes this panic. The first non-empty, non-whitespace
/// candidate wins for each field.
#[must_use]
pub fn normalize(account_id: &str, role: Role, raw: Option<&UpstreamRecord>) -> Profile {
    let mut profile = Profile::fallback(account_id, role);

    let Some(raw) = raw else {
        return profile;
    };

    match (role, raw) {
        (Role::Customer, UpstreamRecord::Customer(record)) => {
            apply_customer(&mut profile, record);
        }
        (Role::DeliveryStaff, UpstreamRecord::Staff(record)) => {
            apply_staff(&mut profile, record);
        }
        (Role::ShopOwner, UpstreamRecord::Shop(record)) => {
            apply_shop(&mut profile, record);
        }
        (role, record) => {
            // Shape/role mismatch can only come from a miswired endpoint
            // binding; keep the defaults rather than guess at fields.
            tracing::warn!(%role, ?record, "upstream record shape does not match role");
        }
    }

    profile
}

/// First candidate that is present and not whitespace-only.
fn first_usable<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

fn set_if_usable(field: &mut String, candidates: &[Option<&str>]) {
    if let Some(value) = first_usable(candidates) {
        *field = value.to_owned();
    }
}

fn apply_customer(profile: &mut Profile, record: &CustomerRecord) {
    set_if_usable(&mut profile.id, &[record.user_id.as_deref()]);
    set_if_usable(&mut profile.display_name, &[record.full_name.as_deref()]);
    set_if_usable(&mut profile.image_url, &[record.profile_picture.as_deref()]);
    set_if_usable(&mut profile.email, &[record.email.as_deref()]);
    set_if_usable(&mut profile.phone, &[record.mobile.as_deref()]);
    set_if_usable(&mut profile.location, &[record.city.as_deref()]);
}

fn apply_staff(profile: &mut Profile, record: &StaffRecord) {
    set_if_usable(&mut profile.id, &[record.staff_id.as_deref()]);
    set_if_usable(&mut profile.display_name, &[record.staff_name.as_deref()]);
    set_if_usable(
        &mut profile.image_url,
        &[record.staff_photo.as_deref(), record.profile_picture.as_deref()],
    );
    set_if_usable(&mut profile.email, &[record.email.as_deref()]);
    set_if_usable(&mut profile.phone, &[record.mobile.as_deref()]);
    set_if_usable(&mut profile.location, &[record.zone.as_deref()]);
}

fn apply_shop(profile: &mut Profile, record: &ShopRecord) {
    set_if_usable(&mut profile.id, &[record.shop_id.as_deref()]);
    set_if_usable(&mut profile.display_name, &[record.shop_name.as_deref()]);
    // Gallery first: shops without a logo usually still have gallery
    // images, and those beat the placeholder.
    let gallery_image = record
        .gallery
        .first()
        .and_then(|item| item.image.as_deref());
    set_if_usable(
        &mut profile.image_url,
        &[
            gallery_image,
            record.shop_logo.as_deref(),
            record.profile_picture.as_deref(),
        ],
    );
    set_if_usable(&mut profile.email, &[record.email.as_deref()]);
    set_if_usable(&mut profile.phone, &[record.mobile.as_deref()]);
    set_if_usable(&mut profile.location, &[record.address.as_deref()]);
}

#[cfg(test)]
mod tests {
    use clove_core::PLACEHOLDER_IMAGE_URL;

    use crate::api::GalleryItem;

    use super::*;

    #[test]
    fn test_absent_record_yields_defaults() {
        for role in Role::ALL {
            let profile = normalize("acct_1", role, None);
            assert_eq!(profile.id, "acct_1");
            assert_eq!(profile.display_name, role.generic_label());
            assert_eq!(profile.image_url, PLACEHOLDER_IMAGE_URL);
            assert_eq!(profile.role, role);
        }
    }

    #[test]
    fn test_empty_record_yields_defaults() {
        let raw = UpstreamRecord::Customer(CustomerRecord::default());
        let profile = normalize("acct_1", Role::Customer, Some(&raw));
        assert_eq!(profile.id, "acct_1");
        assert_eq!(profile.display_name, "User");
        assert_eq!(profile.image_url, PLACEHOLDER_IMAGE_URL);
        assert!(profile.email.is_empty());
    }

    #[test]
    fn test_customer_fields_mapped() {
        let raw = UpstreamRecord::Customer(CustomerRecord {
            user_id: Some("u42".to_owned()),
            full_name: Some("Ada Smith".to_owned()),
            profile_picture: Some("https://cdn.test/ada.jpg".to_owned()),
            email: Some("ada@example.com".to_owned()),
            mobile: Some("555-0100".to_owned()),
            city: Some("Lagos".to_owned()),
        });
        let profile = normalize("acct_1", Role::Customer, Some(&raw));
        assert_eq!(profile.id, "u42");
        assert_eq!(profile.display_name, "Ada Smith");
        assert_eq!(profile.image_url, "https://cdn.test/ada.jpg");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.phone, "555-0100");
        assert_eq!(profile.location, "Lagos");
    }

    #[test]
    fn test_whitespace_candidates_are_skipped() {
        let raw = UpstreamRecord::Staff(StaffRecord {
            staff_name: Some("   ".to_owned()),
            staff_photo: Some(String::new()),
            profile_picture: Some("https://cdn.test/d.jpg".to_owned()),
            ..StaffRecord::default()
        });
        let profile = normalize("acct_1", Role::DeliveryStaff, Some(&raw));
        assert_eq!(profile.display_name, "Delivery Staff");
        assert_eq!(profile.image_url, "https://cdn.test/d.jpg");
    }

    #[test]
    fn test_shop_gallery_image_beats_flat_fields() {
        let raw = UpstreamRecord::Shop(ShopRecord {
            gallery: vec![GalleryItem {
                image: Some("https://cdn.test/gallery0.jpg".to_owned()),
            }],
            shop_logo: Some("https://cdn.test/logo.jpg".to_owned()),
            ..ShopRecord::default()
        });
        let profile = normalize("acct_1", Role::ShopOwner, Some(&raw));
        assert_eq!(profile.image_url, "https://cdn.test/gallery0.jpg");
    }

    #[test]
    fn test_shop_gallery_only_image_source() {
        let raw = UpstreamRecord::Shop(ShopRecord {
            gallery: vec![GalleryItem {
                image: Some("https://cdn.test/gallery0.jpg".to_owned()),
            }],
            ..ShopRecord::default()
        });
        let profile = normalize("acct_1", Role::ShopOwner, Some(&raw));
        assert_eq!(profile.image_url, "https://cdn.test/gallery0.jpg");
        assert_ne!(profile.image_url, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_shop_empty_gallery_falls_through_to_logo() {
        let raw = UpstreamRecord::Shop(ShopRecord {
            gallery: vec![GalleryItem { image: None }],
            shop_logo: Some("https://cdn.test/logo.jpg".to_owned()),
            ..ShopRecord::default()
        });
        let profile = normalize("acct_1", Role::ShopOwner, Some(&raw));
        assert_eq!(profile.image_url, "https://cdn.test/logo.jpg");
    }

    #[test]
    fn test_mismatched_shape_keeps_defaults() {
        let raw = UpstreamRecord::Shop(ShopRecord {
            shop_name: Some("Mangrove Deli".to_owned()),
            ..ShopRecord::default()
        });
        let profile = normalize("acct_1", Role::Customer, Some(&raw));
        assert_eq!(profile.display_name, "User");
        assert_eq!(profile.id, "acct_1");
    }

    #[test]
    fn test_record_id_overrides_account_id() {
        let raw = UpstreamRecord::Shop(ShopRecord {
            shop_id: Some("s9".to_owned()),
            ..ShopRecord::default()
        });
        let profile = normalize("acct_1", Role::ShopOwner, Some(&raw));
        assert_eq!(profile.id, "s9");
    }
}
