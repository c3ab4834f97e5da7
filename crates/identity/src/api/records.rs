//! Raw upstream record shapes.
//!
//! The profile API returns a different structure per role; these types
//! mirror those payloads field-for-field and go no further than the
//! normalizer. Every field is optional because upstream omits whatever it
//! does not have rather than sending nulls consistently.

use serde::Deserialize;

/// One raw record from the profile API, tagged by the role it was fetched
/// for.
#[derive(Debug, Clone)]
pub enum UpstreamRecord {
    /// Shape returned by the customer endpoint.
    Customer(CustomerRecord),
    /// Shape returned by the delivery-staff endpoint.
    Staff(StaffRecord),
    /// Shape returned by the shop endpoint.
    Shop(ShopRecord),
}

/// Raw customer record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub user_id: Option<String>,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub city: Option<String>,
}

/// Raw delivery-staff record.
///
/// `staff_photo` is the role-specific image field; older accounts only
/// carry the generic `profilePicture`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    pub staff_id: Option<String>,
    pub staff_name: Option<String>,
    pub staff_photo: Option<String>,
    pub profile_picture: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub zone: Option<String>,
}

/// Raw shop record.
///
/// Shops that never set a logo usually still have a populated gallery, so
/// the gallery's first image is the preferred picture source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopRecord {
    pub shop_id: Option<String>,
    pub shop_name: Option<String>,
    pub shop_logo: Option<String>,
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub gallery: Vec<GalleryItem>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
}

/// One entry of a shop's image gallery.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub image: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_record_tolerates_missing_fields() {
        let record: CustomerRecord = serde_json::from_str(r#"{"userId":"u1"}"#).unwrap();
        assert_eq!(record.user_id.as_deref(), Some("u1"));
        assert!(record.full_name.is_none());
        assert!(record.profile_picture.is_none());
    }

    #[test]
    fn test_shop_record_parses_gallery() {
        let json = r#"{
            "shopId": "s9",
            "gallery": [{"image": "https://cdn.test/g0.jpg"}, {}]
        }"#;
        let record: ShopRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.gallery.len(), 2);
        assert_eq!(
            record.gallery[0].image.as_deref(),
            Some("https://cdn.test/g0.jpg")
        );
        assert!(record.gallery[1].image.is_none());
    }

    #[test]
    fn test_staff_record_camel_case_renames() {
        let json = r#"{"staffId":"d2","staffName":"Ray","staffPhoto":"p.jpg"}"#;
        let record: StaffRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.staff_name.as_deref(), Some("Ray"));
        assert_eq!(record.staff_photo.as_deref(), Some("p.jpg"));
    }
}
