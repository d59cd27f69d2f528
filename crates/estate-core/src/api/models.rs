use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Custom deserializer: prices arrive as integers, floats ("675000.0") or
/// numeric strings depending on the backend; all become whole dollars.
fn deserialize_price<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            if let Some(whole) = n.as_u64() {
                Ok(whole)
            } else if let Some(float) = n.as_f64() {
                Ok(if float.is_finite() && float > 0.0 {
                    float.round() as u64
                } else {
                    0
                })
            } else {
                Ok(0)
            }
        }
        Value::String(s) => Ok(s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f > 0.0)
            .map(|f| f.round() as u64)
            .unwrap_or(0)),
        _ => Ok(0),
    }
}

/// Custom deserializer: timestamps are naive ISO strings from one backend
/// and RFC 3339 from another; anything unreadable becomes None.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| {
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.naive_utc())
            .or_else(|_| raw.parse::<NaiveDateTime>())
            .ok()
    }))
}

/// A property listing as supplied by the API. Read-only on the client.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Property {
    pub id: u32,
    pub title: String,
    #[serde(deserialize_with = "deserialize_price", default)]
    pub price: u64,
    #[serde(alias = "address_line", default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(alias = "zipcode", default)]
    pub zip_code: String,
    #[serde(alias = "beds", default)]
    pub bedrooms: u32,
    #[serde(alias = "baths", default)]
    pub bathrooms: f64,
    #[serde(alias = "sqft", default)]
    pub square_feet: Option<u32>,
    #[serde(alias = "cover_image_url", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub year_built: Option<u32>,
    #[serde(alias = "lot_size_sqft", default)]
    pub lot_size: Option<u32>,
    #[serde(deserialize_with = "deserialize_timestamp", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "deserialize_timestamp", default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Property {
    /// `address, city, state zip`, skipping blank parts.
    pub fn full_address(&self) -> String {
        let street_city: Vec<&str> = [self.address.as_str(), self.city.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        let state_zip: Vec<&str> = [self.state.as_str(), self.zip_code.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();

        let mut parts = street_city.join(", ");
        if !state_zip.is_empty() {
            if !parts.is_empty() {
                parts.push_str(", ");
            }
            parts.push_str(&state_zip.join(" "));
        }
        parts
    }

    /// Link target of the detail page.
    pub fn detail_path(&self) -> String {
        format!("/property/{}", self.id)
    }
}

/// One page of listing results.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PropertyPage {
    pub items: Vec<Property>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub pages: u32,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

fn first_page() -> u32 {
    1
}

impl PropertyPage {
    pub fn single(items: Vec<Property>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            page: 1,
            pages: 1,
            total: Some(total),
            per_page: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Result count, preferring the server total over the page length.
    pub fn result_count(&self) -> u64 {
        self.total.unwrap_or(self.items.len() as u64)
    }
}

/// The listing endpoint answers either with the paged envelope or, on older
/// backends, a bare array. Both normalize to [`PropertyPage`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListingResponse {
    Paged(PropertyPage),
    Bare(Vec<Property>),
}

impl From<ListingResponse> for PropertyPage {
    fn from(response: ListingResponse) -> Self {
        match response {
            ListingResponse::Paged(page) => page,
            ListingResponse::Bare(items) => PropertyPage::single(items),
        }
    }
}

/// Body of `POST /api/favorites`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FavoriteRequest {
    pub property_id: u32,
    pub user_email: String,
}

/// Error/message envelope the backend uses for non-2xx answers.
#[derive(Debug, Deserialize, Default)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_accepts_field_variants() {
        let json = r#"{
            "id": 3,
            "title": "Cozy Starter Home",
            "price": "350000.00",
            "address_line": "321 Maple Street",
            "city": "Austin",
            "state": "TX",
            "zipcode": "78701",
            "beds": 3,
            "baths": 2.0,
            "sqft": 1500,
            "cover_image_url": null,
            "lot_size_sqft": 5000
        }"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.price, 350000);
        assert_eq!(property.address, "321 Maple Street");
        assert_eq!(property.zip_code, "78701");
        assert_eq!(property.bedrooms, 3);
        assert_eq!(property.square_feet, Some(1500));
        assert_eq!(property.lot_size, Some(5000));
        assert_eq!(property.image_url, None);
        assert_eq!(property.description, None);
    }

    #[test]
    fn test_price_encodings() {
        for (raw, expected) in [("675000", 675000), ("675000.4", 675000), ("\"825000\"", 825000)] {
            let json = format!(r#"{{"id": 1, "title": "t", "price": {}}}"#, raw);
            let property: Property = serde_json::from_str(&json).unwrap();
            assert_eq!(property.price, expected);
        }

        let json = r#"{"id": 1, "title": "t", "price": "call us"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.price, 0);
    }

    #[test]
    fn test_timestamps_are_lenient() {
        let json = r#"{
            "id": 1, "title": "t",
            "created_at": "2024-03-01T10:15:00.123456",
            "updated_at": "2024-03-02T08:00:00Z"
        }"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert!(property.created_at.is_some());
        assert!(property.updated_at.is_some());

        let json = r#"{"id": 1, "title": "t", "created_at": "yesterday"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert!(property.created_at.is_none());
    }

    #[test]
    fn test_full_address_skips_blank_parts() {
        let json = r#"{"id": 1, "title": "t", "address": "123 Main St", "city": "San Francisco", "state": "CA", "zip_code": "94102"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(
            property.full_address(),
            "123 Main St, San Francisco, CA 94102"
        );

        let json = r#"{"id": 2, "title": "t", "city": "Denver"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.full_address(), "Denver");
        assert_eq!(property.detail_path(), "/property/2");
    }

    #[test]
    fn test_listing_response_normalizes_bare_array() {
        let json = r#"[{"id": 1, "title": "a"}, {"id": 2, "title": "b"}]"#;
        let response: ListingResponse = serde_json::from_str(json).unwrap();
        let page: PropertyPage = response.into();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 1);
        assert_eq!(page.result_count(), 2);
    }

    #[test]
    fn test_listing_response_paged_envelope() {
        let json = r#"{"items": [{"id": 1, "title": "a"}], "page": 2, "pages": 5, "total": 49, "per_page": 12}"#;
        let response: ListingResponse = serde_json::from_str(json).unwrap();
        let page: PropertyPage = response.into();
        assert_eq!(page.page, 2);
        assert_eq!(page.pages, 5);
        assert_eq!(page.result_count(), 49);
    }

    #[test]
    fn test_favorite_request_serialization() {
        let request = FavoriteRequest {
            property_id: 4,
            user_email: "user@example.com".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["property_id"], 4);
        assert_eq!(json["user_email"], "user@example.com");
    }
}
