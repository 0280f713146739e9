use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a loaded record: its position in the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub usize);

impl RecordId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// API Response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub results: Vec<UserRecord>,
    #[serde(default)]
    pub info: Option<ResponseInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub seed: Option<String>,
    pub results: Option<u32>,
    pub page: Option<u32>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: Name,
    pub email: String,
    pub location: Location,
    pub picture: Picture,
    pub cell: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub dob: Dob,
    #[serde(default)]
    pub nat: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub street: Street,
    pub city: String,
    pub state: String,
    // US postcodes come back as numbers, most others as strings
    #[serde(deserialize_with = "string_or_number")]
    pub postcode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Street {
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub medium: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dob {
    /// ISO 8601 date-time, e.g. `1990-05-21T10:00:00.000Z`
    pub date: String,
    #[serde(default)]
    pub age: Option<u32>,
}

impl UserRecord {
    /// "first last", the text shown on a card and matched by name lookups
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.first, self.name.last)
    }

    pub fn locality(&self) -> String {
        format!("{}, {}", self.location.city, self.location.state)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Integer(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json(postcode: serde_json::Value) -> serde_json::Value {
        json!({
            "gender": "female",
            "name": { "title": "Ms", "first": "Jane", "last": "Doe" },
            "location": {
                "street": { "number": 42, "name": "Main St" },
                "city": "Portland",
                "state": "OR",
                "country": "United States",
                "postcode": postcode,
                "coordinates": { "latitude": "1.0", "longitude": "2.0" }
            },
            "email": "jane.doe@example.com",
            "dob": { "date": "1990-05-21T10:00:00.000Z", "age": 34 },
            "phone": "(555) 111-2222",
            "cell": "(123) 456-7890",
            "picture": {
                "large": "https://randomuser.me/api/portraits/women/1.jpg",
                "medium": "https://randomuser.me/api/portraits/med/women/1.jpg",
                "thumbnail": "https://randomuser.me/api/portraits/thumb/women/1.jpg"
            },
            "nat": "US"
        })
    }

    #[test]
    fn test_deserialize_numeric_postcode_and_street_number() {
        let user: UserRecord = serde_json::from_value(sample_json(json!(97204))).unwrap();
        assert_eq!(user.location.postcode, "97204");
        assert_eq!(user.location.street.number, "42");
        assert_eq!(user.full_name(), "Jane Doe");
        assert_eq!(user.locality(), "Portland, OR");
        assert_eq!(user.phone.as_deref(), Some("(555) 111-2222"));
        assert_eq!(user.nat.as_deref(), Some("US"));
        assert_eq!(user.dob.age, Some(34));
    }

    #[test]
    fn test_deserialize_string_postcode() {
        let user: UserRecord = serde_json::from_value(sample_json(json!("V5K 0A1"))).unwrap();
        assert_eq!(user.location.postcode, "V5K 0A1");
    }

    #[test]
    fn test_deserialize_response_envelope() {
        let body = json!({
            "results": [sample_json(json!(97204)), sample_json(json!("SW1A 1AA"))],
            "info": { "seed": "abc", "results": 2, "page": 1, "version": "1.4" }
        });
        let parsed: UsersResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.info.and_then(|i| i.results), Some(2));
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId(7).to_string(), "7");
        assert_eq!(RecordId(7).index(), 7);
    }
}
