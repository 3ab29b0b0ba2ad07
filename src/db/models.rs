use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    // Never leaves the server: skipped on serialization
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the users table. The id and created_at are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: String,
    pub address: Option<String>,
}

/// Partial profile update: absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmergencyContact {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub email: Option<String>,
}

/// Partial contact update: absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User {
            id: 1,
            email: "a@x.com".to_string(),
            username: "a".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            full_name: "A".to_string(),
            phone: "1".to_string(),
            address: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["username"], "a");
        assert!(json.get("created_at").is_some());
    }

    #[test]
    fn test_contact_serialization_shape() {
        let contact = EmergencyContact {
            id: 7,
            user_id: 1,
            name: "Jane".to_string(),
            relationship: "sister".to_string(),
            phone: "555-0000".to_string(),
            email: None,
        };

        let json = serde_json::to_value(&contact).unwrap();
        assert!(json.get("user_id").is_none());
        assert_eq!(json["id"], 7);
        assert_eq!(json["relationship"], "sister");
        assert!(json["email"].is_null());
    }
}
