use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// ErrorEntity is one recorded failure together with the request payload that caused it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ErrorEntity {
    pub error_id: String,
    pub error_message: String,
    pub details: String,
    pub body: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl ErrorEntity {
    pub fn new(error_message: &str, details: &str, body: &str) -> Self {
        Self {
            error_id: Uuid::new_v4().to_string(),
            error_message: error_message.to_string(),
            details: details.to_string(),
            body: body.to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errorstore::domain::model::ErrorEntity;

    #[tokio::test]
    async fn test_should_build_error() {
        let err = ErrorEntity::new("book not found", "NotFound", "{\"bookId\":3}");
        assert_eq!("book not found", err.error_message.as_str());
        assert_eq!(36, err.error_id.len());
        let json = serde_json::to_value(&err).expect("should serialize");
        assert_eq!("{\"bookId\":3}", json["body"]);
    }
}
