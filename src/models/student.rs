// src/models/student.rs
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A row of the `students` table.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub lastname: String,
    pub firstname: String,
    pub course: String,
    pub level: String,
    pub photo: Option<String>,
    pub qr_code: Option<String>,
}

/// Fields an administrator may set on create or update. The ID is never part of it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudentFields {
    #[serde(deserialize_with = "text_or_number")]
    pub lastname: String,
    #[serde(deserialize_with = "text_or_number")]
    pub firstname: String,
    #[serde(deserialize_with = "text_or_number")]
    pub course: String,
    // Forms send year levels as numbers as often as strings.
    #[serde(deserialize_with = "text_or_number")]
    pub level: String,
}

/// Accepts a JSON string or number; `null` reads as empty.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextOrNumber;

    impl<'de> de::Visitor<'de> for TextOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextOrNumber)
}

impl StudentFields {
    pub fn trimmed(&self) -> Self {
        Self {
            lastname: self.lastname.trim().to_string(),
            firstname: self.firstname.trim().to_string(),
            course: self.course.trim().to_string(),
            level: self.level.trim().to_string(),
        }
    }

    pub fn missing_any(&self) -> bool {
        [&self.lastname, &self.firstname, &self.course, &self.level]
            .iter()
            .any(|v| v.trim().is_empty())
    }
}

/// JSON body of `POST /api/student/add`.
#[derive(Debug, Deserialize)]
pub struct NewStudentPayload {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(flatten)]
    pub fields: StudentFields,
    /// Base64 image, optionally with a `data:...;base64,` header.
    #[serde(default)]
    pub photo: Option<String>,
}

/// True for `"0001"..="9999"`.
pub fn is_valid_student_id(id: &str) -> bool {
    id.len() == 4 && id.bytes().all(|b| b.is_ascii_digit()) && id != "0000"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_id_shape() {
        assert!(is_valid_student_id("0001"));
        assert!(is_valid_student_id("9999"));
        assert!(!is_valid_student_id("0000"));
        assert!(!is_valid_student_id("123"));
        assert!(!is_valid_student_id("12a4"));
        assert!(!is_valid_student_id("10000"));
    }

    #[test]
    fn numeric_level_is_accepted() {
        let payload: NewStudentPayload = serde_json::from_str(
            r#"{"lastname":"Durano","firstname":"Dennis","course":"BSCPE","level":3}"#,
        )
        .unwrap();
        assert_eq!(payload.fields.level, "3");
        assert!(!payload.fields.missing_any());
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let fields = StudentFields {
            lastname: "Durano".into(),
            firstname: "  ".into(),
            course: "BSCPE".into(),
            level: "3".into(),
        };
        assert!(fields.missing_any());
    }
}
