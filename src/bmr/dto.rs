use serde::Deserialize;

/// Form body for `POST /bmr`. Fields stay raw strings so malformed input
/// is reported per field instead of as a generic form rejection.
#[derive(Debug, Deserialize)]
pub struct BmrForm {
    pub weight: String,
    pub height: String,
    pub age: String,
    pub sex: String,
    pub activity: String,
}
