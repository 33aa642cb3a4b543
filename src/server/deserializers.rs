use serde::{Deserialize, Deserializer};

use super::pagination::FIRST_PAGE;

// `?page=abc` is not an error, it just means the first page
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(FIRST_PAGE))
}

pub fn first_page() -> i64 {
    FIRST_PAGE
}
