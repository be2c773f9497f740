use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// Absent fields are left alone. `firstname` is nullable, so it tells an
/// absent key (`None`) apart from an explicit null (`Some(None)`, clears it).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    #[serde(default, deserialize_with = "present")]
    pub firstname: Option<Option<String>>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
