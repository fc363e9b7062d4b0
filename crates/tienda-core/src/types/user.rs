//! User account types. Authentication itself is delegated to an external
//! identity service; only its opaque uid crosses this boundary.

use serde::{Deserialize, Serialize};

/// Profile fields returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub direccion: Option<String>,
    pub edad: Option<i64>,
    pub usuario: Option<String>,
}

/// Registration payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub firebase_uid: String,
    pub email: String,
    pub nombre: String,
    pub apellido: String,
    pub usuario: Option<String>,
    pub edad: Option<i64>,
    pub direccion: Option<String>,
}

/// Profile update payload. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub direccion: Option<String>,
    pub edad: Option<i64>,
    pub usuario: Option<String>,
}
