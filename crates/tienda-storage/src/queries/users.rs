//! User account queries. The external auth uid is the lookup key; the
//! integer row id is what order rows reference.

use rusqlite::{params, Connection, OptionalExtension};

use tienda_core::errors::StorageError;
use tienda_core::types::user::{NewUser, ProfileUpdate, UserProfile};

/// Resolve the internal user id for an external auth uid.
pub fn resolve_id_by_auth_uid(conn: &Connection, uid: &str) -> Result<Option<i64>, StorageError> {
    conn.query_row(
        "SELECT id FROM usuarios WHERE firebase_uid = ?1",
        params![uid],
        |row| row.get(0),
    )
    .optional()
    .map_err(StorageError::from)
}

/// Insert a user and return the new row id.
pub fn insert(conn: &Connection, user: &NewUser) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO usuarios (firebase_uid, email, nombre, apellido, usuario, edad, direccion)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user.firebase_uid,
            user.email,
            user.nombre,
            user.apellido,
            user.usuario,
            user.edad,
            user.direccion,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch the profile fields for an external auth uid.
pub fn get_profile(conn: &Connection, uid: &str) -> Result<Option<UserProfile>, StorageError> {
    conn.query_row(
        "SELECT nombre, apellido, email, direccion, edad, usuario
         FROM usuarios WHERE firebase_uid = ?1",
        params![uid],
        |row| {
            Ok(UserProfile {
                nombre: row.get(0)?,
                apellido: row.get(1)?,
                email: row.get(2)?,
                direccion: row.get(3)?,
                edad: row.get(4)?,
                usuario: row.get(5)?,
            })
        },
    )
    .optional()
    .map_err(StorageError::from)
}

/// Apply a partial profile update. Returns false when no row matched.
pub fn update_profile(
    conn: &Connection,
    uid: &str,
    update: &ProfileUpdate,
) -> Result<bool, StorageError> {
    let rows = conn.execute(
        "UPDATE usuarios SET
            nombre = COALESCE(?2, nombre),
            apellido = COALESCE(?3, apellido),
            direccion = COALESCE(?4, direccion),
            edad = COALESCE(?5, edad),
            usuario = COALESCE(?6, usuario)
         WHERE firebase_uid = ?1",
        params![
            uid,
            update.nombre,
            update.apellido,
            update.direccion,
            update.edad,
            update.usuario,
        ],
    )?;
    Ok(rows > 0)
}
