//! The chargers table: validated name and idempotent provisioning.
//!
//! The table name comes from configuration, so it cannot be a bind
//! parameter. [`ChargerTable`] only accepts plain identifiers and always
//! renders them quoted.

use sqlx::PgPool;

use crate::DbError;

/// Postgres truncates identifiers beyond this length.
const MAX_IDENTIFIER_LEN: usize = 63;

/// A validated chargers table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargerTable {
    name: String,
}

impl ChargerTable {
    /// Validates `name` as a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidTableName`] if the name is empty, too long,
    /// or contains anything other than ASCII letters, digits, and underscores.
    pub fn new(name: impl Into<String>) -> Result<Self, DbError> {
        let name = name.into();
        let invalid = |reason: &str| DbError::InvalidTableName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        let Some(first) = name.chars().next() else {
            return Err(invalid("must not be empty"));
        };
        if name.len() > MAX_IDENTIFIER_LEN {
            return Err(invalid("longer than 63 bytes"));
        }
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(invalid("must start with a letter or underscore"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("only ASCII letters, digits, and underscores are allowed"));
        }

        Ok(Self { name })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quoted identifier for use in SQL text.
    #[must_use]
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.name)
    }

    /// Name of the secondary index that serves lookups by town.
    #[must_use]
    pub fn town_index(&self) -> String {
        format!("\"{}_town_idx\"", self.name)
    }

    fn ttl_index(&self) -> String {
        format!("\"{}_ttl_idx\"", self.name)
    }
}

/// Creates the chargers table and its indexes if they do not exist yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any DDL statement fails.
pub async fn provision_table(pool: &PgPool, table: &ChargerTable) -> Result<(), DbError> {
    let create_table = format!(
        "CREATE TABLE IF NOT EXISTS {t} ( \
             charger_id              TEXT PRIMARY KEY, \
             uuid                    TEXT, \
             town                    TEXT NOT NULL, \
             town_raw                TEXT NOT NULL, \
             title                   TEXT, \
             address_line1           TEXT, \
             postcode                TEXT, \
             latitude                DOUBLE PRECISION, \
             longitude               DOUBLE PRECISION, \
             number_of_points        INTEGER, \
             usage_type              TEXT, \
             status_type             TEXT, \
             date_last_status_update TEXT, \
             ttl                     BIGINT NOT NULL, \
             updated_at              TIMESTAMPTZ NOT NULL DEFAULT NOW() \
         )",
        t = table.quoted()
    );
    let create_town_index = format!(
        "CREATE INDEX IF NOT EXISTS {idx} ON {t} (town)",
        idx = table.town_index(),
        t = table.quoted()
    );
    let create_ttl_index = format!(
        "CREATE INDEX IF NOT EXISTS {idx} ON {t} (ttl)",
        idx = table.ttl_index(),
        t = table.quoted()
    );

    for statement in [create_table, create_town_index, create_ttl_index] {
        sqlx::query(&statement).execute(pool).await?;
    }
    Ok(())
}
