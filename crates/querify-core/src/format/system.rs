use crate::{sql::quote_ident, types::TypeKind};

/// Fields the validator never null-checks; their values are computed.
const NULL_EXEMPT_FIELDS: [&str; 5] = [
    "created_time",
    "created_by",
    "updated_time",
    "updated_by",
    "config_id",
];

/// Fields written on insert and never touched by a MERGE update.
const WRITE_ONCE_FIELDS: [&str; 2] = ["created_time", "created_by"];

const SYSTEM_CONFIG_TABLE: &str = "config.system_config";

#[must_use]
pub fn is_null_exempt(field: &str) -> bool {
    NULL_EXEMPT_FIELDS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(field.trim()))
}

#[must_use]
pub fn is_write_once(field: &str) -> bool {
    WRITE_ONCE_FIELDS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(field.trim()))
}

///
/// SystemField
///
/// Fields whose emitted value is assigned by the engine. Detection is
/// case-insensitive on both the field and the table name.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SystemField {
    /// `created_time` / `updated_time`
    AuditTime,
    /// `created_by` / `updated_by`
    AuditUser,
    /// numeric `config_id`
    ConfigId,
    /// `system_config_id` on `config.system_config`
    SystemConfigId,
}

impl SystemField {
    #[must_use]
    pub fn detect(field: &str, kind: TypeKind, table: &str) -> Option<Self> {
        let field = field.trim().to_ascii_lowercase();

        match field.as_str() {
            "created_time" | "updated_time" => Some(Self::AuditTime),
            "created_by" | "updated_by" => Some(Self::AuditUser),
            "config_id" if kind == TypeKind::Number => Some(Self::ConfigId),
            "system_config_id" if table.trim().eq_ignore_ascii_case(SYSTEM_CONFIG_TABLE) => {
                Some(Self::SystemConfigId)
            }
            _ => None,
        }
    }

    /// SQL expression emitted in place of the cell value.
    #[must_use]
    pub fn literal(self, field: &str, table: &str) -> String {
        let table = table.trim();

        match self {
            Self::AuditTime => "SYSDATE".to_string(),
            Self::AuditUser => "'SYSTEM'".to_string(),
            Self::ConfigId => {
                format!("(SELECT MAX({})+1 FROM {table})", quote_ident(field))
            }
            Self::SystemConfigId => format!(
                "(SELECT MAX(CAST({} AS INT))+1 FROM {table})",
                quote_ident(field)
            ),
        }
    }
}
