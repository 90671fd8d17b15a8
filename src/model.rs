use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::newtype;

/// Выданный номер.
/// Одна запись в журнале, по которому считаются счётчики.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IssuedNumber {
    /// Сам номер в том виде, в котором он был выдан.
    pub number: String,

    /// Дата документа, на которую был выдан номер.
    pub date: NaiveDate,

    /// Заказчик, если номер выдавался для конкретного заказчика.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerId>,

    /// Момент выдачи.
    pub issued_at: DateTime<Utc>,
}

newtype!(CustomerId, String, "String", customer_id_validate);

fn customer_id_validate(value: &str) -> anyhow::Result<()> {
    if value.is_empty() {
        return Err(anyhow!("shouldn't be empty"));
    }

    if value.contains(['{', '}']) {
        return Err(anyhow!("shouldn't contain braces"));
    }

    Ok(())
}

newtype!(TemplateName, String, "String", template_name_validate);

fn template_name_validate(value: &str) -> anyhow::Result<()> {
    if value.is_empty() {
        return Err(anyhow!("shouldn't be empty"));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(anyhow!("should contain only ascii letters, digits, '_' and '-'"));
    }

    Ok(())
}
