use crate::model::{Field, Group};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// One labeled value from the form, exactly as the user typed it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpendingEntry<'a> {
    field: Field,
    value: &'a str,
}

impl<'a> SpendingEntry<'a> {
    pub fn field(&self) -> Field {
        self.field
    }

    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    /// The raw value, possibly empty or non-numeric.
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// True when nothing but whitespace was entered.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// The full set of labeled inputs for one submission.
///
/// Fields that were never set read as an empty string. Iteration always follows the display order
/// of [`Field`], regardless of the order in which values were set.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReflectionRecord {
    values: BTreeMap<Field, String>,
}

impl ReflectionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(field, value)` pairs. Later pairs win over earlier ones.
    pub fn from_values<S>(values: impl IntoIterator<Item = (Field, S)>) -> Self
    where
        S: Into<String>,
    {
        let mut record = Self::new();
        for (field, value) in values {
            record.set(field, value);
        }
        record
    }

    /// Parses a JSON object that maps field ids (e.g. `house_and_car`) to values. Values may be
    /// strings or numbers, missing fields are left empty.
    ///
    /// ```
    /// # use self_invest::{Field, ReflectionRecord};
    /// let record = ReflectionRecord::from_json(r#"{"education": "1000", "books": 200}"#).unwrap();
    /// assert_eq!(record.get(Field::Education), "1000");
    /// assert_eq!(record.get(Field::Books), "200");
    /// assert_eq!(record.get(Field::Travel), "");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawValue> =
            serde_json::from_str(json).context("Unable to parse the form answers as JSON")?;
        let mut record = Self::new();
        for (key, value) in raw {
            let field = Field::from_str(&key)
                .map_err(|_| anyhow::anyhow!("Unknown form field '{key}'"))?;
            record.set(field, value.into_string());
        }
        Ok(record)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let _ = self.values.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Every field in display order, including those never set.
    pub fn entries(&self) -> impl Iterator<Item = SpendingEntry<'_>> + '_ {
        Field::ALL.into_iter().map(move |field| SpendingEntry {
            field,
            value: self.get(field),
        })
    }

    /// The raw values of the fields belonging to `group`, in display order.
    pub fn group_values(&self, group: Group) -> impl Iterator<Item = &str> + '_ {
        Field::in_group(group).map(move |field| self.get(field))
    }

    /// The free-text reflection.
    pub fn reflection(&self) -> &str {
        self.get(Field::Reflection)
    }
}

/// A JSON answer, which may have been written as a string or as a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(serde_json::Number),
    Null(()),
}

impl RawValue {
    fn into_string(self) -> String {
        match self {
            RawValue::Text(s) => s,
            RawValue::Number(n) => n.to_string(),
            RawValue::Null(()) => String::new(),
        }
    }
}
