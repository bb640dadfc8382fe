use serde::ser::{Serialize, SerializeMap, Serializer};

use super::domain::FormVariant;
use super::schema::FormSchema;

/// In-progress field values for one form, kept as raw strings until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    variant: FormVariant,
    values: Vec<(&'static str, String)>,
}

impl FormRecord {
    /// A blank record with every field of the variant's schema set to "".
    pub fn empty(variant: FormVariant) -> Self {
        let values = FormSchema::for_variant(variant)
            .fields
            .iter()
            .map(|field| (field.name, String::new()))
            .collect();
        Self { variant, values }
    }

    /// Build a record from name/value pairs; unknown names are rejected.
    pub fn from_pairs<I, K, V>(variant: FormVariant, pairs: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::empty(variant);
        for (name, value) in pairs {
            record.set(name.as_ref(), value)?;
        }
        Ok(record)
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), RecordError> {
        let variant = self.variant;
        let slot = self
            .values
            .iter_mut()
            .find(|(field, _)| *field == name)
            .ok_or_else(|| RecordError::UnknownField {
                variant,
                field: name.to_string(),
            })?;
        slot.1 = value.into();
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a declared field; blank when the name is not part of the schema.
    pub(crate) fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    pub fn clear(&mut self) {
        for (_, value) in &mut self.values {
            value.clear();
        }
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|(_, value)| value.is_empty())
    }
}

impl Serialize for FormRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in &self.values {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("the {variant} form has no field named '{field}'")]
    UnknownField { variant: FormVariant, field: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_lists_fields_in_schema_order() {
        let record = FormRecord::empty(FormVariant::Educational);
        let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "institution",
                "contactPerson",
                "email",
                "phone",
                "message",
                "interestArea"
            ]
        );
        assert!(record.is_blank());
    }

    #[test]
    fn set_rejects_fields_from_the_other_variant() {
        let mut record = FormRecord::empty(FormVariant::Employer);
        let err = record
            .set("interestArea", "other")
            .expect_err("educational field is unknown to employer form");
        assert_eq!(
            err,
            RecordError::UnknownField {
                variant: FormVariant::Employer,
                field: "interestArea".to_string(),
            }
        );
        assert!(record.is_blank());
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut record = FormRecord::empty(FormVariant::Employer);
        record.set("company", "Acme").expect("known field");
        let value = serde_json::to_value(&record).expect("serializes");
        assert_eq!(value["company"], "Acme");
        assert_eq!(value["suggestions"], "");
    }
}
