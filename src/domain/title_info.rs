use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const MAX_FIELD_LEN: usize = 200;

/// Sparse extra metadata attached to a title.
///
/// Known fields are typed and validated; any other key is kept as-is and
/// handed back to clients untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes_total: Option<u32>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl TitleInfo {
    /// Trims known text fields, drops blank ones and rejects oversized values.
    pub fn normalized(mut self) -> Result<Self, String> {
        for (name, field) in [
            ("studio", &mut self.studio),
            ("duration", &mut self.duration),
        ] {
            if let Some(value) = field.take() {
                let trimmed = value.trim();
                if trimmed.len() > MAX_FIELD_LEN {
                    return Err(format!(
                        "info.{name} must be {MAX_FIELD_LEN} characters or less"
                    ));
                }
                if !trimmed.is_empty() {
                    *field = Some(trimmed.to_string());
                }
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.studio.is_none()
            && self.duration.is_none()
            && self.episodes_total.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_pass_through() {
        let info: TitleInfo = serde_json::from_str(
            r#"{"studio":"MAPPA","source":"manga","staff":{"director":"X"}}"#,
        )
        .unwrap();
        assert_eq!(info.studio.as_deref(), Some("MAPPA"));
        assert_eq!(info.extra["source"], Value::String("manga".into()));

        let back = serde_json::to_value(&info).unwrap();
        assert_eq!(back["staff"]["director"], "X");
    }

    #[test]
    fn known_fields_are_typed() {
        assert!(serde_json::from_str::<TitleInfo>(r#"{"episodes_total":"twelve"}"#).is_err());
    }

    #[test]
    fn normalization_trims_and_drops_blank() {
        let info = TitleInfo {
            studio: Some("  Bones ".into()),
            duration: Some("   ".into()),
            ..TitleInfo::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(info.studio.as_deref(), Some("Bones"));
        assert!(info.duration.is_none());
    }

    #[test]
    fn normalization_rejects_oversized_fields() {
        let info = TitleInfo {
            studio: Some("x".repeat(MAX_FIELD_LEN + 1)),
            ..TitleInfo::default()
        };
        assert!(info.normalized().is_err());
    }
}
