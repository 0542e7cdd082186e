use super::required_str;
use crate::core::batch::RecordTransform;
use crate::core::traits::Translator;
use crate::core::types::Record;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Translates a fixed list of top-level string fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsTranslation {
    fields: Vec<String>,
    target_lang: Option<String>,
}

impl FieldsTranslation {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            target_lang: None,
        }
    }

    /// `instruction` and `context`, as in databricks-dolly
    pub fn dolly() -> Self {
        Self::new(["instruction", "context"])
    }

    /// Override the translator's target language
    pub fn with_target_lang(mut self, target_lang: impl Into<String>) -> Self {
        self.target_lang = Some(target_lang.into());
        self
    }
}

#[async_trait]
impl<A> RecordTransform<A> for FieldsTranslation
where
    A: Translator + ?Sized + 'static,
{
    async fn transform(&self, translator: Arc<A>, mut record: Record) -> Result<Record> {
        for field in &self.fields {
            let text = required_str(&record, field)?;
            let translated = translator
                .translate(&text, self.target_lang.as_deref())
                .await?;
            record.insert(field.clone(), Value::String(translated));
        }
        Ok(record)
    }
}
