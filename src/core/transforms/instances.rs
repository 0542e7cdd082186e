use super::{invalid, required_str};
use crate::core::batch::RecordTransform;
use crate::core::traits::Translator;
use crate::core::types::Record;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

const INSTRUCTION: &str = "instruction";
const INSTANCES: &str = "instances";
const INPUT: &str = "input";

/// Translates `instruction` and the `input` of every entry in `instances`.
///
/// Instance outputs and any other keys are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancesTranslation {
    target_lang: Option<String>,
}

impl InstancesTranslation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_lang(mut self, target_lang: impl Into<String>) -> Self {
        self.target_lang = Some(target_lang.into());
        self
    }
}

#[async_trait]
impl<A> RecordTransform<A> for InstancesTranslation
where
    A: Translator + ?Sized + 'static,
{
    async fn transform(&self, translator: Arc<A>, mut record: Record) -> Result<Record> {
        let target_lang = self.target_lang.as_deref();

        let instruction = required_str(&record, INSTRUCTION)?;
        let instruction = translator.translate(&instruction, target_lang).await?;
        record.insert(INSTRUCTION.to_string(), Value::String(instruction));

        // taken in place so the key keeps its position
        let instances = match record.get_mut(INSTANCES) {
            Some(Value::Array(items)) => Some(std::mem::take(items)),
            _ => None,
        };
        let Some(mut instances) = instances else {
            return Err(invalid(
                &record,
                "field \"instances\" is missing or not an array",
            ));
        };

        for (i, item) in instances.iter_mut().enumerate() {
            let Value::Object(instance) = item else {
                return Err(invalid(&record, format!("instances[{}] is not an object", i)));
            };
            let input = match instance.get(INPUT) {
                Some(Value::String(s)) => s.clone(),
                _ => {
                    return Err(invalid(
                        &record,
                        format!("instances[{}] has no string \"input\"", i),
                    ));
                }
            };
            let translated = translator.translate(&input, target_lang).await?;
            instance.insert(INPUT.to_string(), Value::String(translated));
        }

        record.insert(INSTANCES.to_string(), Value::Array(instances));
        Ok(record)
    }
}
