use super::{optional_str, required_str};
use crate::core::batch::RecordTransform;
use crate::core::traits::Responder;
use crate::core::types::Record;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Asks a responder to answer each record's instruction and stores the answer.
///
/// A missing or null input field counts as an empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFill {
    instruction_field: String,
    input_field: String,
    output_field: String,
    first_instance_input: bool,
}

impl ResponseFill {
    pub fn new(
        instruction_field: impl Into<String>,
        input_field: impl Into<String>,
        output_field: impl Into<String>,
    ) -> Self {
        Self {
            instruction_field: instruction_field.into(),
            input_field: input_field.into(),
            output_field: output_field.into(),
            first_instance_input: false,
        }
    }

    /// `instruction` + `input` into `answer`, taking the input from the first
    /// of `instances` when present
    pub fn answer() -> Self {
        Self::new("instruction", "input", "answer").with_first_instance_input(true)
    }

    /// `instruction` + `context` into `response`
    pub fn dolly() -> Self {
        Self::new("instruction", "context", "response")
    }

    /// Copy `instances[0].input` into the input field before answering
    pub fn with_first_instance_input(mut self, enabled: bool) -> Self {
        self.first_instance_input = enabled;
        self
    }
}

fn first_instance_input(record: &Record) -> Option<Value> {
    record
        .get("instances")?
        .as_array()?
        .first()?
        .get("input")
        .cloned()
}

#[async_trait]
impl<A> RecordTransform<A> for ResponseFill
where
    A: Responder + ?Sized + 'static,
{
    async fn transform(&self, responder: Arc<A>, mut record: Record) -> Result<Record> {
        if self.first_instance_input {
            if let Some(input) = first_instance_input(&record) {
                record.insert(self.input_field.clone(), input);
            }
        }

        let instruction = required_str(&record, &self.instruction_field)?;
        let input = optional_str(&record, &self.input_field)?.unwrap_or_default();

        let answer = responder.respond(&instruction, &input).await?;
        record.insert(self.output_field.clone(), Value::String(answer));
        Ok(record)
    }
}
