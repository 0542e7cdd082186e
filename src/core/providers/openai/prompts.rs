//! Prompt templates for chat-model translation and evaluation

use super::client::ChatMessage;

/// System prompt for instruction answering
pub const EVAL_SYSTEM_PROMPT: &str = "당신은 유용한 어시시턴트입니다.";

/// Where the translation instruction goes in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Ask in the user turn; used with gpt-3.5-turbo
    Paraphrase,
    /// Ask in the system turn and send the bare text as the user turn; used with gpt-4
    SystemInstruction,
}

fn translation_guidelines(target_lang: &str) -> String {
    format!(
        "You are a helpful assistant that translates English to {target_lang}. \
         Please paraphrase as much as possible when translating. \
         Do not add expressions that are not in the source sentences. \
         Do not add pronunciations for the target language."
    )
}

/// Messages asking the model to translate `text` into `target_lang`
pub fn translation_messages(style: PromptStyle, text: &str, target_lang: &str) -> Vec<ChatMessage> {
    match style {
        PromptStyle::Paraphrase => vec![
            ChatMessage::system(translation_guidelines(target_lang)),
            ChatMessage::user(format!(
                "Please provide the {target_lang} translation for these sentences: {text}"
            )),
        ],
        PromptStyle::SystemInstruction => vec![
            ChatMessage::system(format!(
                "{} Please provide the {target_lang} translation for these sentences:",
                translation_guidelines(target_lang)
            )),
            ChatMessage::user(text),
        ],
    }
}

/// Messages asking the model to answer `instruction`.
///
/// A blank `input` selects the instruction-only template.
pub fn evaluation_messages(instruction: &str, input: &str) -> Vec<ChatMessage> {
    let user = if input.trim().is_empty() {
        format!("##Instruction:\n\n{instruction}\n\n##Output:\n\n")
    } else {
        format!("##Instruction:\n\n{instruction}\n\n##Input:\n\n{input}\n\n##Output:\n\n")
    };
    vec![ChatMessage::system(EVAL_SYSTEM_PROMPT), ChatMessage::user(user)]
}
