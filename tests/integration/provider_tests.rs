//! HTTP providers against mock servers

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{Dataset, dolly_records};
    use batchllm_rs::core::providers::{ChatResponder, ChatTranslator, DeepLTranslator};
    use batchllm_rs::core::transforms::{FieldsTranslation, ResponseFill};
    use batchllm_rs::{
        BatchError, ProviderConfig, ProviderError, ProviderKind, Responder, Translator,
        eval_jsonl, translate_jsonl,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn deepl_config(server: &MockServer) -> ProviderConfig {
        ProviderConfig::new(ProviderKind::DeepL)
            .with_api_key("test-key:fx")
            .with_base_url(server.uri())
    }

    fn openai_config(kind: ProviderKind, server: &MockServer) -> ProviderConfig {
        ProviderConfig::new(kind)
            .with_api_key("sk-test")
            .with_base_url(server.uri())
    }

    fn deepl_reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "translations": [{"detected_source_language": "EN", "text": text}]
        }))
    }

    fn chat_reply(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        }))
    }

    #[tokio::test]
    async fn test_deepl_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .and(header("authorization", "DeepL-Auth-Key test-key:fx"))
            .and(body_json(json!({"text": ["hello world!"], "target_lang": "KO"})))
            .respond_with(deepl_reply("안녕하세요 세계!"))
            .expect(1)
            .mount(&server)
            .await;

        let translator = DeepLTranslator::new(&deepl_config(&server)).unwrap();
        let text = translator.translate("hello world!", None).await.unwrap();
        assert_eq!(text, "안녕하세요 세계!");
    }

    #[tokio::test]
    async fn test_deepl_target_lang_override() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .and(body_partial_json(json!({"target_lang": "JA"})))
            .respond_with(deepl_reply("こんにちは"))
            .mount(&server)
            .await;

        let translator = DeepLTranslator::new(&deepl_config(&server)).unwrap();
        assert_eq!(translator.translate("hello", Some("ja")).await.unwrap(), "こんにちは");
    }

    #[tokio::test]
    async fn test_deepl_blank_text_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(deepl_reply("unused"))
            .expect(0)
            .mount(&server)
            .await;

        let translator = DeepLTranslator::new(&deepl_config(&server)).unwrap();
        assert_eq!(translator.translate("  ", None).await.unwrap(), "  ");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (ResponseTemplate::new(403), "auth"),
            (
                ResponseTemplate::new(429).insert_header("retry-after", "7"),
                "rate",
            ),
            (ResponseTemplate::new(456), "quota"),
            (ResponseTemplate::new(503), "api"),
        ];

        for (template, expected) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(template)
                .mount(&server)
                .await;

            let translator = DeepLTranslator::new(&deepl_config(&server)).unwrap();
            let err = translator.translate("hi", None).await.unwrap_err();
            match (expected, &err) {
                ("auth", ProviderError::Authentication { .. }) => {}
                ("rate", ProviderError::RateLimit { retry_after, .. }) => {
                    assert_eq!(*retry_after, Some(7));
                    assert!(err.is_retryable());
                }
                ("quota", ProviderError::QuotaExceeded { .. }) => assert!(!err.is_retryable()),
                ("api", ProviderError::ApiError { status, .. }) => {
                    assert_eq!(*status, 503);
                    assert!(err.is_retryable());
                }
                _ => panic!("{expected}: unexpected error {err:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parsing_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translations": []})))
            .mount(&server)
            .await;

        let translator = DeepLTranslator::new(&deepl_config(&server)).unwrap();
        let err = translator.translate("hi", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::ResponseParsing { .. }));
    }

    #[tokio::test]
    async fn test_chatgpt_paraphrase_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "gpt-3.5-turbo"})))
            .respond_with(chat_reply("안녕"))
            .expect(1)
            .mount(&server)
            .await;

        let translator = ChatTranslator::new(&openai_config(ProviderKind::ChatGpt, &server)).unwrap();
        assert_eq!(translator.translate("hi", None).await.unwrap(), "안녕");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.last().unwrap()["role"], "user");
        let prompt = messages.last().unwrap()["content"].as_str().unwrap();
        assert!(prompt.contains("Korean"));
        assert!(prompt.contains("hi"));
    }

    #[tokio::test]
    async fn test_gpt4_instruction_in_system_turn() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"model": "gpt-4"})))
            .respond_with(chat_reply("안녕"))
            .mount(&server)
            .await;

        let translator = ChatTranslator::new(&openai_config(ProviderKind::Gpt4, &server)).unwrap();
        translator.translate("hi", None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert!(body["messages"][0]["content"].as_str().unwrap().contains("Korean"));
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "hi"}));
    }

    #[tokio::test]
    async fn test_responder_prompt_and_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(chat_reply("42"))
            .mount(&server)
            .await;

        let responder = ChatResponder::new(&openai_config(ProviderKind::Gpt4, &server)).unwrap();
        assert_eq!(responder.respond("Add", "40 2").await.unwrap(), "42");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["messages"][0]["content"], "당신은 유용한 어시시턴트입니다.");
        assert_eq!(
            body["messages"][1]["content"],
            "##Instruction:\n\nAdd\n\n##Input:\n\n40 2\n\n##Output:\n\n"
        );

        let bad = openai_config(ProviderKind::Gpt4, &server).with_api_key("sk-wrong");
        let unauthorized = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&unauthorized)
            .await;
        let responder = ChatResponder::new(&bad.with_base_url(unauthorized.uri())).unwrap();
        let err = responder.respond("Add", "").await.unwrap_err();
        assert!(matches!(err, ProviderError::Authentication { .. }));
    }

    #[tokio::test]
    async fn test_translate_dataset_through_deepl() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .respond_with(deepl_reply("번역"))
            .expect(6)
            .mount(&server)
            .await;

        let dataset = Dataset::new(&dolly_records(3));
        let summary = translate_jsonl(
            &deepl_config(&server),
            dataset.run_config().with_max_concurrency(2),
            FieldsTranslation::dolly(),
        )
        .await
        .unwrap();

        assert_eq!(summary.written, 3);
        assert!(
            dataset
                .output_records()
                .iter()
                .all(|r| r["instruction"] == "번역" && r["context"] == "번역")
        );
    }

    #[tokio::test]
    async fn test_eval_dataset_through_chat() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(chat_reply("응답"))
            .mount(&server)
            .await;

        let dataset = Dataset::new(&dolly_records(2));
        eval_jsonl(
            &openai_config(ProviderKind::Gpt4, &server),
            dataset.run_config().with_incremental(true),
            ResponseFill::dolly(),
        )
        .await
        .unwrap();

        assert!(dataset.output_records().iter().all(|r| r["response"] == "응답"));
    }

    #[tokio::test]
    async fn test_provider_error_aborts_dataset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dataset = Dataset::new(&dolly_records(2));
        let err = translate_jsonl(&deepl_config(&server), dataset.run_config(), FieldsTranslation::dolly())
            .await
            .unwrap_err();

        assert!(matches!(err, BatchError::Adapter(ProviderError::ApiError { status: 500, .. })));
        assert!(err.is_retryable());
    }
}
