//! E2E tests for the DeepL translator
//!
//! Run with: DEEPL_API_KEY=xxx cargo test -- --ignored deepl

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{Dataset, instance_records};
    use crate::skip_without_api_key;
    use batchllm_rs::core::transforms::InstancesTranslation;
    use batchllm_rs::{ProviderConfig, ProviderKind, Translator, build_translator, translate_jsonl};

    fn config() -> ProviderConfig {
        ProviderConfig::new(ProviderKind::DeepL).with_env_fallback()
    }

    #[tokio::test]
    #[ignore]
    async fn test_deepl_translate_text() {
        skip_without_api_key!(ProviderKind::DeepL);

        let translator = build_translator(&config()).expect("Failed to create DeepL translator");
        let text = translator.translate("hello world!", None).await;

        assert!(text.is_ok(), "DeepL translation failed: {:?}", text.err());
        let text = text.unwrap();
        assert!(!text.is_empty());
        assert_ne!(text, "hello world!");
    }

    #[tokio::test]
    #[ignore]
    async fn test_deepl_translate_dataset_in_dev_mode() {
        skip_without_api_key!(ProviderKind::DeepL);

        let dataset = Dataset::new(&instance_records(8));
        let summary = translate_jsonl(
            &config(),
            dataset.run_config().with_dev(true).with_max_concurrency(2),
            InstancesTranslation::new(),
        )
        .await
        .expect("DeepL dataset run failed");

        assert_eq!(summary.dispatched, 5);
        assert_eq!(dataset.output_records().len(), 5);
    }
}
