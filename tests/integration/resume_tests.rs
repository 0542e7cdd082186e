//! Incremental runs and resume

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{Dataset, dolly_records, record, to_jsonl};
    use crate::common::{FakeResponder, FakeTranslator};
    use batchllm_rs::BatchRunner;
    use batchllm_rs::core::transforms::{FieldsTranslation, ResponseFill};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_resume_dispatches_only_missing_ids() {
        let dataset = Dataset::new(&dolly_records(3));
        let done = record(json!({
            "id": 2,
            "instruction": "이미 번역됨",
            "context": "완료",
            "category": "open_qa",
        }));
        let done_line = to_jsonl(std::slice::from_ref(&done));
        dataset.write_output(&done_line);

        let translator = Arc::new(FakeTranslator::new());
        let summary = BatchRunner::new(dataset.run_config().with_incremental(true))
            .run(translator.clone(), Arc::new(FieldsTranslation::dolly()))
            .await
            .unwrap();

        assert_eq!(summary.loaded, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.dispatched, 2);
        assert_eq!(translator.call_count(), 4);
        assert!(!translator.seen().contains(&"instruction 2".to_string()));

        let text = dataset.output_text();
        assert!(text.starts_with(&done_line));
        let mut ids: Vec<u64> = dataset
            .output_ids()
            .iter()
            .map(|id| id.as_u64().unwrap())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let dataset = Dataset::new(&dolly_records(4));
        let config = dataset.run_config().with_incremental(true).with_max_concurrency(2);

        BatchRunner::new(config.clone())
            .run(Arc::new(FakeTranslator::new()), Arc::new(FieldsTranslation::dolly()))
            .await
            .unwrap();
        let first = dataset.output_text();
        assert_eq!(first.lines().count(), 4);

        let translator = Arc::new(FakeTranslator::new());
        let summary = BatchRunner::new(config)
            .run(translator.clone(), Arc::new(FieldsTranslation::dolly()))
            .await
            .unwrap();

        assert_eq!(summary.dispatched, 0);
        assert_eq!(summary.skipped, 4);
        assert_eq!(translator.call_count(), 0);
        assert_eq!(dataset.output_text(), first);
    }

    #[tokio::test]
    async fn test_first_incremental_run_creates_output() {
        let dataset = Dataset::new(&dolly_records(2));
        assert!(!dataset.output.exists());

        let responder = Arc::new(FakeResponder::new());
        BatchRunner::new(dataset.run_config().with_incremental(true))
            .run(responder.clone(), Arc::new(ResponseFill::dolly()))
            .await
            .unwrap();

        assert_eq!(responder.call_count(), 2);
        let out = dataset.output_records();
        assert_eq!(out.len(), 2);
        assert!(
            out.iter()
                .all(|r| r["response"].as_str().unwrap().starts_with("answer to instruction"))
        );
    }

    #[tokio::test]
    async fn test_dev_sample_is_taken_before_skipping() {
        let dataset = Dataset::new(&dolly_records(8));
        // ids 1..=5 form the dev sample; 2 and 7 are already done
        dataset.write_output(&to_jsonl(&[
            record(json!({"id": 2, "instruction": "x", "context": "y"})),
            record(json!({"id": 7, "instruction": "x", "context": "y"})),
        ]));

        let translator = Arc::new(FakeTranslator::new());
        let summary = BatchRunner::new(dataset.run_config().with_incremental(true).with_dev(true))
            .run(translator.clone(), Arc::new(FieldsTranslation::new(["instruction"])))
            .await
            .unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.dispatched, 4);
        let mut seen = translator.seen();
        seen.sort();
        assert_eq!(
            seen,
            vec!["instruction 1", "instruction 3", "instruction 4", "instruction 5"]
        );
    }

    #[tokio::test]
    async fn test_ids_compare_by_json_value() {
        let dataset = Dataset::new(&[
            record(json!({"id": "1", "instruction": "string id", "context": ""})),
            record(json!({"id": 1, "instruction": "number id", "context": ""})),
        ]);
        dataset.write_output(&to_jsonl(&[record(json!({"id": 1}))]));

        let translator = Arc::new(FakeTranslator::new());
        BatchRunner::new(dataset.run_config().with_incremental(true))
            .run(translator.clone(), Arc::new(FieldsTranslation::dolly()))
            .await
            .unwrap();

        assert_eq!(translator.seen(), vec!["string id"]);
    }

    #[tokio::test]
    async fn test_torn_last_line_is_redone() {
        let dataset = Dataset::new(&dolly_records(3));
        let complete = to_jsonl(&[record(json!({"id": 1, "instruction": "a", "context": "b"}))]);
        dataset.write_output(&format!("{complete}{{\"id\":2,\"instr"));

        let translator = Arc::new(FakeTranslator::new());
        let summary = BatchRunner::new(dataset.run_config().with_incremental(true))
            .run(translator.clone(), Arc::new(FieldsTranslation::dolly()))
            .await
            .unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.dispatched, 2);
        assert!(dataset.output_text().starts_with(&complete));
        assert_eq!(dataset.output_records().len(), 3);
    }

    #[tokio::test]
    async fn test_unterminated_complete_line_is_kept() {
        let dataset = Dataset::new(&dolly_records(3));
        let done = to_jsonl(&[record(json!({
            "id": 2,
            "instruction": "이미 번역됨",
            "context": "완료",
        }))]);
        let done = done.trim_end();
        dataset.write_output(done);

        let translator = Arc::new(FakeTranslator::new());
        let summary = BatchRunner::new(dataset.run_config().with_incremental(true))
            .run(translator.clone(), Arc::new(FieldsTranslation::dolly()))
            .await
            .unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.dispatched, 2);
        assert!(!translator.seen().iter().any(|text| text.ends_with(" 2")));
        assert!(dataset.output_text().starts_with(&format!("{done}\n")));
        assert_eq!(dataset.output_records().len(), 3);
    }
}
