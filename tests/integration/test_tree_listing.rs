// 作業依頼のファイル一覧（JSON応答を返すインメモリのソース）

use async_trait::async_trait;
use minerva_cli::tree::{
    list_work_request_files, RelatedItem, RelatedItemSource, DATA_CHILD_RELATIONSHIP,
    DELIVERABLE_RELATIONSHIP, INPUT_RELATIONSHIP,
};
use serde_json::{json, Value};
use std::collections::HashMap;

/// `(relationship, parent_id)` ごとに OData 形式の `value` 配列を返す
struct JsonSource {
    responses: HashMap<(String, String), Value>,
}

impl JsonSource {
    fn new(entries: &[(&str, &str, Value)]) -> Self {
        Self {
            responses: entries
                .iter()
                .map(|(rel, id, value)| ((rel.to_string(), id.to_string()), value.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl RelatedItemSource for JsonSource {
    async fn related_items(
        &self,
        _item_type: &str,
        parent_id: &str,
        relationship: &str,
    ) -> anyhow::Result<Vec<RelatedItem>> {
        let value = self
            .responses
            .get(&(relationship.to_string(), parent_id.to_string()))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404: {relationship}({parent_id})"))?;
        Ok(serde_json::from_value(value)?)
    }
}

#[tokio::test]
async fn test_work_request_inputs_and_outputs() {
    let source: Box<dyn RelatedItemSource> = Box::new(JsonSource::new(&[
        (
            INPUT_RELATIONSHIP,
            "WR76",
            json!([
                {"related_id": {"id": "D1", "keyed_name": "mesh", "is_folder": "1"}},
                {"related_id": {"id": "F9", "keyed_name": "load.inp", "file_size": "512", "is_folder": "0", "local_file": "LF9"}},
                {"related_id": null}
            ]),
        ),
        (
            DATA_CHILD_RELATIONSHIP,
            "D1",
            json!([
                {"related_id": {"id": "F1", "keyed_name": "part.cdb", "file_size": 4096, "is_folder": "0", "classification": "Mesh"}}
            ]),
        ),
        (
            DELIVERABLE_RELATIONSHIP,
            "WR76",
            json!([
                {"related_id": {"id": "D2", "keyed_name": "results", "is_folder": "1"}}
            ]),
        ),
    ]));

    let files = list_work_request_files(&source, "WR76").await.unwrap();

    let inputs: Vec<(&str, usize, u64)> = files
        .inputs
        .iter()
        .map(|e| (e.id.as_str(), e.depth, e.size))
        .collect();
    assert_eq!(inputs, vec![("D1", 0, 0), ("F1", 1, 4096), ("F9", 0, 512)]);
    assert_eq!(files.inputs[1].item_type.as_deref(), Some("Mesh"));
    assert_eq!(files.inputs[2].file_id.as_deref(), Some("LF9"));

    // D2 の子は取得できない（404）がフォルダ自体は残る
    assert_eq!(files.outputs.len(), 1);
    assert!(files.outputs[0].is_folder);

    let serialized = serde_json::to_value(&files).unwrap();
    assert_eq!(serialized["inputs"][1]["type"], "Mesh");
    assert_eq!(serialized["inputs"][1]["name"], "part.cdb");
}

#[tokio::test]
async fn test_missing_work_request_fails() {
    let source = JsonSource::new(&[]);
    let result = list_work_request_files(&source, "WR-missing").await;
    assert!(result.is_err());
}
