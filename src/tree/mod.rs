//! リモートのフォルダ構造を深さ付きのフラットなリストに展開する
//!
//! 子アイテムの取得は `RelatedItemSource` に委ねる（HTTP側の実装はこのクレートの外）。
//! 再帰は使わず明示的なスタックで前順走査する。

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

pub const WORK_REQUEST_TYPE: &str = "Ans_SimulationRequest";
pub const DATA_TYPE: &str = "Ans_Data";
pub const DATA_CHILD_RELATIONSHIP: &str = "Ans_DataChild";
pub const INPUT_RELATIONSHIP: &str = "Ans_SimReq_Input";
pub const DELIVERABLE_RELATIONSHIP: &str = "Ans_SimReq_Deliverable";

/// 関連先のアイテム（`related_id` を展開したもの）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteNode {
    pub id: String,
    #[serde(default)]
    pub keyed_name: Option<String>,
    /// サーバーによって数値または文字列で返る
    #[serde(default)]
    pub file_size: Option<Value>,
    #[serde(default)]
    pub classification: Option<String>,
    /// `"1"` / `"0"` または真偽値
    #[serde(default)]
    pub is_folder: Option<Value>,
    #[serde(default)]
    pub local_file: Option<String>,
}

impl RemoteNode {
    pub fn is_folder(&self) -> bool {
        match &self.is_folder {
            Some(Value::String(s)) => s == "1",
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_u64() == Some(1),
            _ => false,
        }
    }

    pub fn size(&self) -> u64 {
        match &self.file_size {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

/// リレーションシップ1件（関連先が欠けている行もある）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedItem {
    #[serde(default)]
    pub related_id: Option<RemoteNode>,
}

impl From<RemoteNode> for RelatedItem {
    fn from(node: RemoteNode) -> Self {
        Self {
            related_id: Some(node),
        }
    }
}

/// 展開後の1エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub name: Option<String>,
    pub size: u64,
    pub is_folder: bool,
    pub file_id: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub depth: usize,
}

impl FileEntry {
    fn from_node(node: &RemoteNode, depth: usize) -> Self {
        Self {
            id: node.id.clone(),
            name: node.keyed_name.clone(),
            size: node.size(),
            is_folder: node.is_folder(),
            file_id: node.local_file.clone(),
            item_type: node.classification.clone(),
            depth,
        }
    }
}

/// 作業依頼に紐づく入力と成果物
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkRequestFiles {
    pub inputs: Vec<FileEntry>,
    pub outputs: Vec<FileEntry>,
}

/// 関連アイテムの取得元
#[automock]
#[async_trait]
pub trait RelatedItemSource: Send + Sync {
    /// 親アイテムからリレーションシップを辿った関連アイテムを取得
    async fn related_items(
        &self,
        item_type: &str,
        parent_id: &str,
        relationship: &str,
    ) -> Result<Vec<RelatedItem>>;
}

#[async_trait]
impl RelatedItemSource for Box<dyn RelatedItemSource> {
    async fn related_items(
        &self,
        item_type: &str,
        parent_id: &str,
        relationship: &str,
    ) -> Result<Vec<RelatedItem>> {
        self.as_ref()
            .related_items(item_type, parent_id, relationship)
            .await
    }
}

fn nodes(items: Vec<RelatedItem>) -> std::vec::IntoIter<RemoteNode> {
    items
        .into_iter()
        .filter_map(|item| item.related_id)
        .collect::<Vec<_>>()
        .into_iter()
}

/// ルートから辿れるアイテムを前順で列挙する
///
/// ルートの取得失敗はそのまま返す。子フォルダの取得失敗はログに残して
/// そのフォルダ配下をスキップする。
/// 循環は祖先の経路上だけで判定する。複数の親に共有されたフォルダは親ごとに展開し、
/// 自身の祖先に現れたフォルダは一覧に載せるが展開しない。
pub async fn flatten_related<S>(
    source: &S,
    item_type: &str,
    root_id: &str,
    relationship: &str,
) -> Result<Vec<FileEntry>>
where
    S: RelatedItemSource + ?Sized,
{
    let root = source
        .related_items(item_type, root_id, relationship)
        .await?;

    let mut entries = Vec::new();
    // 現在の経路上で展開中のフォルダ
    let mut ancestors: HashSet<String> = HashSet::new();
    let mut stack: Vec<(_, usize, Option<String>)> = vec![(nodes(root), 0, None)];

    while let Some((iter, depth, _)) = stack.last_mut() {
        let depth = *depth;
        let Some(node) = iter.next() else {
            if let Some((_, _, Some(folder))) = stack.pop() {
                ancestors.remove(&folder);
            }
            continue;
        };

        entries.push(FileEntry::from_node(&node, depth));

        if !node.is_folder() {
            continue;
        }
        if ancestors.contains(&node.id) {
            warn!(folder = %node.id, depth, "folder is its own ancestor, skipping cyclic reference");
            continue;
        }

        match source
            .related_items(DATA_TYPE, &node.id, DATA_CHILD_RELATIONSHIP)
            .await
        {
            Ok(children) => {
                debug!(folder = %node.id, count = children.len(), depth = depth + 1, "expanded folder");
                ancestors.insert(node.id.clone());
                stack.push((nodes(children), depth + 1, Some(node.id)));
            }
            Err(e) => {
                warn!(folder = %node.id, depth = depth + 1, "failed to list folder contents: {e:#}");
            }
        }
    }

    Ok(entries)
}

/// 作業依頼（`Ans_SimulationRequest`）の入力・成果物ファイルを再帰的に列挙
pub async fn list_work_request_files<S>(source: &S, work_request_id: &str) -> Result<WorkRequestFiles>
where
    S: RelatedItemSource + ?Sized,
{
    let inputs =
        flatten_related(source, WORK_REQUEST_TYPE, work_request_id, INPUT_RELATIONSHIP).await?;
    let outputs = flatten_related(
        source,
        WORK_REQUEST_TYPE,
        work_request_id,
        DELIVERABLE_RELATIONSHIP,
    )
    .await?;

    Ok(WorkRequestFiles { inputs, outputs })
}
