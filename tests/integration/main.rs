// 統合テストのエントリポイント

#[path = "../fixtures/mod.rs"]
mod fixtures;

mod test_client_operations;
mod test_process_execution;
mod test_tree_listing;
