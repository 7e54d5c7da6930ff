use proptest::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use tokio::runtime::Runtime;

use filedeck_config::Settings;
use filedeck_core::TreeWalker;
use filedeck_models::{Entry, EntryKind, MediaCategory};

#[derive(Debug, Clone)]
enum Node {
    File(u16),
    Dir(Vec<Node>),
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = any::<u16>().prop_map(|size| Node::File(size % 4096));
    leaf.prop_recursive(4, 48, 6, |inner| prop::collection::vec(inner, 0..6).prop_map(Node::Dir))
}

fn tree_strategy() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(node_strategy(), 0..8)
}

fn materialize(dir: &Path, nodes: &[Node]) -> std::io::Result<()> {
    for (idx, node) in nodes.iter().enumerate() {
        match node {
            Node::File(size) => {
                let ext = ["jpg", "mp4", "txt", "bin"][idx % 4];
                std::fs::write(dir.join(format!("file_{idx}.{ext}")), vec![0u8; usize::from(*size)])?;
            }
            Node::Dir(children) => {
                let sub = dir.join(format!("dir_{idx}"));
                std::fs::create_dir(&sub)?;
                materialize(&sub, children)?;
            }
        }
    }
    Ok(())
}

fn expected_size(nodes: &[Node]) -> u64 {
    nodes
        .iter()
        .map(|node| match node {
            Node::File(size) => u64::from(*size),
            Node::Dir(children) => expected_size(children),
        })
        .sum()
}

fn expected_files(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::File(_) => 1,
            Node::Dir(children) => expected_files(children),
        })
        .sum()
}

fn check_entry(entry: &Entry) -> Result<(), TestCaseError> {
    // every generated file has a known extension, so only folders fall back
    prop_assert_eq!(entry.media_category() == MediaCategory::Folder, entry.kind() == EntryKind::Folder);
    prop_assert_eq!(entry.is_folder(), entry.kind() == EntryKind::Folder);

    if entry.is_folder() {
        let sum: u64 = entry.children().iter().map(Entry::size_in_bytes).sum();
        prop_assert_eq!(entry.size_in_bytes(), sum);
        for child in entry.children() {
            check_entry(child)?;
        }
    } else {
        prop_assert!(entry.children().is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn folder_sizes_are_sums_of_children(nodes in tree_strategy()) {
        let temp_dir = TempDir::new().unwrap();
        materialize(temp_dir.path(), &nodes).unwrap();

        let walker = TreeWalker::new(&Settings {
            storage_root: temp_dir.path().to_path_buf(),
            max_concurrent_io: 3,
            ..Default::default()
        });
        let rt = Runtime::new().unwrap();
        let root = rt.block_on(walker.walk("")).unwrap();

        prop_assert_eq!(root.size_in_bytes(), expected_size(&nodes));
        prop_assert_eq!(root.file_count(), expected_files(&nodes));
        prop_assert_eq!(root.children().len(), nodes.len());
        check_entry(&root)?;
    }
}
