use crate::common::fixtures::database;
use crate::common::objects::{CountingRepository, write_blob, write_tree};
use assert_fs::TempDir;
use bit_objects::TreeEntry;
use bit_objects::artifacts::objects::object_type::ObjectType;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn resolve_nested_tree_lazily(
    database: (TempDir, CountingRepository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = database;
    let objects = repository.objects_path().to_path_buf();

    let main_oid = write_blob(&objects, "fn main() {}\n");
    let src_oid = write_tree(&objects, &[("100644", "main.rs", &main_oid)]);
    let root_oid = write_tree(&objects, &[("40000", "src", &src_oid)]);

    let root = TreeEntry::with_mode_str("040000", "root", root_oid.to_packed(), &repository)?;
    assert_eq!(root.oid(), &root_oid);
    assert_eq!(repository.lookups(), 0);

    let root_tree = root.object()?;
    let src = root_tree
        .as_tree()
        .and_then(|tree| tree.entries(&repository).next())
        .ok_or("root tree should list src")?;
    assert!(src.is_tree());
    assert!(!src.is_resolved());

    let src_tree = src.object()?;
    assert_eq!(src_tree.object_type(), ObjectType::Tree);
    assert_eq!(repository.lookups(), 2);

    // cached on both levels
    root.object()?;
    src.object()?;
    assert_eq!(repository.lookups(), 2);

    let main = src_tree
        .as_tree()
        .and_then(|tree| tree.get("main.rs"))
        .ok_or("src should contain main.rs")?;
    assert_eq!(main.oid, main_oid);

    Ok(())
}
