use crate::common::fixtures::database;
use crate::common::objects::{CountingRepository, write_blob, write_commit, write_tree};
use assert_fs::TempDir;
use bit_objects::artifacts::objects::entry_mode::EntryMode;
use bit_objects::artifacts::objects::object_type::ObjectType;
use bit_objects::{ObjectError, ObjectId, TreeEntry};
use pretty_assertions::assert_eq;
use rstest::rstest;

const SUBMODULE_COMMIT: &str = "1f2e3d4c5b6a79881f2e3d4c5b6a79881f2e3d4c";

#[rstest]
fn resolve_submodule_entry_without_commit(
    database: (TempDir, CountingRepository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = database;
    let objects = repository.objects_path().to_path_buf();
    let submodule_oid = ObjectId::try_parse(SUBMODULE_COMMIT)?;
    let tree_oid = write_tree(&objects, &[("160000", "vendor", &submodule_oid)]);

    let tree = TreeEntry::with_mode(0o40000, "root", tree_oid.to_string(), &repository)?.object()?;
    let vendor = tree
        .as_tree()
        .and_then(|tree| tree.entries(&repository).next())
        .ok_or("tree should list vendor")?;

    assert_eq!(vendor.kind(), Some(EntryMode::Gitlink));
    assert_eq!(vendor.object_type(), ObjectType::Commit);

    // the submodule commit lives in another repository
    assert_eq!(
        vendor.object().unwrap_err(),
        ObjectError::ObjectNotFound(SUBMODULE_COMMIT.to_string())
    );
    assert!(!vendor.is_resolved());

    // once it shows up the same entry resolves
    let blob = write_blob(&objects, "README");
    let inner_tree = write_tree(&objects, &[("100644", "README", &blob)]);
    let commit_oid = write_commit(
        &objects,
        &inner_tree,
        &[],
        "A U Thor <author@example.com> 1700000000 +0100",
        "Vendor snapshot",
    );
    let gitlink = TreeEntry::with_mode(0o160000, "vendor", commit_oid.to_string(), &repository)?;
    let commit = gitlink.object()?;
    assert_eq!(
        commit.as_commit().map(|commit| commit.tree_oid().clone()),
        Some(inner_tree)
    );

    Ok(())
}
