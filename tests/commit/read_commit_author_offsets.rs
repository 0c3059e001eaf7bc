use crate::common::fixtures::database;
use crate::common::objects::{CountingRepository, write_blob, write_commit, write_tree};
use assert_fs::TempDir;
use bit_objects::{ObjectError, Repository, parse_offset};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::east("+0200", 120)]
#[case::west_with_minutes("-0530", -330)]
#[case::utc("+0000", 0)]
#[case::far_east("+1245", 765)]
fn read_commit_author_offsets(
    database: (TempDir, CountingRepository),
    #[case] offset: &str,
    #[case] minutes: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = database;
    let objects = repository.objects_path().to_path_buf();

    let blob = write_blob(&objects, "content");
    let tree = write_tree(&objects, &[("100644", "file.txt", &blob)]);
    let parent = write_commit(
        &objects,
        &tree,
        &[],
        "A U Thor <author@example.com> 1700000000 +0000",
        "Initial commit",
    );
    let author = format!("A U Thor <author@example.com> 1700003600 {offset}");
    let commit_oid = write_commit(&objects, &tree, &[&parent], &author, "Second commit");

    let object = repository.lookup(&commit_oid)?;
    let commit = object.as_commit().ok_or("expected a commit")?;

    assert_eq!(commit.parent(), Some(&parent));
    assert_eq!(commit.tree_oid(), &tree);
    assert_eq!(
        commit.author().timestamp().offset().local_minus_utc(),
        minutes * 60
    );
    assert_eq!(commit.timestamp().timestamp(), 1_700_003_600);
    assert_eq!(parse_offset(offset)?.minutes(), minutes);
    assert_eq!(commit.author().display(), author);
    assert_eq!(commit.short_message(), "Second commit");

    Ok(())
}

#[rstest]
fn commit_with_offset_beyond_a_day_is_corrupt(
    database: (TempDir, CountingRepository),
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = database;
    let objects = repository.objects_path().to_path_buf();

    let tree = write_tree(&objects, &[]);
    let commit_oid = write_commit(
        &objects,
        &tree,
        &[],
        "A U Thor <author@example.com> 1700000000 +2400",
        "Far east",
    );

    assert_eq!(parse_offset("+2400")?.minutes(), 1440);
    let err = repository.lookup(&commit_oid).unwrap_err();
    assert!(
        matches!(&err, ObjectError::CorruptObject { reason, .. } if reason.contains("out of range")),
        "{err}"
    );

    Ok(())
}
