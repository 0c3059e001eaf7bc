use crate::common::fixtures::database;
use crate::common::objects::{CountingRepository, write_blob};
use assert_fs::TempDir;
use bit_objects::{ObjectError, TreeEntry};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::regular_file("100644", 0o100644, "README")]
#[case::executable("100755", 0o100755, "build.sh")]
#[case::symlink("120000", 0o120000, "latest")]
#[case::directory("040000", 0o40000, "src")]
#[case::gitlink("160000", 0o160000, "vendor")]
fn entries_built_three_ways_agree(
    database: (TempDir, CountingRepository),
    #[case] mode_str: &str,
    #[case] mode: u32,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, repository) = database;
    let oid = write_blob(repository.objects_path(), name);

    let mut line = format!("{mode_str} {name}\0").into_bytes();
    line.extend(oid.to_packed());

    let from_line = TreeEntry::from_tree_line(&line, &repository)?;
    let from_mode = TreeEntry::with_mode(mode, name, oid.to_string(), &repository)?;
    let from_mode_str =
        TreeEntry::with_mode_str(mode_str, name, oid.to_string().to_uppercase(), &repository)?;

    assert_eq!(from_line, from_mode);
    assert_eq!(from_mode, from_mode_str);
    assert_eq!(from_line.mode(), mode);
    assert_eq!(from_line.oid(), &oid);
    assert_eq!(repository.lookups(), 0);

    Ok(())
}

#[rstest]
#[case::non_octal_digit("10064a", ObjectError::InvalidMode("10064a".to_string()))]
#[case::eight("100648", ObjectError::InvalidMode("100648".to_string()))]
#[case::empty("", ObjectError::InvalidMode(String::new()))]
fn mode_strings_must_be_octal(
    database: (TempDir, CountingRepository),
    #[case] mode_str: &str,
    #[case] expected: ObjectError,
) {
    let (_dir, repository) = database;
    let result = TreeEntry::with_mode_str(
        mode_str,
        "README",
        "da39a3ee5e6b4b0d3255bfef95601890afd80709",
        &repository,
    );

    assert_eq!(result.unwrap_err(), expected);
}
