use bit_objects::artifacts::objects::object::ObjectBox;
use bit_objects::{Database, ObjectId, Repository};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Database wrapper recording how many lookups reach the store
pub struct CountingRepository {
    database: Database,
    lookups: AtomicUsize,
}

impl CountingRepository {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn objects_path(&self) -> &Path {
        self.database.objects_path()
    }
}

impl Repository for CountingRepository {
    fn lookup(&self, oid: &ObjectId) -> bit_objects::Result<ObjectBox> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.database.lookup(oid)
    }
}

/// Store `payload` as a loose object of `object_type` and return its id
pub fn write_object(objects: &Path, object_type: &str, payload: &[u8]) -> ObjectId {
    let mut content = format!("{object_type} {}\0", payload.len()).into_bytes();
    content.extend_from_slice(payload);

    let oid = ObjectId::try_parse(format!("{:x}", Sha1::digest(&content)))
        .expect("SHA-1 output is a valid object id");
    write_raw(objects, &oid, &content);

    oid
}

/// Store `content` deflated under `oid` without checking that it matches
pub fn write_raw(objects: &Path, oid: &ObjectId, content: &[u8]) {
    let path = objects.join(oid.to_path());
    std::fs::create_dir_all(path.parent().expect("object path has a parent"))
        .expect("Failed to create object directory");

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content).expect("Failed to compress");
    std::fs::write(path, encoder.finish().expect("Failed to compress"))
        .expect("Failed to write object");
}

pub fn write_blob(objects: &Path, content: &str) -> ObjectId {
    write_object(objects, "blob", content.as_bytes())
}

/// Entries are `(mode, name, oid)`, written in the given order
pub fn write_tree(objects: &Path, entries: &[(&str, &str, &ObjectId)]) -> ObjectId {
    let mut payload = Vec::new();
    for (mode, name, oid) in entries {
        payload.extend(format!("{mode} {name}\0").into_bytes());
        payload.extend(oid.to_packed());
    }

    write_object(objects, "tree", &payload)
}

pub fn write_commit(
    objects: &Path,
    tree: &ObjectId,
    parents: &[&ObjectId],
    author: &str,
    message: &str,
) -> ObjectId {
    let mut lines = vec![format!("tree {tree}")];
    for parent in parents {
        lines.push(format!("parent {parent}"));
    }
    lines.push(format!("author {author}"));
    lines.push(format!("committer {author}"));
    lines.push(String::new());
    lines.push(message.to_string());

    write_object(objects, "commit", lines.join("\n").as_bytes())
}
