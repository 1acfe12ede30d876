//! Store behavior against the host filesystem, in a scratch root.

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tmps::*;

fn bits(path: &Path) -> u32 {
    std::fs::metadata(path).unwrap().permissions().mode()
}

#[test]
fn open_creates_environment_directories_once() {
    let root = tempfile::tempdir().unwrap();
    RecordStore::open(NativeFs::new(), Config::new(root.path())).unwrap();
    RecordStore::open(NativeFs::new(), Config::new(root.path())).unwrap();
    for env in DEFAULT_ENVIRONMENTS {
        assert!(root.path().join(env).is_dir());
    }
}

#[test]
fn created_file_is_empty_with_exact_bits() {
    let root = tempfile::tempdir().unwrap();
    let store = RecordStore::open(NativeFs::new(), Config::new(root.path())).unwrap();
    let dev = store.config().environment("dev").unwrap();

    for (name, mode) in [("a", 0o644), ("b", 0o755), ("c", 0o632), ("d", 0o271)] {
        store.create(&dev, name, Mode::from_bits(mode)).unwrap();
        let path = root.path().join("dev").join(name);
        assert_eq!(bits(&path), 0o100000 | mode, "{name}");
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
        assert_eq!(store.read(&dev, name).unwrap().mode, Mode::from_bits(mode));
    }
}

#[test]
fn maurice_lifecycle() {
    let root = tempfile::tempdir().unwrap();
    let session = Session::open(NativeFs::new(), Config::new(root.path()), "dev").unwrap();
    let path = root.path().join("dev").join("Maurice");

    session
        .execute(&Request::new(
            Action::Post,
            Some(r#"{"env":"dev","mode":"0644","name":"Maurice"}"#.into()),
            None,
        ))
        .unwrap();
    assert_eq!(bits(&path), 0o100644);

    session
        .execute(&Request::new(
            Action::Put,
            Some(r#"{"env":"dev","mode":"0755","name":"Maurice"}"#.into()),
            Some("Maurice".into()),
        ))
        .unwrap();
    assert_eq!(bits(&path), 0o100755);

    session
        .execute(&Request::new(Action::Delete, None, Some("Maurice".into())))
        .unwrap();
    assert!(!path.exists());

    let err = session
        .execute(&Request::new(Action::Get, None, Some("Maurice".into())))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn listing_reports_externally_created_files() {
    let root = tempfile::tempdir().unwrap();
    let session = Session::open(NativeFs::new(), Config::new(root.path()), "val").unwrap();
    let file = root.path().join("val").join("legacy.txt");
    std::fs::write(&file, b"").unwrap();
    std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o600)).unwrap();

    assert_eq!(
        session.get_all().unwrap(),
        Outcome::Records(vec![Record::new("val", "legacy.txt", Mode::from_bits(0o600))])
    );
    assert_eq!(
        session.get("legacy.txt").unwrap(),
        Outcome::Record(Record::new("val", "legacy.txt", Mode::from_bits(0o600)))
    );
}

#[test]
fn symlinked_files_are_listed_with_target_mode() {
    let root = tempfile::tempdir().unwrap();
    let session = Session::open(NativeFs::new(), Config::new(root.path()), "inf").unwrap();
    let target = root.path().join("target");
    std::fs::write(&target, b"").unwrap();
    std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o640)).unwrap();
    std::os::unix::fs::symlink(&target, root.path().join("inf").join("link")).unwrap();

    assert_eq!(
        session.get_all().unwrap(),
        Outcome::Records(vec![Record::new("inf", "link", Mode::from_bits(0o640))])
    );
}

#[test]
fn listing_a_removed_environment_fails() {
    let root = tempfile::tempdir().unwrap();
    let session = Session::open(NativeFs::new(), Config::new(root.path()), "fr").unwrap();
    std::fs::remove_dir(root.path().join("fr")).unwrap();
    let err = session.get_all().unwrap_err();
    assert!(matches!(err, TmpsError::NotADirectory { .. }));
    assert!(err.to_string().ends_with("fr: no such dir"));
}
