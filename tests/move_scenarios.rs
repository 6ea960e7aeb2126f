use std::fs;
use tempfile::tempdir;

use versioned_fs::naming::NamingPolicy;
use versioned_fs::{FileSystem, FsError, ListOptions, Locations, OnExhausted, TransferOptions};

#[test]
fn moving_every_file_empties_source_and_fills_destination() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src_dir = td.path().join("incoming");
    let dst_dir = td.path().join("sorted");
    fs::create_dir(&src_dir)?;
    fs::create_dir(&dst_dir)?;
    for i in 0..12 {
        fs::write(src_dir.join(format!("file{i}.dat")), format!("{i}"))?;
    }

    let fs_ = FileSystem::new(Locations::rooted_at(td.path()));
    let entries = fs_.contents_of_directory(&src_dir, ListOptions::default())?;
    assert_eq!(entries.len(), 12);
    for entry in &entries {
        fs_.move_item(entry, &dst_dir)?;
    }

    assert_eq!(fs::read_dir(&src_dir)?.count(), 0);
    assert_eq!(fs::read_dir(&dst_dir)?.count(), 12);
    assert_eq!(fs::read_to_string(dst_dir.join("file7.dat"))?, "7");
    Ok(())
}

#[test]
fn move_onto_taken_name_versions_it() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let a = td.path().join("src").join("report.pdf");
    let out = td.path().join("out");
    fs::create_dir_all(a.parent().unwrap())?;
    fs::create_dir(&out)?;
    fs::write(&a, b"%PDF new")?;
    fs::write(out.join("report.pdf"), b"%PDF old")?;

    let fs_ = FileSystem::new(Locations::rooted_at(td.path()));
    let dest = fs_.move_item(&a, &out)?;
    assert_eq!(dest, out.join("report-(1).pdf"));
    assert!(!a.exists());
    assert_eq!(fs::read(out.join("report.pdf"))?, b"%PDF old");
    Ok(())
}

#[test]
fn move_directory_keeps_contents() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let tree = td.path().join("project");
    fs::create_dir_all(tree.join("src"))?;
    fs::write(tree.join("src/main.rs"), b"fn main() {}")?;
    let out = td.path().join("archive");
    fs::create_dir_all(out.join("project"))?;

    let fs_ = FileSystem::new(Locations::rooted_at(td.path()));
    let dest = fs_.move_item(&tree, &out)?;
    assert_eq!(dest, out.join("project-(1)"));
    assert!(!tree.exists());
    assert_eq!(fs::read(dest.join("src/main.rs"))?, b"fn main() {}");
    Ok(())
}

#[test]
fn move_missing_source_is_source_not_found() {
    let td = tempdir().unwrap();
    let fs_ = FileSystem::new(Locations::rooted_at(td.path()));
    let err = fs_.move_item(&td.path().join("ghost"), td.path()).unwrap_err();
    assert!(matches!(err.downcast_ref::<FsError>(), Some(FsError::SourceNotFound(_))));
    assert_eq!(err.downcast_ref::<FsError>().map(FsError::code), Some(2));
}

#[test]
fn overwrite_move_onto_itself_keeps_the_source() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let a = td.path().join("a.txt");
    fs::write(&a, b"only copy")?;

    let fs_ = FileSystem::new(Locations::rooted_at(td.path()))
        .with_policy(NamingPolicy::automatic().with_max_renaming_attempts(0))
        .with_transfer_options(TransferOptions {
            on_exhausted: OnExhausted::Overwrite,
            ..TransferOptions::default()
        });

    for dst in [a.clone(), td.path().to_path_buf()] {
        let err = fs_.move_item(&a, &dst).unwrap_err();
        assert_eq!(err.downcast_ref::<FsError>().map(FsError::code), Some(3));
        assert_eq!(fs::read(&a)?, b"only copy");
    }
    Ok(())
}

#[test]
fn overwrite_move_replaces_occupant() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("incoming").join("report.pdf");
    let out = td.path().join("out");
    fs::create_dir_all(src.parent().unwrap())?;
    fs::create_dir(&out)?;
    fs::write(&src, b"%PDF new")?;
    fs::write(out.join("report.pdf"), b"%PDF old")?;

    let fs_ = FileSystem::new(Locations::rooted_at(td.path()))
        .with_policy(NamingPolicy::automatic().with_max_renaming_attempts(0))
        .with_transfer_options(TransferOptions {
            on_exhausted: OnExhausted::Overwrite,
            ..TransferOptions::default()
        });

    let dest = fs_.move_item(&src, &out)?;
    assert_eq!(dest, out.join("report.pdf"));
    assert_eq!(fs::read(&dest)?, b"%PDF new");
    assert!(!src.exists());
    assert_eq!(fs::read_dir(&out)?.count(), 1);
    Ok(())
}
