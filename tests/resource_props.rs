use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::sync::mpsc;
use std::time::Duration;

use versioned_fs::{
    format_data_size, size_of_contents_async, FileSystem, ListOptions, Locations, MimeType,
    ResourceExt, ResourceType, UnitFormat,
};

#[test]
fn content_size_sync_and_async_agree() -> Result<(), Box<dyn std::error::Error>> {
    let td = TempDir::new()?;
    td.child("a").create_dir_all()?;
    td.child("a/b").create_dir_all()?;
    td.child("a/one.bin").write_binary(&[0u8; 1500])?;
    td.child("a/b/two.bin").write_binary(&[0u8; 2500])?;
    td.child("three.txt").write_str("Fine")?;

    let sync_total = td.path().size_of_contents();
    assert_eq!(sync_total, 4004);

    let (tx, rx) = mpsc::channel();
    size_of_contents_async(td.path().to_path_buf(), move |total| {
        let _ = tx.send(total);
    });
    assert_eq!(rx.recv_timeout(Duration::from_secs(10))?, sync_total);
    assert_eq!(format_data_size(sync_total, 1, UnitFormat::Short), "4.0 KB");
    Ok(())
}

#[test]
fn properties_of_a_small_tree() -> Result<(), Box<dyn std::error::Error>> {
    let td = TempDir::new()?;
    let png = td.child("img.png");
    png.write_binary(&[0x89, b'P', b'N', b'G'])?;
    let text = td.child("readme");
    text.write_str("For your eyes")?;
    let hidden = td.child(".cache");
    hidden.create_dir_all()?;

    assert_eq!(png.path().resource_type(), ResourceType::Regular);
    assert_eq!(png.path().mime_type(), Some(MimeType::Png));
    assert_eq!(text.path().mime_type(), Some(MimeType::PlainText));
    assert_eq!(hidden.path().resource_type(), ResourceType::Directory);
    assert!(hidden.path().is_inferred_hidden());
    assert!(hidden.path().is_hidden(true));
    assert!(!png.path().is_hidden(true));

    assert_eq!(td.path().file_count(ListOptions::default()), 3);
    let visible = td.path().file_count(ListOptions { skip_hidden: true, skip_symlinks: true });
    if cfg!(unix) {
        assert_eq!(visible, 2);
    }
    assert!(png.path().content_access_date().is_some());
    Ok(())
}

#[test]
fn locality_follows_documents_directory() -> Result<(), Box<dyn std::error::Error>> {
    let td = TempDir::new()?;
    let docs = td.child("Documents");
    docs.child("Inbox").create_dir_all()?;
    let fs_ = FileSystem::new(Locations::rooted_at(td.path()));
    assert_eq!(fs_.inbox_directory(), Some(docs.path().join("Inbox")));
    assert!(fs_.is_local(&docs.path().join("Inbox")));
    assert!(!fs_.is_local(td.path()));
    Ok(())
}
