//! Integration tests for declaration and file ids

use std::collections::BTreeSet;

use protogo_foundation::{DeclId, FileId};

#[test]
fn decl_id_roundtrip() {
    assert_eq!(DeclId::new(17).index(), 17);
    assert_eq!(format!("{:?}", DeclId::new(3)), "DeclId(3)");
}

#[test]
fn decl_ids_order_by_index() {
    let ids: BTreeSet<_> = [5, 1, 3].into_iter().map(DeclId::new).collect();
    let order: Vec<_> = ids.into_iter().map(DeclId::index).collect();
    assert_eq!(order, vec![1, 3, 5]);
}

#[test]
fn file_id_default_is_first_file() {
    assert_eq!(FileId::default(), FileId::new(0));
    assert_eq!(format!("{:?}", FileId::new(2)), "FileId(2)");
}
