//! Folder tree operations.

mod common;

use ideabox_core::error::ErrorKind;
use ideabox_service::{NewFolder, UpdateFolder};

use common::TestContext;

#[tokio::test]
async fn test_list_is_scoped_to_path() {
    let ctx = TestContext::new().await;
    let c = ctx.container("Work").await;
    let b = ctx.folder(c.id, None, "b").await;
    let a = ctx.folder(c.id, None, "a").await;
    let nested = ctx.folder(c.id, Some(a.id), "nested").await;

    let roots: Vec<_> = ctx
        .folders
        .list(c.id, "")
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(roots, vec![a.id, b.id]);

    let inside = ctx.folders.list(c.id, &a.id.to_string()).await.unwrap();
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].id, nested.id);

    let err = ctx.folders.list(c.id, &nested.id.to_string()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidPath);
}

#[tokio::test]
async fn test_create_validates_name_and_parent() {
    let ctx = TestContext::new().await;
    let c1 = ctx.container("One").await;
    let c2 = ctx.container("Two").await;
    let foreign = ctx.folder(c2.id, None, "foreign").await;

    let input = NewFolder {
        container_id: c1.id,
        parent_id: None,
        name: "   ".into(),
        icon: "folder".into(),
        color: "#000".into(),
    };
    let err = ctx.folders.create(input.clone()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = ctx
        .folders
        .create(NewFolder {
            name: "child".into(),
            parent_id: Some(foreign.id),
            ..input
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_update_trims_name() {
    let ctx = TestContext::new().await;
    let c = ctx.container("Work").await;
    let f = ctx.folder(c.id, None, "old").await;

    let updated = ctx
        .folders
        .update(
            f.id,
            UpdateFolder {
                name: "  new  ".into(),
                icon: "star".into(),
                color: "#fff".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "new");
    assert_eq!(updated.icon, "star");
}

#[tokio::test]
async fn test_move_rejects_self_and_descendants() {
    let ctx = TestContext::new().await;
    let c = ctx.container("Work").await;
    let a = ctx.folder(c.id, None, "a").await;
    let b = ctx.folder(c.id, Some(a.id), "b").await;
    let d = ctx.folder(c.id, Some(b.id), "d").await;
    let other = ctx.folder(c.id, None, "other").await;

    let err = ctx.folders.move_to(a.id, a.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = ctx.folders.move_to(a.id, d.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let moved = ctx.folders.move_to(b.id, other.id).await.unwrap();
    assert_eq!(moved.parent_id, Some(other.id));
    assert!(
        ctx.resolver
            .check_valid(c.id, &format!("{}/{}/{}", other.id, b.id, d.id))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_move_across_containers_is_rejected() {
    let ctx = TestContext::new().await;
    let c1 = ctx.container("One").await;
    let c2 = ctx.container("Two").await;
    let a = ctx.folder(c1.id, None, "a").await;
    let foreign = ctx.folder(c2.id, None, "foreign").await;

    let err = ctx.folders.move_to(a.id, foreign.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_remove_from_parent_moves_up_one_level() {
    let ctx = TestContext::new().await;
    let c = ctx.container("Work").await;
    let a = ctx.folder(c.id, None, "a").await;
    let b = ctx.folder(c.id, Some(a.id), "b").await;
    let d = ctx.folder(c.id, Some(b.id), "d").await;

    let up = ctx.folders.remove_from_parent(d.id).await.unwrap();
    assert_eq!(up.parent_id, Some(a.id));
    let root = ctx.folders.remove_from_parent(d.id).await.unwrap();
    assert_eq!(root.parent_id, None);

    let err = ctx.folders.remove_from_parent(d.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_delete_cascades_to_subtree_and_images() {
    let ctx = TestContext::new().await;
    let c = ctx.container("Work").await;
    let a = ctx.folder(c.id, None, "a").await;
    let b = ctx.folder(c.id, Some(a.id), "b").await;
    let keep = ctx.text(c.id, None, "survivor", &[]).await;
    let text = ctx.text(c.id, Some(a.id), "gone", &[]).await;
    let image = ctx.image(c.id, Some(b.id), &[]).await;
    let key = image.payload.image_path().unwrap().to_string();
    assert!(ctx.storage.exists(&key).await.unwrap());

    ctx.folders.delete(a.id).await.unwrap();

    assert_eq!(ctx.folders.get(b.id).await.unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(ctx.ideas.get(text.id).await.unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(ctx.ideas.get(image.id).await.unwrap_err().kind, ErrorKind::NotFound);
    assert!(!ctx.storage.exists(&key).await.unwrap());
    assert_eq!(ctx.ideas.get(keep.id).await.unwrap().id, keep.id);

    let err = ctx.folders.delete(a.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
