//! Background command dispatch over the update channel.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod common;

use std::sync::Arc;
use tokio::sync::mpsc;

use common::{gallery_item, MockApi};
use shopfront::api::types::GalleryItemId;
use shopfront::api::ShopApi;
use shopfront::tasks::{execute_all, AppUpdate, Command, Dispatcher};

#[tokio::test]
async fn dispatched_commands_report_back_over_channel() {
    let api = Arc::new(MockApi {
        gallery: Some(vec![gallery_item("1", "Fade")]),
        ..MockApi::default()
    });
    let (tx, mut rx) = mpsc::channel(8);
    let dispatcher = Dispatcher::new(Arc::clone(&api) as Arc<dyn ShopApi>, tx);

    dispatcher.dispatch(vec![
        Command::LoadGallery,
        Command::LoadAppointments { auth: None },
    ]);

    let mut gallery = None;
    let mut appointments = None;
    for _ in 0..2 {
        match rx.recv().await.expect("update") {
            AppUpdate::GalleryLoaded(result) => gallery = Some(result),
            AppUpdate::AppointmentsLoaded(result) => appointments = Some(result),
            other => panic!("unexpected update {other:?}"),
        }
    }

    assert_eq!(gallery.unwrap().unwrap().len(), 1);
    assert!(appointments.unwrap().is_err());
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn execute_all_keeps_command_order() {
    let api = MockApi {
        delete_ok: true,
        ..MockApi::default()
    };

    let updates = execute_all(
        &api,
        vec![
            Command::DeleteGalleryItem {
                id: GalleryItemId::new("7"),
                auth: Some("tok".to_string()),
            },
            Command::LoadGallery,
        ],
    )
    .await;

    assert!(matches!(updates[0], AppUpdate::GalleryDeleted(Ok(()))));
    assert!(matches!(updates[1], AppUpdate::GalleryLoaded(Err(_))));
}
