mod common;

use common::{detail_provider, element, within, FakeApi, SpyApi};
use photoloop::data_provider::{author_key, number_of_comments_key};
use photoloop::persistence::{MemoryStore, Persister};
use photoloop::ui::photo_detail::{PhotoDetailIntent, PhotoDetailStatus, PhotoDetailViewModel};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

fn settled(status: &PhotoDetailStatus) -> bool {
    matches!(
        status,
        PhotoDetailStatus::Persisted(_) | PhotoDetailStatus::NotLoaded
    )
}

#[tokio::test]
async fn stays_idle_until_it_appears() {
    let store = Arc::new(MemoryStore::new());
    let vm = PhotoDetailViewModel::new(
        element(4, "idle", false, 40),
        detail_provider(Arc::new(SpyApi), &store),
    );

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(vm.state().status, PhotoDetailStatus::Idle);
}

#[tokio::test]
async fn appear_loads_author_and_comments_then_persists() {
    let api = Arc::new(FakeApi::new().with_author(40, "Leanne").with_comments(4, 5));
    let store = Arc::new(MemoryStore::new());
    let vm = PhotoDetailViewModel::new(
        element(4, "accusamus", true, 40),
        detail_provider(api, &store),
    );

    vm.send(PhotoDetailIntent::OnAppear);
    let state = within(vm.wait_for(|s| settled(&s.status))).await.unwrap();

    let detail = state.detail().unwrap();
    assert!(matches!(state.status, PhotoDetailStatus::Persisted(_)));
    assert_eq!(detail.id, 4);
    assert_eq!(detail.title, "accusamus");
    assert_eq!(detail.author, "Leanne");
    assert_eq!(detail.number_of_comments, 5);
    assert!(detail.is_favourite);
    assert_eq!(detail.photo_url, "http://img.test/600/4");

    let persister = Persister::new(store.clone());
    assert_eq!(
        persister.fetch::<String>(&author_key(4)).await.unwrap(),
        "Leanne"
    );
    assert_eq!(
        persister
            .fetch::<usize>(&number_of_comments_key(4))
            .await
            .unwrap(),
        5
    );
}

#[tokio::test]
async fn fully_cached_detail_skips_the_network() {
    let store = Arc::new(MemoryStore::new());
    let persister = Persister::new(store.clone());
    persister.persist("Ervin", &author_key(8)).await.unwrap();
    persister
        .persist(&12usize, &number_of_comments_key(8))
        .await
        .unwrap();

    let vm = PhotoDetailViewModel::new(
        element(8, "cached", false, 80),
        detail_provider(Arc::new(SpyApi), &store),
    );
    vm.send(PhotoDetailIntent::OnAppear);

    let state = within(vm.wait_for(|s| settled(&s.status))).await.unwrap();
    let detail = state.detail().unwrap();
    assert_eq!(detail.author, "Ervin");
    assert_eq!(detail.number_of_comments, 12);
}

#[tokio::test]
async fn partially_cached_detail_refetches_both() {
    let store = Arc::new(MemoryStore::new());
    Persister::new(store.clone())
        .persist("Stale", &author_key(8))
        .await
        .unwrap();
    let api = Arc::new(FakeApi::new().with_author(80, "Fresh").with_comments(8, 2));

    let vm = PhotoDetailViewModel::new(
        element(8, "partial", false, 80),
        detail_provider(api.clone(), &store),
    );
    vm.send(PhotoDetailIntent::OnAppear);

    let state = within(vm.wait_for(|s| settled(&s.status))).await.unwrap();
    let detail = state.detail().unwrap();
    assert_eq!(detail.author, "Fresh");
    assert_eq!(detail.number_of_comments, 2);
    assert_eq!(api.detail_calls.load(Ordering::SeqCst), 2);

    // The stale author entry is never overwritten.
    let author: String = Persister::new(store.clone())
        .fetch(&author_key(8))
        .await
        .unwrap();
    assert_eq!(author, "Stale");
}

#[tokio::test]
async fn one_failing_fetch_fails_the_detail_and_retry_recovers() {
    let api = Arc::new(FakeApi::new().with_author(10, "Clementine"));
    let store = Arc::new(MemoryStore::new());
    let vm = PhotoDetailViewModel::new(
        element(1, "no comments yet", false, 10),
        detail_provider(api.clone(), &store),
    );

    vm.send(PhotoDetailIntent::OnAppear);
    let state = within(vm.wait_for(|s| settled(&s.status))).await.unwrap();
    assert_eq!(state.status, PhotoDetailStatus::NotLoaded);
    assert!(state.detail().is_err());
    assert!(store.is_empty());

    api.comment_counts.lock().insert(1, 3);
    vm.send(PhotoDetailIntent::Retry);

    let state = within(vm.wait_for(|s| matches!(s.status, PhotoDetailStatus::Persisted(_))))
        .await
        .unwrap();
    assert_eq!(state.detail().unwrap().number_of_comments, 3);
}

#[tokio::test]
async fn favourite_toggles_once_loaded() {
    let api = Arc::new(FakeApi::new().with_author(20, "Patricia").with_comments(2, 1));
    let store = Arc::new(MemoryStore::new());
    let vm = PhotoDetailViewModel::new(
        element(2, "fav", false, 20),
        detail_provider(api, &store),
    );

    vm.send(PhotoDetailIntent::TappedFavouriteButton);
    vm.send(PhotoDetailIntent::OnAppear);
    within(vm.wait_for(|s| settled(&s.status))).await.unwrap();
    assert!(!vm.state().is_favourite());

    vm.send(PhotoDetailIntent::TappedFavouriteButton);
    let state = within(vm.wait_for(|s| s.is_favourite())).await.unwrap();
    assert!(matches!(state.status, PhotoDetailStatus::Persisted(_)));
}
