mod common;

use common::{FakeApi, auth, entrant};
use festival_frontend_rs::festival_types::{Entry, EntryId};
use festival_frontend_rs::{AdminApi, ApiError, DrawKind, EntryListView, FetchState, ViewError};

fn winner_ids(view: &EntryListView) -> Vec<String> {
    view.entries()
        .iter()
        .filter(|e| e.winner)
        .map(|e| e.entry_id.to_string())
        .collect()
}

fn assert_winners_first(view: &EntryListView) {
    let first_loser = view
        .entries()
        .iter()
        .position(|e| !e.winner)
        .unwrap_or(view.entries().len());
    assert!(view.entries()[first_loser..].iter().all(|e| !e.winner));
}

#[tokio::test]
async fn drawing_airpods_one_at_a_time() {
    let api = FakeApi::with_entries(3, (1..=5).map(entrant).collect());
    let auth = auth();
    let mut view = EntryListView::new("에어팟", "에어팟", 3);

    view.load(&api, &auth).await.unwrap();
    assert_eq!(view.drawn_count(), 0);
    let controls = view.draw_controls();
    assert!(controls.single.enabled);
    assert!(controls.full.enabled);
    assert!(!controls.single.complete);

    view.draw(&api, &auth, DrawKind::One).await.unwrap();
    assert_eq!(view.drawn_count(), 1);
    let controls = view.draw_controls();
    assert!(controls.single.enabled);
    assert!(!controls.full.enabled);

    view.draw(&api, &auth, DrawKind::One).await.unwrap();
    view.draw(&api, &auth, DrawKind::One).await.unwrap();
    assert_eq!(view.drawn_count(), 3);
    let controls = view.draw_controls();
    assert!(!controls.single.enabled);
    assert!(controls.single.complete && controls.full.complete);
    assert_eq!(controls.single.label(), "추첨 완료");
    assert_winners_first(&view);

    assert!(matches!(
        view.draw(&api, &auth, DrawKind::One).await,
        Err(ViewError::DrawDisabled(DrawKind::One))
    ));
    assert_eq!(
        api.calls(),
        vec!["list_entries A", "draw_one A", "draw_one A", "draw_one A"]
    );
}

#[tokio::test]
async fn full_draw_fills_every_slot() {
    let api = FakeApi::with_entries(3, (1..=5).map(entrant).collect());
    let auth = auth();
    let mut view = EntryListView::new("변신로봇", "변신로봇", 3);

    view.load(&api, &auth).await.unwrap();
    view.draw(&api, &auth, DrawKind::All).await.unwrap();
    assert_eq!(winner_ids(&view), vec!["1", "2", "3"]);
    assert!(view.draw_controls().full.complete);
    assert_eq!(api.calls()[1], "draw_all B");
}

#[tokio::test]
async fn failed_draw_changes_nothing() {
    let api = FakeApi::with_entries(3, (1..=5).map(entrant).collect());
    let auth = auth();
    let mut view = EntryListView::new("에어팟", "에어팟", 3);
    view.load(&api, &auth).await.unwrap();
    view.load_more();
    let before = view.entries().to_vec();

    api.fail_on("draw_one");
    let err = view.draw(&api, &auth, DrawKind::One).await.unwrap_err();
    assert!(matches!(err, ViewError::Api(_)));
    assert_eq!(view.entries(), &before[..]);
    assert_eq!(view.drawn_count(), 0);
}

#[tokio::test]
async fn failed_load_is_reported() {
    let api = FakeApi::with_entries(3, (1..=5).map(entrant).collect());
    api.fail_on("list_entries");
    let mut view = EntryListView::new("단검", "단검", 1);

    assert!(view.load(&api, &auth()).await.is_err());
    assert_eq!(view.list().fetch_state(), FetchState::Failed);
    assert!(view.entries().is_empty());
}

#[tokio::test]
async fn cancelled_winner_rejoins_the_entrants() {
    let api = FakeApi::with_entries(3, (1..=5).map(entrant).collect());
    let auth = auth();
    let mut view = EntryListView::new("에어팟", "에어팟", 3);
    view.load(&api, &auth).await.unwrap();
    view.draw(&api, &auth, DrawKind::One).await.unwrap();
    view.draw(&api, &auth, DrawKind::One).await.unwrap();

    view.cancel_winner(&api, &auth, &EntryId::from(1)).await.unwrap();
    assert_eq!(winner_ids(&view), vec!["2"]);
    assert_winners_first(&view);
    assert!(view.draw_controls().single.enabled);
    assert_eq!(api.calls().last().unwrap(), "cancel_winner 1");
}

#[tokio::test]
async fn refetch_that_lands_after_a_draw_is_dropped() {
    let api = FakeApi::with_entries(3, (1..=5).map(entrant).collect());
    let auth = auth();
    let mut view = EntryListView::new("에어팟", "에어팟", 3);
    view.load(&api, &auth).await.unwrap();

    // a refetch goes out, then a draw is issued and answered before it
    let refetch = view.begin_load();
    let old_snapshot = api.entries.borrow().clone();
    let draw = view.begin_draw(DrawKind::One).unwrap();
    let drawn = api_draw_one(&api).await;
    view.finish_draw(draw, drawn).unwrap();

    assert!(matches!(
        view.finish_load(refetch, Ok(old_snapshot)),
        Err(ViewError::Stale)
    ));
    assert_eq!(view.drawn_count(), 1);
    assert_eq!(view.list().fetch_state(), FetchState::Loaded);
}

async fn api_draw_one(api: &FakeApi) -> Result<Vec<Entry>, ApiError> {
    api.draw_one(&auth(), "A").await
}

#[tokio::test]
async fn empty_prize_shows_message() {
    let api = FakeApi::with_entries(3, vec![]);
    let mut view = EntryListView::new("자전거", "자전거", 3);
    view.load(&api, &auth()).await.unwrap();
    assert_eq!(view.empty_message(), Some("응모자가 존재하지 않습니다."));
    // unmapped prizes send an empty code
    assert_eq!(api.calls(), vec!["list_entries "]);
}
