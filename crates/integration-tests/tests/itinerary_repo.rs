//! Itinerary CRUD and workflow behavior against the in-memory stores.

use bh_core::models::{ItineraryPatch, ItineraryStatus};
use integration_tests::itinerary_repo;

#[tokio::test]
async fn merge_patch_keeps_untouched_fields_and_bumps_updated_at() {
    let repo = itinerary_repo();
    let draft = repo.create_draft("user-1").await.unwrap();

    let first = repo
        .update(
            draft.id,
            ItineraryPatch {
                title: Some("Weekend tra i calanchi".to_string()),
                duration: Some("1d".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("known id");

    let second = repo
        .update(
            draft.id,
            ItineraryPatch { duration: Some("2d".to_string()), ..Default::default() },
        )
        .await
        .unwrap()
        .expect("known id");

    assert_eq!(second.title, "Weekend tra i calanchi");
    assert_eq!(second.duration, "2d");
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.created_at, draft.created_at);
}

#[tokio::test]
async fn main_borgo_slug_is_normalized_on_write() {
    let repo = itinerary_repo();
    let draft = repo.create_draft("user-1").await.unwrap();

    let updated = repo
        .update(
            draft.id,
            ItineraryPatch {
                main_borgo_slug: Some(" Viggiano ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("known id");

    assert_eq!(updated.main_borgo_slug, "viggiano");
    // Stored form, not just the returned copy.
    assert_eq!(repo.get(draft.id).await.unwrap().main_borgo_slug, "viggiano");
}

#[tokio::test]
async fn workflow_helpers_move_status_forward() {
    let repo = itinerary_repo();
    let draft = repo.create_draft("user-1").await.unwrap();
    assert_eq!(draft.status, ItineraryStatus::Draft);

    let in_review = repo.submit_for_review(draft.id).await.unwrap().unwrap();
    assert_eq!(in_review.status, ItineraryStatus::InReview);

    let published = repo.publish(draft.id).await.unwrap().unwrap();
    assert_eq!(published.status, ItineraryStatus::Published);
}

#[tokio::test]
async fn status_can_be_overwritten_directly_through_a_patch() {
    // No transition rules are enforced: a draft may jump straight to
    // published via the generic patch.
    let repo = itinerary_repo();
    let draft = repo.create_draft("user-1").await.unwrap();

    let updated = repo
        .update(
            draft.id,
            ItineraryPatch { status: Some(ItineraryStatus::Published), ..Default::default() },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, ItineraryStatus::Published);
}

#[tokio::test]
async fn get_and_update_miss_with_none() {
    let repo = itinerary_repo();
    let bogus = uuid::Uuid::now_v7();
    assert!(repo.get(bogus).await.is_none());
    assert!(repo.update(bogus, ItineraryPatch::default()).await.unwrap().is_none());
}
