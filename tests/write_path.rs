// End-to-end write-path scenarios through the interceptor against the
// in-memory store.

use std::sync::Arc;

use chrono::Duration;
use writeguard::entities::{
    Comment, Course, Document, Enrollment, EntityKind, Follow, News, Rating, ResourceKind,
};
use writeguard::storage::{EntityStore, Filter, MemoryStore};
use writeguard::{DomainError, WriteContext, WriteInterceptor};

fn setup() -> (WriteInterceptor, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let interceptor = WriteInterceptor::with_defaults(store.clone());
    (interceptor, store)
}

fn rating(user_id: i64, value: u8) -> Rating {
    Rating {
        user_id,
        rating: value,
        review: None,
        created_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn comment_thread_depth_is_enforced_end_to_end() {
    let (interceptor, _store) = setup();

    // root -> r1 -> r2 all land; r3 would be depth 3, still legal
    let root = Comment::root(1, ResourceKind::Article, 50, 9, "root");
    interceptor
        .apply(Document::Comment(root.clone()), WriteContext::create())
        .await
        .unwrap();

    let r1 = Comment::reply_to(&root, 2, 9, "r1");
    interceptor
        .apply(Document::Comment(r1.clone()), WriteContext::create())
        .await
        .unwrap();

    let r2 = Comment::reply_to(&r1, 3, 9, "r2");
    interceptor
        .apply(Document::Comment(r2.clone()), WriteContext::create())
        .await
        .unwrap();

    let r3 = Comment::reply_to(&r2, 4, 9, "r3");
    interceptor
        .apply(Document::Comment(r3.clone()), WriteContext::create())
        .await
        .unwrap();

    // depth 4 is past the limit and must be rejected, not truncated
    let too_deep = Comment::reply_to(&r3, 5, 9, "r4");
    let err = interceptor
        .apply(Document::Comment(too_deep), WriteContext::create())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DepthExceeded));
}

#[tokio::test]
async fn rejected_comment_never_reaches_the_store() {
    let (interceptor, store) = setup();

    let mut orphan = Comment::root(1, ResourceKind::Article, 50, 9, "hi");
    orphan.parent_id = Some(404);
    let err = interceptor
        .apply(Document::Comment(orphan), WriteContext::create())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ParentNotFound(404)));

    let stored = store.get(EntityKind::Comment, 1).await.unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn enrollment_scenario_duplicate_then_bad_completion() {
    let (interceptor, _store) = setup();

    interceptor
        .apply(
            Document::Enrollment(Enrollment::new(1, 7, 3)),
            WriteContext::create(),
        )
        .await
        .unwrap();

    // same (course, user) pair
    let err = interceptor
        .apply(
            Document::Enrollment(Enrollment::new(2, 7, 3)),
            WriteContext::create(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::DuplicateEnrollment {
            course_id: 7,
            user_id: 3
        }
    ));

    // different pair, but completed before enrolled
    let mut backwards = Enrollment::new(3, 7, 4);
    backwards.completed_at = Some(backwards.enrolled_at - Duration::days(1));
    let err = interceptor
        .apply(Document::Enrollment(backwards), WriteContext::create())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCompletionOrder));
}

#[tokio::test]
async fn at_most_one_enrollment_per_pair_survives_any_sequence() {
    let (interceptor, store) = setup();

    for id in 1..=5 {
        let _ = interceptor
            .apply(
                Document::Enrollment(Enrollment::new(id, 7, 3)),
                WriteContext::create(),
            )
            .await;
    }

    let stored = store
        .find_one(Filter::EnrollmentPair {
            course_id: 7,
            user_id: 3,
        })
        .await
        .unwrap()
        .expect("one enrollment must exist");
    assert_eq!(stored.id(), 1);
}

#[tokio::test]
async fn storage_index_backstops_the_enrollment_validator() {
    let (interceptor, store) = setup();

    // Simulate the race: a rival write lands after this candidate passed
    // validation would have; writing directly to the store stands in for
    // the rival committing first.
    store
        .upsert(Document::Enrollment(Enrollment::new(1, 7, 3)))
        .await
        .unwrap();

    // The validator's find_one sees the rival and rejects; the point is
    // the caller observes DuplicateEnrollment no matter which layer wins.
    let err = interceptor
        .apply(
            Document::Enrollment(Enrollment::new(2, 7, 3)),
            WriteContext::create(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateEnrollment { .. }));
}

#[tokio::test]
async fn enrollment_race_loser_gets_duplicate_error_from_the_index() {
    let (interceptor, store) = setup();

    store
        .upsert(Document::Enrollment(Enrollment::new(1, 7, 3)))
        .await
        .unwrap();

    // An update write skips the validator's duplicate fast path, so this
    // candidate reaches the store and loses to the unique index there -
    // the same spot a race survivor would lose. The caller must still
    // see DuplicateEnrollment, not a storage error.
    let err = interceptor
        .apply(
            Document::Enrollment(Enrollment::new(2, 7, 3)),
            WriteContext::update(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::DuplicateEnrollment {
            course_id: 7,
            user_id: 3
        }
    ));
}

#[tokio::test]
async fn self_follow_is_rejected() {
    let (interceptor, _store) = setup();
    let err = interceptor
        .apply(Document::Follow(Follow::new(1, 1, 1)), WriteContext::create())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::SelfFollow));
}

#[tokio::test]
async fn duplicate_follow_edge_is_rejected() {
    let (interceptor, _store) = setup();
    interceptor
        .apply(
            Document::Follow(Follow::new(1, 10, 20)),
            WriteContext::create(),
        )
        .await
        .unwrap();

    let err = interceptor
        .apply(
            Document::Follow(Follow::new(2, 10, 20)),
            WriteContext::create(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateFollow { .. }));
}

#[tokio::test]
async fn course_aggregates_track_the_ratings_collection() {
    let (interceptor, _store) = setup();

    let mut course = Course::new(1, "Rust Basics", "rust-basics", "intro course");
    course.ratings = vec![rating(1, 5), rating(2, 4)];
    // Caller-supplied aggregates are overwritten by the recompute.
    course.average_rating = 99.0;
    course.total_ratings = 99;

    let stored = interceptor
        .apply(Document::Course(course), WriteContext::create())
        .await
        .unwrap();
    let course = match stored {
        Document::Course(c) => c,
        other => panic!("expected a course, got {:?}", other),
    };
    assert_eq!(course.average_rating, 4.5);
    assert_eq!(course.total_ratings, 2);
}

#[tokio::test]
async fn emptied_ratings_collection_zeroes_the_aggregates() {
    let (interceptor, _store) = setup();

    let mut course = Course::new(1, "Rust Basics", "rust-basics", "intro course");
    course.ratings = vec![rating(1, 3)];
    let stored = interceptor
        .apply(Document::Course(course), WriteContext::create())
        .await
        .unwrap();

    let mut course = match stored {
        Document::Course(c) => c,
        other => panic!("expected a course, got {:?}", other),
    };
    course.ratings.clear();
    let stored = interceptor
        .apply(
            Document::Course(course),
            WriteContext::update().with_changed("ratings"),
        )
        .await
        .unwrap();
    let course = match stored {
        Document::Course(c) => c,
        other => panic!("expected a course, got {:?}", other),
    };
    assert_eq!(course.average_rating, 0.0);
    assert_eq!(course.total_ratings, 0);
}

#[tokio::test]
async fn out_of_range_rating_rejects_the_course_write() {
    let (interceptor, store) = setup();

    let mut course = Course::new(1, "Rust Basics", "rust-basics", "intro course");
    course.ratings = vec![rating(1, 6)];
    let err = interceptor
        .apply(Document::Course(course), WriteContext::create())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RatingOutOfRange(6)));

    let stored = store.get(EntityKind::Course, 1).await.unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn news_create_derives_slug_and_reading_time() {
    let (interceptor, _store) = setup();

    let content = vec!["word"; 450].join(" ");
    let article = News::new(1, "Hello, World!", content, 9);
    let stored = interceptor
        .apply(Document::News(article), WriteContext::create())
        .await
        .unwrap();
    let article = match stored {
        Document::News(n) => n,
        other => panic!("expected news, got {:?}", other),
    };
    assert_eq!(article.slug, "hello-world");
    assert_eq!(article.reading_time, 3);
}

#[tokio::test]
async fn news_update_recomputes_reading_time_but_keeps_slug() {
    let (interceptor, _store) = setup();

    let article = News::new(1, "Hello, World!", "short piece", 9);
    let stored = interceptor
        .apply(Document::News(article), WriteContext::create())
        .await
        .unwrap();
    let mut article = match stored {
        Document::News(n) => n,
        other => panic!("expected news, got {:?}", other),
    };

    article.title = "A Different Title".to_string();
    article.content = vec!["word"; 250].join(" ");
    let stored = interceptor
        .apply(
            Document::News(article),
            WriteContext::update()
                .with_changed("title")
                .with_changed("content"),
        )
        .await
        .unwrap();
    let article = match stored {
        Document::News(n) => n,
        other => panic!("expected news, got {:?}", other),
    };
    // slug was already set, so the new title does not rewrite it
    assert_eq!(article.slug, "hello-world");
    assert_eq!(article.reading_time, 2);
}

#[tokio::test]
async fn second_news_with_colliding_slug_is_rejected() {
    let (interceptor, _store) = setup();

    interceptor
        .apply(
            Document::News(News::new(1, "Hello, World!", "body", 9)),
            WriteContext::create(),
        )
        .await
        .unwrap();

    // A different title that slugifies to the same string
    let err = interceptor
        .apply(
            Document::News(News::new(2, "Hello! World?", "body", 9)),
            WriteContext::create(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateSlug(slug) if slug == "hello-world"));
}
