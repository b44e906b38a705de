// Walkthrough of the guarded write path: one accepted and one rejected
// write per governed entity kind, against the in-memory store.
//
// Run with: cargo run --example write_path
// Set RUST_LOG=writeguard=debug to watch the hooks fire.

use std::sync::Arc;

use writeguard::entities::{Comment, Course, Document, Enrollment, Follow, News, ResourceKind};
use writeguard::storage::MemoryStore;
use writeguard::{DomainError, WriteContext, WriteInterceptor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "writeguard=info".into()),
        )
        .init();

    let store = Arc::new(MemoryStore::new());
    let guard = WriteInterceptor::with_defaults(store);

    // --- Comments: a short thread, then one reply too deep ---
    let root = Comment::root(1, ResourceKind::Article, 50, 9, "first!");
    guard
        .apply(Document::Comment(root.clone()), WriteContext::create())
        .await?;
    let mut last = root;
    for id in 2..=4 {
        let reply = Comment::reply_to(&last, id, 9, "replying");
        guard
            .apply(Document::Comment(reply.clone()), WriteContext::create())
            .await?;
        last = reply;
    }
    let too_deep = Comment::reply_to(&last, 5, 9, "one level too far");
    match guard
        .apply(Document::Comment(too_deep), WriteContext::create())
        .await
    {
        Err(DomainError::DepthExceeded) => println!("comment: deep reply rejected as expected"),
        other => println!("comment: unexpected outcome {:?}", other.map(|d| d.id())),
    }

    // --- Enrollment: first one lands, the duplicate does not ---
    guard
        .apply(
            Document::Enrollment(Enrollment::new(1, 7, 3)),
            WriteContext::create(),
        )
        .await?;
    if let Err(err) = guard
        .apply(
            Document::Enrollment(Enrollment::new(2, 7, 3)),
            WriteContext::create(),
        )
        .await
    {
        println!("enrollment: {}", err);
    }

    // --- Follow: self-follow is refused ---
    guard
        .apply(Document::Follow(Follow::new(1, 3, 4)), WriteContext::create())
        .await?;
    if let Err(err) = guard
        .apply(Document::Follow(Follow::new(2, 3, 3)), WriteContext::create())
        .await
    {
        println!("follow: {}", err);
    }

    // --- Course: aggregates come from the ratings collection ---
    let mut course = Course::new(7, "Rust for Web", "rust-for-web", "hands-on course");
    course.ratings = vec![
        writeguard::entities::Rating {
            user_id: 3,
            rating: 5,
            review: Some("great".into()),
            created_at: chrono::Utc::now(),
        },
        writeguard::entities::Rating {
            user_id: 4,
            rating: 4,
            review: None,
            created_at: chrono::Utc::now(),
        },
    ];
    let stored = guard
        .apply(Document::Course(course), WriteContext::create())
        .await?;
    if let Document::Course(course) = stored {
        println!(
            "course: average {} over {} ratings",
            course.average_rating, course.total_ratings
        );
    }

    // --- News: slug and reading time are derived on the way in ---
    let article = News::new(1, "Hello, World!", vec!["word"; 450].join(" "), 9);
    let stored = guard
        .apply(Document::News(article), WriteContext::create())
        .await?;
    if let Document::News(article) = stored {
        println!(
            "news: slug '{}', {} minute read",
            article.slug, article.reading_time
        );
    }

    Ok(())
}
