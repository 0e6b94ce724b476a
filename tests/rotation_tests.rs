mod common;

use common::{date, test_db};
use review_desk::models::{DailyPicks, LifecycleTag, QuestionFilter};

#[tokio::test]
async fn rotate_by_date_promotes_pool_questions() {
    let db = test_db().await;
    let theme = db.seed_theme("Economy");
    let today = db.seed_article(Some(theme), "Budget", date("2026-08-25"));
    let yesterday = db.seed_article(Some(theme), "Markets", date("2026-08-24"));
    let q1 = db.seed_question(Some(today), Some(LifecycleTag::POOL));
    let q2 = db.seed_question(Some(today), Some(LifecycleTag::POOL));
    let stale = db.seed_question(Some(yesterday), Some(LifecycleTag::POOL));

    let promoted = db
        .repo
        .rotate_daily_selection(DailyPicks::ByDate(date("2026-08-25")))
        .await
        .unwrap();

    assert_eq!(promoted, 2);
    assert_eq!(db.question_purpose(q1).as_deref(), Some(LifecycleTag::SELECTED));
    assert_eq!(db.question_purpose(q2).as_deref(), Some(LifecycleTag::SELECTED));
    assert_eq!(db.question_purpose(stale).as_deref(), Some(LifecycleTag::POOL));
}

#[tokio::test]
async fn rotation_supersedes_previous_selection() {
    let db = test_db().await;
    let a1 = db.seed_article(None, "Day one", date("2026-08-24"));
    let a2 = db.seed_article(None, "Day two", date("2026-08-25"));
    let old = db.seed_question(Some(a1), Some(LifecycleTag::POOL));
    let new = db.seed_question(Some(a2), Some(LifecycleTag::POOL));

    db.repo
        .rotate_daily_selection(DailyPicks::ByDate(date("2026-08-24")))
        .await
        .unwrap();
    assert_eq!(db.question_purpose(old).as_deref(), Some(LifecycleTag::SELECTED));

    db.repo
        .rotate_daily_selection(DailyPicks::ByDate(date("2026-08-25")))
        .await
        .unwrap();

    // Day one's pick cycled back to the pool.
    assert_eq!(db.question_purpose(old).as_deref(), Some(LifecycleTag::POOL));
    assert_eq!(db.question_purpose(new).as_deref(), Some(LifecycleTag::SELECTED));
}

#[tokio::test]
async fn rotation_is_idempotent_for_the_same_date() {
    let db = test_db().await;
    let article = db.seed_article(None, "Budget", date("2026-08-25"));
    db.seed_question(Some(article), Some(LifecycleTag::POOL));
    db.seed_question(Some(article), Some(LifecycleTag::POOL));

    let first = db
        .repo
        .rotate_daily_selection(DailyPicks::ByDate(date("2026-08-25")))
        .await
        .unwrap();
    let selected_after_first = db.selected_question_ids();

    let second = db
        .repo
        .rotate_daily_selection(DailyPicks::ByDate(date("2026-08-25")))
        .await
        .unwrap();
    let selected_after_second = db.selected_question_ids();

    assert_eq!(first, 2);
    assert_eq!(second, 2);
    assert_eq!(selected_after_first, selected_after_second);
}

#[tokio::test]
async fn reset_runs_even_when_nothing_new_qualifies() {
    let db = test_db().await;
    let article = db.seed_article(None, "Old news", date("2026-08-20"));
    let selected = db.seed_question(Some(article), Some(LifecycleTag::SELECTED));

    // No articles on this date, so nothing is promoted; the previous
    // selection is still cleared. Full reset regardless of outcome.
    let promoted = db
        .repo
        .rotate_daily_selection(DailyPicks::ByDate(date("2026-08-25")))
        .await
        .unwrap();

    assert_eq!(promoted, 0);
    assert_eq!(
        db.question_purpose(selected).as_deref(),
        Some(LifecycleTag::POOL)
    );
    assert!(db.selected_question_ids().is_empty());
}

#[tokio::test]
async fn foreign_and_unset_tags_are_never_touched() {
    let db = test_db().await;
    let article = db.seed_article(None, "Budget", date("2026-08-25"));
    let challenge = db.seed_question(Some(article), Some("challenge-questions"));
    let untagged = db.seed_question(Some(article), None);
    db.seed_question(Some(article), Some(LifecycleTag::POOL));

    for _ in 0..3 {
        db.repo
            .rotate_daily_selection(DailyPicks::ByDate(date("2026-08-25")))
            .await
            .unwrap();
    }

    assert_eq!(
        db.question_purpose(challenge).as_deref(),
        Some("challenge-questions")
    );
    assert_eq!(db.question_purpose(untagged), None);
}

#[tokio::test]
async fn rotate_by_ids_only_promotes_pool_rows() {
    let db = test_db().await;
    let article = db.seed_article(None, "Budget", date("2026-08-25"));
    let pool = db.seed_question(Some(article), Some(LifecycleTag::POOL));
    let challenge = db.seed_question(Some(article), Some("challenge-questions"));

    let promoted = db
        .repo
        .rotate_daily_selection(DailyPicks::ByIds(vec![pool, challenge]))
        .await
        .unwrap();

    assert_eq!(promoted, 1);
    assert_eq!(db.question_purpose(pool).as_deref(), Some(LifecycleTag::SELECTED));
    assert_eq!(
        db.question_purpose(challenge).as_deref(),
        Some("challenge-questions")
    );
}

#[tokio::test]
async fn service_prefilters_ineligible_ids() {
    let db = test_db().await;
    let article = db.seed_article(None, "Budget", date("2026-08-25"));
    let pool = db.seed_question(Some(article), Some(LifecycleTag::POOL));
    let challenge = db.seed_question(Some(article), Some("challenge-questions"));
    let untagged = db.seed_question(Some(article), None);

    let service = db.service().await;
    let promoted = service
        .rotate_daily_selection(DailyPicks::ByIds(vec![pool, challenge, untagged]))
        .await
        .unwrap();

    assert_eq!(promoted, 1);
    assert_eq!(db.question_purpose(pool).as_deref(), Some(LifecycleTag::SELECTED));
}

#[tokio::test]
async fn question_filter_finds_selected_set() {
    let db = test_db().await;
    let theme = db.seed_theme("Economy");
    let article = db.seed_article(Some(theme), "Budget", date("2026-08-25"));
    db.seed_question(Some(article), Some(LifecycleTag::POOL));
    db.seed_question(Some(article), Some(LifecycleTag::POOL));

    db.repo
        .rotate_daily_selection(DailyPicks::ByDate(date("2026-08-25")))
        .await
        .unwrap();

    let rows = db
        .repo
        .get_questions(QuestionFilter {
            purpose: Some(LifecycleTag::Selected),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|q| q.purpose == Some(LifecycleTag::Selected)));
    assert!(rows.iter().all(|q| q.theme_name.as_deref() == Some("Economy")));
}
