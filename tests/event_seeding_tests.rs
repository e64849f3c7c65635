//! Seeding of categorías and eventos against an in-memory database.

use anyhow::Result;
use catalog_seeder::error::SeedError;
use catalog_seeder::models::{Categoria, Evento, categoria, evento};
use catalog_seeder::seeds::events::{self, DEFAULT_EVENT_COUNT};
use catalog_seeder::seeds::SeedOptions;
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{insert_user, setup_test_db};

#[tokio::test]
async fn seeding_without_users_is_a_configuration_error() -> Result<()> {
    let db = setup_test_db().await?;

    let err = events::seeder(&db, DEFAULT_EVENT_COUNT, None)
        .run(SeedOptions::default())
        .await
        .expect_err("no principal available");

    assert!(err.is_configuration());
    assert!(err.to_string().contains("no users found"));
    assert_eq!(Categoria::find().count(&db).await?, 0);
    assert_eq!(Evento::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn unknown_owner_is_a_configuration_error() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "admin", None, true, true).await?;

    let err = events::seeder(&db, DEFAULT_EVENT_COUNT, Some("ghost".to_string()))
        .run(SeedOptions::default())
        .await
        .expect_err("owner does not exist");

    assert!(matches!(err, SeedError::Configuration(_)));
    assert!(err.to_string().contains("ghost"));
    assert_eq!(Categoria::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn superuser_is_preferred_as_owner() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "alice", None, false, false).await?;
    insert_user(&db, "bob", Some("bob@example.com"), false, true).await?;
    let root = insert_user(&db, "zed", Some("zed@example.com"), true, false).await?;

    let mut seeder = events::seeder(&db, DEFAULT_EVENT_COUNT, None);
    let report = seeder.run(SeedOptions::default()).await?;

    let authors = Evento::find()
        .filter(evento::Column::AuthorId.ne(root.id))
        .count(&db)
        .await?;
    assert_eq!(authors, 0);

    let categoria = Categoria::find()
        .filter(categoria::Column::Name.eq("Música"))
        .one(&db)
        .await?
        .expect("Música stored");
    assert_eq!(categoria.created_by, Some(root.id));
    assert_eq!(categoria.updated_by, Some(root.id));

    let summary = report.seed.expect("seed summary");
    assert!(summary.to_string().contains("Usuario administrador: zed@example.com"));
    Ok(())
}

#[tokio::test]
async fn staff_user_is_used_when_no_superuser_exists() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "alice", None, false, false).await?;
    let staff = insert_user(&db, "bob", None, false, true).await?;

    let mut seeder = events::seeder(&db, 1, None);
    seeder.run(SeedOptions::default()).await?;

    let evento = Evento::find().one(&db).await?.expect("one event stored");
    assert_eq!(evento.author_id, staff.id);
    Ok(())
}

#[tokio::test]
async fn explicit_owner_wins() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "admin", None, true, true).await?;
    let editor = insert_user(&db, "editor", None, false, false).await?;

    events::seeder(&db, DEFAULT_EVENT_COUNT, Some("editor".to_string()))
        .run(SeedOptions::default())
        .await?;

    let foreign = Evento::find()
        .filter(evento::Column::AuthorId.ne(editor.id))
        .count(&db)
        .await?;
    assert_eq!(foreign, 0);
    Ok(())
}

#[tokio::test]
async fn full_catalog_matches_fixture_totals() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "admin", None, true, true).await?;
    let started = Utc::now();

    let report = events::seeder(&db, DEFAULT_EVENT_COUNT, None)
        .run(SeedOptions::default())
        .await?;
    let summary = report.seed.expect("seed summary");

    assert_eq!(summary.parents_created(), 8);
    assert_eq!(summary.children_created(), 15);
    assert_eq!(Categoria::find().count(&db).await?, 8);
    assert_eq!(Evento::find().count(&db).await?, 15);
    assert_eq!(
        Evento::find()
            .filter(evento::Column::Published.eq(true))
            .count(&db)
            .await?,
        12
    );
    assert_eq!(
        Evento::find()
            .filter(evento::Column::IsPinned.eq(true))
            .count(&db)
            .await?,
        4
    );

    for evento in Evento::find().all(&db).await? {
        assert!(evento.starts_at.with_timezone(&Utc) > started);
    }

    let text = summary.to_string();
    assert!(text.contains("Total eventos: 15"));
    assert!(text.contains("Eventos publicados: 12"));
    assert!(text.contains("Eventos fijados: 4"));
    assert!(text.contains("Usuario administrador: admin"));
    Ok(())
}

#[tokio::test]
async fn count_limits_events_but_not_categories() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "admin", None, true, true).await?;

    let report = events::seeder(&db, 5, None)
        .run(SeedOptions::default())
        .await?;
    let summary = report.seed.expect("seed summary");

    assert_eq!(summary.parents_processed(), 8);
    assert_eq!(summary.children_processed(), 5);
    assert_eq!(Categoria::find().count(&db).await?, 8);
    assert_eq!(Evento::find().count(&db).await?, 5);

    let pinned_ai = Evento::find()
        .filter(evento::Column::Title.eq("Conferencia de Inteligencia Artificial 2024"))
        .one(&db)
        .await?;
    assert!(pinned_ai.is_some());
    let late = Evento::find()
        .filter(evento::Column::Title.eq("Feria del Libro y la Literatura"))
        .one(&db)
        .await?;
    assert!(late.is_none());
    Ok(())
}

#[tokio::test]
async fn rerun_creates_nothing_and_keeps_counts() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "admin", None, true, true).await?;
    events::seeder(&db, DEFAULT_EVENT_COUNT, None)
        .run(SeedOptions::default())
        .await?;

    let report = events::seeder(&db, DEFAULT_EVENT_COUNT, None)
        .run(SeedOptions::default())
        .await?;
    let summary = report.seed.expect("seed summary");

    assert_eq!(summary.parents_created(), 0);
    assert_eq!(summary.children_created(), 0);
    assert_eq!(Evento::find().count(&db).await?, 15);
    Ok(())
}

#[tokio::test]
async fn clear_without_owner_leaves_data_untouched() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "admin", None, true, true).await?;
    events::seeder(&db, DEFAULT_EVENT_COUNT, None)
        .run(SeedOptions::default())
        .await?;

    let options = SeedOptions {
        clear_first: true,
        verify_only: false,
    };
    let err = events::seeder(&db, DEFAULT_EVENT_COUNT, Some("nobody".to_string()))
        .run(options)
        .await
        .expect_err("owner does not exist");

    assert!(err.is_configuration());
    assert_eq!(Categoria::find().count(&db).await?, 8);
    assert_eq!(Evento::find().count(&db).await?, 15);
    Ok(())
}

#[tokio::test]
async fn verification_notes_missing_active_flag() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "admin", None, true, true).await?;
    events::seeder(&db, DEFAULT_EVENT_COUNT, None)
        .run(SeedOptions::default())
        .await?;

    let options = SeedOptions {
        clear_first: false,
        verify_only: true,
    };
    let report = events::seeder(&db, DEFAULT_EVENT_COUNT, None)
        .run(options)
        .await?;

    assert!(report.seed.is_none());
    assert_eq!(report.verification.counts.active_children, None);
    assert_eq!(report.verification.samples.len(), 3);

    let text = report.to_string();
    assert!(text.contains("Total categorías: 8 (8 activas)"));
    assert!(text.contains("Total eventos: 15 (sin indicador de activo)"));
    Ok(())
}

#[tokio::test]
async fn verify_only_does_not_require_an_owner() -> Result<()> {
    let db = setup_test_db().await?;

    let options = SeedOptions {
        clear_first: false,
        verify_only: true,
    };
    let report = events::seeder(&db, DEFAULT_EVENT_COUNT, None)
        .run(options)
        .await?;

    assert!(report.verification.is_warning());
    Ok(())
}

#[tokio::test]
async fn every_event_points_at_a_category_created_before_it() -> Result<()> {
    let db = setup_test_db().await?;
    insert_user(&db, "admin", None, true, true).await?;
    events::seeder(&db, DEFAULT_EVENT_COUNT, None)
        .run(SeedOptions::default())
        .await?;

    let pairs = Evento::find().find_also_related(Categoria).all(&db).await?;
    assert_eq!(pairs.len(), 15);
    for (evento, categoria) in pairs {
        let categoria =
            categoria.unwrap_or_else(|| panic!("event '{}' has no category", evento.title));
        assert!(
            categoria.created_at <= evento.created_at,
            "category '{}' created after event '{}'",
            categoria.name,
            evento.title
        );
    }
    Ok(())
}
