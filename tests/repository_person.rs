mod common;

use people_api::application::services::PersonService;
use people_api::domain::entities::NewPerson;
use people_api::domain::repositories::PersonRepository;
use people_api::error::AppError;
use people_api::infrastructure::persistence::SqlitePersonRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

fn make_repo(pool: &SqlitePool) -> SqlitePersonRepository {
    SqlitePersonRepository::new(Arc::new(pool.clone()))
}

fn john() -> NewPerson {
    NewPerson::new("John", "Doe", "john.doe@example.com")
}

#[tokio::test]
async fn test_create_and_find() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);

    let id = repo.create(john()).await.unwrap();
    let person = repo.find_by_id(id).await.unwrap().unwrap();

    assert_eq!(person.id, id);
    assert_eq!(person.first_name, "John");
    assert_eq!(person.last_name, "Doe");
    assert_eq!(person.email, "john.doe@example.com");
}

#[tokio::test]
async fn test_find_missing_is_none() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);

    assert!(repo.find_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_duplicate_email_is_constraint_violation() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);

    let first = repo.create(john()).await.unwrap();
    let err = repo
        .create(NewPerson::new("Johnny", "D", "john.doe@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation { .. }));
    assert_eq!(repo.count().await.unwrap(), 1);

    let kept = repo.find_by_id(first).await.unwrap().unwrap();
    assert_eq!(kept.first_name, "John");
}

#[tokio::test]
async fn test_list_orders_by_id_and_pages() {
    let pool = common::setup_pool().await;
    common::seed_people(&pool, 5).await;
    let repo = make_repo(&pool);

    let first_page = repo.list(2, 0).await.unwrap();
    let ids: Vec<i64> = first_page.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let last_page = repo.list(2, 4).await.unwrap();
    assert_eq!(last_page.len(), 1);
    assert_eq!(last_page[0].id, 5);

    assert!(repo.list(2, 10).await.unwrap().is_empty());
    assert_eq!(repo.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);
    let id = repo.create(john()).await.unwrap();

    repo.update(id, NewPerson::new("Jane", "Roe", "jane.roe@example.com"))
        .await
        .unwrap();

    let person = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(person.first_name, "Jane");
    assert_eq!(person.last_name, "Roe");
    assert_eq!(person.email, "jane.roe@example.com");
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);

    let err = repo.update(42, john()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_to_taken_email_rolls_back() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);
    repo.create(john()).await.unwrap();
    let jane = repo
        .create(NewPerson::new("Jane", "Roe", "jane.roe@example.com"))
        .await
        .unwrap();

    let err = repo
        .update(jane, NewPerson::new("Jane", "Roe", "john.doe@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation { .. }));
    let person = repo.find_by_id(jane).await.unwrap().unwrap();
    assert_eq!(person.email, "jane.roe@example.com");
}

#[tokio::test]
async fn test_delete_removes_row() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);
    let id = repo.create(john()).await.unwrap();

    repo.delete(id).await.unwrap();

    assert!(repo.find_by_id(id).await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);

    let err = repo.delete(7).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);

    let first = repo.create(john()).await.unwrap();
    repo.delete(first).await.unwrap();
    let second = repo.create(john()).await.unwrap();

    assert!(second > first);
}

#[tokio::test]
async fn test_store_rejects_empty_fields() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);

    for person in [
        NewPerson::new("", "Doe", "john.doe@example.com"),
        NewPerson::new("John", "", "john.doe@example.com"),
        NewPerson::new("John", "Doe", ""),
    ] {
        let err = repo.create(person).await.unwrap_err();
        assert!(matches!(err, AppError::ConstraintViolation { .. }), "{err:?}");
    }

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_to_empty_name_keeps_row() {
    let pool = common::setup_pool().await;
    let repo = make_repo(&pool);
    let id = repo.create(john()).await.unwrap();

    let err = repo
        .update(id, NewPerson::new("", "Doe", "john.doe@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation { .. }));
    let person = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(person.first_name, "John");
}

#[tokio::test]
async fn test_service_rejects_empty_person_without_writing() {
    let pool = common::setup_pool().await;
    let service = PersonService::new(Arc::new(make_repo(&pool)));

    let err = service
        .create(NewPerson::new("", "", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(common::count_people(&pool).await, 0);
}
