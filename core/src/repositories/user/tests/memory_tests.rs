//! Unit tests for the in-memory user repository

use crate::domain::entities::user::{Role, User};
use crate::errors::DomainError;
use crate::repositories::user::{InMemoryUserRepository, UserRepository};

fn user(email: &str) -> User {
    User::new(email, "alice01", "hash", Role::User)
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let repo = InMemoryUserRepository::new();

    let first = repo.create(user("a@x.com")).await.unwrap();
    let second = repo.create(user("b@x.com")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().email, "b@x.com");
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("a@x.com")).await.unwrap();

    let result = repo.create(user("a@x.com")).await;
    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert!(repo.exists_by_email("a@x.com").await.unwrap());
    assert!(!repo.exists_by_email("c@x.com").await.unwrap());
}

#[tokio::test]
async fn test_update_rejects_taken_email_and_unknown_id() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("a@x.com")).await.unwrap();
    let mut second = repo.create(user("b@x.com")).await.unwrap();

    second.change_email("a@x.com");
    assert!(matches!(
        repo.update(second).await,
        Err(DomainError::Conflict { .. })
    ));

    let mut ghost = user("ghost@x.com");
    ghost.id = 99;
    assert!(matches!(
        repo.update(ghost).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_find_by_email() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("a@x.com")).await.unwrap();

    assert!(repo.find_by_email("a@x.com").await.unwrap().is_some());
    assert!(repo.find_by_email("missing@x.com").await.unwrap().is_none());
}
