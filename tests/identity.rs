mod common;

use tintboard_backend::error::AppError;
use tintboard_backend::store::identity::IdentityStore;
use tintboard_backend::store::profiles::{ProfileField, ProfileStore, MAX_POST_CHARS};
use tintboard_backend::store::themes::{ThemeRef, ThemeStore};

use common::{seed_user, test_pool};

#[tokio::test]
async fn register_creates_user_and_empty_profile() {
    let (_dir, pool) = test_pool().await;
    let identity = IdentityStore::new(pool.clone());
    let profiles = ProfileStore::new(pool);

    let user = identity.register("alice", "hunter22").await.unwrap();
    assert_eq!(user.username, "alice");
    assert!(!user.is_admin);

    let profile = profiles.fetch_profile("alice").await.unwrap();
    assert_eq!(profile.bio, "");
    assert_eq!(profile.website, "");
    assert_eq!(profile.theme, None);

    identity.verify_login("alice", "hunter22").await.unwrap();
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let (_dir, pool) = test_pool().await;
    let identity = IdentityStore::new(pool);

    identity.register("alice", "hunter22").await.unwrap();
    let err = identity.register("alice", "different").await.unwrap_err();
    assert!(matches!(err, AppError::NameConflict(_)));
}

#[tokio::test]
async fn invalid_usernames_and_short_passwords_are_rejected() {
    let (_dir, pool) = test_pool().await;
    let identity = IdentityStore::new(pool);

    let long_name = "a".repeat(33);
    for name in ["", "9lives", "a b", "../alice", long_name.as_str()] {
        let err = identity.register(name, "hunter22").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)), "{name}");
    }

    let err = identity.register("alice", "short").await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user_alike() {
    let (_dir, pool) = test_pool().await;
    seed_user(&pool, "alice", "hunter22", false).await;
    let identity = IdentityStore::new(pool);

    identity.verify_login("alice", "hunter22").await.unwrap();

    let err = identity.verify_login("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, AppError::AuthFailure));
    let err = identity.verify_login("nobody", "hunter22").await.unwrap_err();
    assert!(matches!(err, AppError::AuthFailure));
}

#[tokio::test]
async fn promotion_requires_a_current_admin() {
    let (_dir, pool) = test_pool().await;
    seed_user(&pool, "root", "rootpass", true).await;
    seed_user(&pool, "alice", "password", false).await;
    seed_user(&pool, "bob", "password", false).await;
    let identity = IdentityStore::new(pool);

    let err = identity.promote_to_admin("alice", "bob").await.unwrap_err();
    assert!(matches!(err, AppError::AccessDenied(_)));

    let promoted = identity.promote_to_admin("root", "alice").await.unwrap();
    assert!(promoted.is_admin);

    // The new admin can promote in turn.
    identity.promote_to_admin("alice", "bob").await.unwrap();

    let err = identity.promote_to_admin("root", "ghost").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn deletion_cascades_to_profile_posts_and_themes() {
    let (_dir, pool) = test_pool().await;
    seed_user(&pool, "alice", "password", false).await;
    let identity = IdentityStore::new(pool.clone());
    let profiles = ProfileStore::new(pool.clone());
    let themes = ThemeStore::new(pool.clone());

    profiles.add_post("alice", "first post").await.unwrap();
    profiles.add_post("alice", "second post").await.unwrap();
    themes
        .import_theme("alice", "nightmode", br#"{"color":"teal"}"#)
        .await
        .unwrap();
    themes
        .set_active_theme("alice", &ThemeRef::parse("nightmode"))
        .await
        .unwrap();

    identity.delete_user("alice").await.unwrap();

    for table in ["users", "profiles", "posts", "themes"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0, "{table}");
    }

    let err = identity.delete_user("alice").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn deletion_leaves_other_accounts_untouched() {
    let (_dir, pool) = test_pool().await;
    seed_user(&pool, "alice", "password", false).await;
    seed_user(&pool, "bob", "password", false).await;
    let identity = IdentityStore::new(pool.clone());
    let themes = ThemeStore::new(pool.clone());

    themes.import_theme("alice", "alices", b"{}").await.unwrap();
    themes.import_theme("bob", "bobs", b"{}").await.unwrap();

    identity.delete_user("alice").await.unwrap();

    identity.fetch_user("bob").await.unwrap();
    let remaining: Vec<String> = themes
        .list_visible_themes("bob")
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(remaining, vec!["bobs"]);
}

#[tokio::test]
async fn seeded_admin_is_created_once() {
    let (_dir, pool) = test_pool().await;
    let identity = IdentityStore::new(pool.clone());

    identity.seed_admin("root", "rootpass").await.unwrap();
    identity.seed_admin("root", "otherpass").await.unwrap();

    let user = identity.fetch_user("root").await.unwrap();
    assert!(user.is_admin);

    // The second seed did not overwrite the password.
    identity.verify_login("root", "rootpass").await.unwrap();
    let err = identity.verify_login("root", "otherpass").await.unwrap_err();
    assert!(matches!(err, AppError::AuthFailure));
}

#[tokio::test]
async fn profile_fields_update_through_the_mapping() {
    let (_dir, pool) = test_pool().await;
    seed_user(&pool, "alice", "password", false).await;
    let profiles = ProfileStore::new(pool);

    profiles
        .update_field("alice", ProfileField::Bio, "hello there")
        .await
        .unwrap();
    profiles
        .update_field("alice", ProfileField::Website, "https://example.org")
        .await
        .unwrap();

    let profile = profiles.fetch_profile("alice").await.unwrap();
    assert_eq!(profile.bio, "hello there");
    assert_eq!(profile.website, "https://example.org");

    let err = profiles
        .update_field("ghost", ProfileField::Bio, "x")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn posts_append_in_order_and_are_bounded() {
    let (_dir, pool) = test_pool().await;
    seed_user(&pool, "alice", "password", false).await;
    seed_user(&pool, "bob", "password", false).await;
    let profiles = ProfileStore::new(pool);

    profiles.add_post("alice", "first").await.unwrap();
    profiles.add_post("alice", "  second  ").await.unwrap();
    profiles.add_post("bob", "not alices").await.unwrap();

    let contents: Vec<String> = profiles
        .posts_for("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.content)
        .collect();
    assert_eq!(contents, vec!["first", "second"]);

    let err = profiles.add_post("alice", "   ").await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
    let err = profiles
        .add_post("alice", &"x".repeat(MAX_POST_CHARS + 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}
