use notekeep_core::db::open_db_in_memory;
use notekeep_core::{
    AuthError, CredentialService, Database, SqliteUserRepository, TokenIssuer, UserRepository,
};
use std::sync::{Arc, Barrier};
use std::thread;

const TEST_SECRET: &str = "test-secret-key-minimum-32-chars!!";
const TEST_HASH_COST: u32 = 4;

fn service(db: &Database) -> CredentialService<SqliteUserRepository<'_>> {
    CredentialService::with_hash_cost(
        SqliteUserRepository::new(db),
        TokenIssuer::new(TEST_SECRET).unwrap(),
        TEST_HASH_COST,
    )
}

#[test]
fn register_then_authenticate_returns_matching_claims() {
    let db = open_db_in_memory().unwrap();
    let credentials = service(&db);

    let user = credentials.register("alice", "pw1").unwrap();
    assert_eq!(user.username, "alice");
    assert!(user.created_at > 0);

    let session = credentials.authenticate("alice", "pw1").unwrap();
    assert_eq!(session.user, user);

    let claims = credentials.verify(&session.token).unwrap();
    assert_eq!(claims.id, user.id);
    assert_eq!(claims.username, "alice");
}

#[test]
fn duplicate_username_is_rejected() {
    let db = open_db_in_memory().unwrap();
    let credentials = service(&db);

    credentials.register("alice", "pw1").unwrap();
    let err = credentials.register("alice", "pw2").unwrap_err();
    assert!(matches!(err, AuthError::DuplicateUsername));

    // The original password still works.
    credentials.authenticate("alice", "pw1").unwrap();
}

#[test]
fn concurrent_duplicate_signups_create_exactly_one_account() {
    let db = Arc::new(open_db_in_memory().unwrap());
    let workers = 8;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|i| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service(&db)
                    .register("racer", &format!("pw{i}"))
                    .map(|user| user.id)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    for result in results.iter().filter(|result| result.is_err()) {
        assert!(matches!(result, Err(AuthError::DuplicateUsername)));
    }
}

#[test]
fn register_rejects_blank_username_or_empty_password() {
    let db = open_db_in_memory().unwrap();
    let credentials = service(&db);

    for (username, password) in [("", "pw"), ("   ", "pw"), ("alice", "")] {
        let err = credentials.register(username, password).unwrap_err();
        assert!(
            matches!(err, AuthError::InvalidInput(_)),
            "({username:?}, {password:?}) should be invalid input"
        );
    }
}

#[test]
fn stored_hash_is_bcrypt_and_not_the_password() {
    let db = open_db_in_memory().unwrap();
    service(&db).register("alice", "pw1").unwrap();

    let record = SqliteUserRepository::new(&db)
        .find_by_username("alice")
        .unwrap()
        .unwrap();
    assert_ne!(record.password_hash, "pw1");
    assert!(record.password_hash.starts_with("$2"));
    assert!(bcrypt::verify("pw1", &record.password_hash).unwrap());
}

#[test]
fn unknown_user_and_wrong_password_are_indistinguishable() {
    let db = open_db_in_memory().unwrap();
    let credentials = service(&db);
    credentials.register("alice", "pw1").unwrap();

    let wrong_password = credentials.authenticate("alice", "nope").unwrap_err();
    let unknown_user = credentials.authenticate("mallory", "pw1").unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_user, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[test]
fn authenticate_with_empty_fields_is_invalid_credentials() {
    let db = open_db_in_memory().unwrap();
    let credentials = service(&db);

    assert!(matches!(
        credentials.authenticate("", "pw"),
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        credentials.authenticate("alice", ""),
        Err(AuthError::InvalidCredentials)
    ));
}

#[test]
fn verify_rejects_tampered_token() {
    let db = open_db_in_memory().unwrap();
    let credentials = service(&db);
    credentials.register("alice", "pw1").unwrap();
    let session = credentials.authenticate("alice", "pw1").unwrap();

    let mut tampered = session.token.clone();
    tampered.push('x');
    assert!(matches!(
        credentials.verify(&tampered),
        Err(AuthError::InvalidToken)
    ));
}

#[test]
fn tokens_past_their_lifetime_are_rejected() {
    let db = open_db_in_memory().unwrap();
    let issuer = TokenIssuer::new(TEST_SECRET).unwrap().with_ttl_secs(-3600);
    let credentials =
        CredentialService::with_hash_cost(SqliteUserRepository::new(&db), issuer, TEST_HASH_COST);
    credentials.register("alice", "pw1").unwrap();

    let session = credentials.authenticate("alice", "pw1").unwrap();
    assert!(matches!(
        credentials.verify(&session.token),
        Err(AuthError::InvalidToken)
    ));
}
