//! Variant catalog against real Postgres.

use omega_domain::{VariantGroupId, VariantGroupName, VariantName};

use super::PostgresTestHarness;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::variant::VariantError;

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn variant_reads_carry_group_name() {
    let harness = PostgresTestHarness::start().await.expect("postgres");
    let app = harness.app(true);
    let variants = &app.use_cases.variant;

    let group = variants
        .group
        .create(VariantGroupName::new("Nature").unwrap())
        .await
        .unwrap();
    let storm = variants
        .variant
        .create(group.id(), VariantName::new("Thunderstorm").unwrap())
        .await
        .unwrap();

    assert_eq!(storm.group().as_str(), "Nature");
    assert_eq!(storm.name().as_str(), "Thunderstorm");

    let renamed = variants
        .group
        .update(group.id(), VariantGroupName::new("Weather").unwrap())
        .await
        .unwrap();
    assert_eq!(renamed.name().as_str(), "Weather");

    let reread = variants.variant.find(storm.id()).await.unwrap();
    assert_eq!(reread.group().as_str(), "Weather");
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn variant_in_unknown_group_is_a_constraint_violation() {
    let harness = PostgresTestHarness::start().await.expect("postgres");
    let app = harness.app(true);

    let result = app
        .use_cases
        .variant
        .variant
        .create(
            VariantGroupId::from_i32(404),
            VariantName::new("Orphan").unwrap(),
        )
        .await;

    assert!(matches!(
        result,
        Err(VariantError::Repo(RepoError::ConstraintViolation(_)))
    ));
    assert_eq!(harness.count("variants").await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn deleting_missing_group_is_not_found() {
    let harness = PostgresTestHarness::start().await.expect("postgres");
    let app = harness.app(true);

    let result = app
        .use_cases
        .variant
        .group
        .delete(VariantGroupId::from_i32(404))
        .await;

    assert!(matches!(result, Err(VariantError::NotFound { id: 404, .. })));
}
