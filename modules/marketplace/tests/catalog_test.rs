mod common;

use std::sync::Arc;

use anyhow::Result;
use common::{registration, Harness};
use marketplace::contract::error::MarketplaceError;
use marketplace::contract::model::{
    BudgetRange, NewProject, ProjectFilter, ProjectId, ProjectStatus, Role,
};
use marketplace::infra::storage::MemoryStore;
use marketplace::MarketplaceConfig;

fn posting(description: &str, budget: &str, category: &str) -> NewProject {
    NewProject {
        title: Some(format!("{description} job")),
        description: description.to_string(),
        category: Some(category.to_string()),
        budget: Some(budget.to_string()),
        ..NewProject::default()
    }
}

async fn catalog_with_budgets() -> Result<Harness> {
    let h = Harness::empty().await;
    h.api
        .register(registration("Acme", "ops@acme.test", Role::Client))
        .await?;
    h.api.post_project(posting("Small", "400", "design")).await?;
    h.api.post_project(posting("Medium", "800", "development")).await?;
    h.api.post_project(posting("Large", "2500", "development")).await?;
    Ok(h)
}

#[tokio::test]
async fn budget_range_selects_the_middle_project() -> Result<()> {
    let h = catalog_with_budgets().await?;

    let filter = ProjectFilter {
        budget_range: Some(BudgetRange::from_bounds("500", Some("1000"))),
        ..ProjectFilter::default()
    };
    let found = h.api.list_projects(filter).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].budget, Some(800));
    Ok(())
}

#[tokio::test]
async fn listing_is_idempotent_and_keeps_insertion_order() -> Result<()> {
    let h = catalog_with_budgets().await?;
    let filter = ProjectFilter {
        category: Some("development".into()),
        ..ProjectFilter::default()
    };

    let first = h.api.list_projects(filter.clone()).await?;
    let second = h.api.list_projects(filter).await?;
    assert_eq!(first, second);

    let ids: Vec<ProjectId> = first.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ProjectId(2), ProjectId(3)]);
    Ok(())
}

#[tokio::test]
async fn posting_requires_a_session_and_a_description() -> Result<()> {
    let h = Harness::empty().await;
    let err = h
        .api
        .post_project(posting("Logo", "100", "design"))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Unauthorized { .. }));

    h.api
        .register(registration("Acme", "ops@acme.test", Role::Client))
        .await?;
    let err = h
        .api
        .post_project(NewProject {
            description: "   ".into(),
            ..NewProject::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation { .. }));
    Ok(())
}

#[tokio::test]
async fn unparsable_budget_is_stored_as_absent() -> Result<()> {
    let h = Harness::empty().await;
    h.api
        .register(registration("Acme", "ops@acme.test", Role::Client))
        .await?;

    let p = h.api.post_project(posting("Logo", "lots", "design")).await?;
    assert_eq!(p.budget, None);
    assert_eq!(p.status, ProjectStatus::Open);

    let p = h.api.post_project(posting("Site", "750usd", "design")).await?;
    assert_eq!(p.budget, Some(750));
    Ok(())
}

#[tokio::test]
async fn project_lifecycle_moves_forward_only() -> Result<()> {
    let h = Harness::empty().await;
    let dev = h
        .api
        .register(registration("Dev", "dev@example.com", Role::Freelancer))
        .await?;
    h.api.logout().await?;
    let client = h
        .api
        .register(registration("Acme", "ops@acme.test", Role::Client))
        .await?;
    let project = h.api.post_project(posting("Logo", "100", "design")).await?;

    let err = h.api.complete_project(project.id).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::Conflict { .. }));

    let err = h
        .api
        .assign_project(project.id, client.id.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation { .. }));

    let active = h.api.assign_project(project.id, dev.id.clone()).await?;
    assert_eq!(active.status, ProjectStatus::Active);
    assert_eq!(active.freelancer_id, Some(dev.id.clone()));

    let err = h
        .api
        .assign_project(project.id, dev.id.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Conflict { .. }));

    let done = h.api.complete_project(project.id).await?;
    assert_eq!(done.status, ProjectStatus::Completed);

    let err = h.api.get_project(ProjectId(99)).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound { .. }));

    let restarted = h.restart().await;
    assert_eq!(
        restarted.api.get_project(project.id).await?.status,
        ProjectStatus::Completed
    );
    Ok(())
}

#[tokio::test]
async fn demo_catalog_is_seeded_once() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let h = Harness::over(store.clone(), MarketplaceConfig::default()).await;

    let all = h.api.list_projects(ProjectFilter::default()).await?;
    assert_eq!(all.len(), 3);

    h.api
        .register(registration("Acme", "ops@acme.test", Role::Client))
        .await?;
    let posted = h.api.post_project(posting("Logo", "100", "design")).await?;
    assert_eq!(posted.id, ProjectId(4));

    let again = Harness::over(store, MarketplaceConfig::default()).await;
    assert_eq!(
        again.api.list_projects(ProjectFilter::default()).await?.len(),
        4
    );
    Ok(())
}
