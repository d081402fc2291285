//! Data-source calls whose results are dispatched into the store

use super::{Action, Store};
use crate::api::{ApiResult, DataSource, OptionKind, Role};
use crate::pagination::{ListQuery, PageRequest};
use tracing::debug;

/// Load everything the shell needs before the first page is shown
pub async fn bootstrap(store: &mut Store, api: &dyn DataSource, role: Role) -> ApiResult<()> {
    debug!(source = api.name(), role = %role, "Bootstrapping store");

    let (permissions, centers, stats) =
        futures::try_join!(api.permissions(role), api.list_centers(), api.job_stats())?;
    let (users, center_names, jobs) = futures::try_join!(
        api.autocomplete(OptionKind::Users),
        api.autocomplete(OptionKind::Centers),
        api.autocomplete(OptionKind::Jobs),
    )?;

    store.dispatch_all([
        Action::PermissionsLoaded { role, permissions },
        Action::CentersLoaded(centers),
        Action::JobStatsLoaded(stats),
        Action::OptionsLoaded { kind: OptionKind::Users, options: users },
        Action::OptionsLoaded { kind: OptionKind::Centers, options: center_names },
        Action::OptionsLoaded { kind: OptionKind::Jobs, options: jobs },
    ]);
    Ok(())
}

/// Fetch the users page selected by the stored query
pub async fn fetch_users(store: &mut Store, api: &dyn DataSource) -> ApiResult<()> {
    let query = store.users().query.clone();
    let page = api.list_users(&query).await?;
    store.dispatch(Action::UsersLoaded(page));
    Ok(())
}

/// Store a new users query and fetch its page
pub async fn query_users(store: &mut Store, api: &dyn DataSource, query: ListQuery) -> ApiResult<()> {
    store.dispatch(Action::UsersQueryChanged(query));
    fetch_users(store, api).await
}

/// Move the users list to another page
pub async fn request_users_page(
    store: &mut Store,
    api: &dyn DataSource,
    request: PageRequest,
) -> ApiResult<()> {
    let mut query = store.users().query.clone();
    query.apply(request);
    query_users(store, api, query).await
}

/// Reload every center. The client-side pager starts over at page 1.
pub async fn fetch_centers(store: &mut Store, api: &dyn DataSource) -> ApiResult<()> {
    let centers = api.list_centers().await?;
    store.dispatch(Action::CentersLoaded(centers));
    Ok(())
}

/// Fetch the jobs page selected by the stored query
pub async fn fetch_jobs(store: &mut Store, api: &dyn DataSource) -> ApiResult<()> {
    let query = store.jobs().query.clone();
    let page = api.list_jobs(&query).await?;
    store.dispatch(Action::JobsLoaded(page));
    Ok(())
}

/// Store a new jobs query and fetch its page
pub async fn query_jobs(store: &mut Store, api: &dyn DataSource, query: ListQuery) -> ApiResult<()> {
    store.dispatch(Action::JobsQueryChanged(query));
    fetch_jobs(store, api).await
}

/// Move the jobs list to another page
pub async fn request_jobs_page(
    store: &mut Store,
    api: &dyn DataSource,
    request: PageRequest,
) -> ApiResult<()> {
    let mut query = store.jobs().query.clone();
    query.apply(request);
    query_jobs(store, api, query).await
}

/// Load one job for the detail view. A failed lookup clears the selection.
pub async fn fetch_job(store: &mut Store, api: &dyn DataSource, id: &str) -> ApiResult<()> {
    match api.get_job(id).await {
        Ok(job) => {
            store.dispatch(Action::JobSelected(job));
            Ok(())
        }
        Err(e) => {
            store.dispatch(Action::JobCleared);
            Err(e)
        }
    }
}

/// Refresh dashboard statistics
pub async fn fetch_job_stats(store: &mut Store, api: &dyn DataSource) -> ApiResult<()> {
    let stats = api.job_stats().await?;
    store.dispatch(Action::JobStatsLoaded(stats));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{JobStatus, MockApi};

    fn setup() -> (Store, MockApi) {
        (Store::default(), MockApi::embedded().unwrap())
    }

    #[tokio::test]
    async fn test_bootstrap_fills_every_slice() {
        let (mut store, api) = setup();
        bootstrap(&mut store, &api, Role::Operator).await.unwrap();

        assert!(store.can("manage.users"));
        assert!(!store.can("manage.permissions"));
        assert_eq!(store.centers().all.len(), 7);
        assert_eq!(store.job_stats().map(|s| s.total), Some(57));
        assert!(!store.autocomplete().options(OptionKind::Users).is_empty());
    }

    #[tokio::test]
    async fn test_paging_through_jobs() {
        let (mut store, api) = setup();
        fetch_jobs(&mut store, &api).await.unwrap();
        assert_eq!(store.job_rows().len(), 10);
        assert!(store.jobs().page.pagination.has_next());

        let next = store.jobs().page.pagination.next_request().unwrap();
        request_jobs_page(&mut store, &api, next).await.unwrap();
        assert_eq!(store.jobs().query.page(), 2);
        assert_eq!(store.job_rows()[0].id, "J-0011");

        let last = store.jobs().page.pagination.last_request();
        request_jobs_page(&mut store, &api, last).await.unwrap();
        assert_eq!(store.job_rows().len(), 7);
        assert!(!store.jobs().page.pagination.has_next());
    }

    #[tokio::test]
    async fn test_search_survives_paging_and_resets_on_change() {
        let (mut store, api) = setup();
        let mut query = store.jobs().query.clone();
        query.set_filter("status", Some(JobStatus::Succeeded.as_str()));
        query.set_per_page(5);
        query_jobs(&mut store, &api, query).await.unwrap();
        assert_eq!(store.jobs().page.pagination.total, 22);

        request_jobs_page(&mut store, &api, PageRequest::new(3, 5)).await.unwrap();
        assert_eq!(store.jobs().query.page(), 3);
        assert_eq!(store.jobs().status_filter(), Some("succeeded"));

        let mut query = store.jobs().query.clone();
        query.set_keyword("backup");
        query_jobs(&mut store, &api, query).await.unwrap();
        assert_eq!(store.jobs().query.page(), 1);
    }

    #[tokio::test]
    async fn test_reloading_centers_restarts_paging() {
        let mut store = Store::new(3, &[]);
        let api = MockApi::embedded().unwrap();
        fetch_centers(&mut store, &api).await.unwrap();
        store.dispatch(Action::CentersPageRequested(PageRequest::new(3, 3)));
        assert_eq!(store.centers().paginator.page(), 3);

        fetch_centers(&mut store, &api).await.unwrap();
        assert_eq!(store.centers().paginator.page(), 1);
        assert_eq!(store.center_rows().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_missing_job_clears_selection() {
        let (mut store, api) = setup();
        fetch_job(&mut store, &api, "J-0002").await.unwrap();
        assert_eq!(store.selected_job().map(|j| j.id.as_str()), Some("J-0002"));

        assert!(fetch_job(&mut store, &api, "J-0000").await.is_err());
        assert!(store.selected_job().is_none());
    }

    #[tokio::test]
    async fn test_users_page_request_out_of_range_is_clamped() {
        let (mut store, api) = setup();
        request_users_page(&mut store, &api, PageRequest::new(40, 10)).await.unwrap();
        assert_eq!(store.users().query.page(), 3);
        assert_eq!(store.user_rows().len(), 6);
    }
}
