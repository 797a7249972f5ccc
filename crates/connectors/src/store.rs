use crate::error::StoreError;
use async_trait::async_trait;
use model::{collection::CollectionRecord, search::SearchPage};
use planner::plan::SearchPlan;

/// The catalog's storage interface. One compiled plan drives both the page
/// query and the match count, so implementations must execute both against
/// the same predicate.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn search(&self, plan: &SearchPlan) -> Result<SearchPage, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<CollectionRecord>, StoreError>;
}
