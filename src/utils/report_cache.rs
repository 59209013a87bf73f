use crate::model::report::MonthlyReportRow;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Read-through cache for the monthly report, keyed `"year:month"`.
/// One instance is built at startup and handed to the services that need
/// it; entries are whole row lists, only ever replaced or deleted.
#[derive(Clone)]
pub struct ReportCache {
    inner: Cache<String, Arc<Vec<MonthlyReportRow>>>,
}

impl ReportCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(256)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build(),
        }
    }

    fn key(year: i32, month: u32) -> String {
        format!("{year}:{month}")
    }

    pub async fn get(&self, year: i32, month: u32) -> Option<Arc<Vec<MonthlyReportRow>>> {
        self.inner.get(&Self::key(year, month)).await
    }

    pub async fn set(&self, year: i32, month: u32, rows: Vec<MonthlyReportRow>) -> Arc<Vec<MonthlyReportRow>> {
        let rows = Arc::new(rows);
        self.inner.insert(Self::key(year, month), rows.clone()).await;
        rows
    }

    /// Called on every mutation that changes the month's attendance
    /// picture (check-in, check-out, admin correction).
    pub async fn invalidate(&self, year: i32, month: u32) {
        self.inner.invalidate(&Self::key(year, month)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn set_then_get_returns_same_rows() {
        let cache = ReportCache::new(60);
        let rows = cache.set(2026, 5, Vec::new()).await;
        let hit = cache.get(2026, 5).await.expect("entry should be cached");
        assert!(Arc::ptr_eq(&rows, &hit));
    }

    #[actix_web::test]
    async fn invalidate_removes_only_the_keyed_month() {
        let cache = ReportCache::new(60);
        cache.set(2026, 5, Vec::new()).await;
        cache.set(2026, 4, Vec::new()).await;
        cache.invalidate(2026, 5).await;
        assert!(cache.get(2026, 5).await.is_none());
        assert!(cache.get(2026, 4).await.is_some());
    }
}
