use kitchen_storage::RangeQuery;

use super::KitchenInner;
use crate::{
    entities::{Report, ReportStatus, ReportUpdate},
    key,
    params::{DateRange, Day, UserId},
    repository::Handle,
    KitchenError, Result,
};

impl KitchenInner {
    /// Reports of `user` between both dates, inclusive.
    pub async fn fetch_reports(&self, user: &UserId, range: &DateRange) -> Result<Vec<Report>> {
        if range.begin > range.end {
            return Ok(Vec::new());
        }

        let query = RangeQuery::partition(key::report_partition(user.as_str()))
            .lower_bound(key::date_sort_key(range.begin))
            .upper_bound(key::date_sort_key(range.end));
        self.reports.list(&query).await
    }

    /// The report of the day, created as `editing` on first access.
    pub async fn get_or_create_report(&self, day: &Day) -> Result<Report> {
        if let Some(report) = self.find_report(day).await? {
            return Ok(report.into_inner());
        }

        let report = Report::builder()
            .user_id(day.user.as_str())
            .date(day.date)
            .build();
        let report = self.reports.insert(report).await?;
        tracing::info!(user = %day.user, date = %day.date, "report created");
        Ok(report.into_inner())
    }

    pub async fn update_report_status(&self, day: &Day, update: ReportUpdate) -> Result<Report> {
        let status = ReportStatus::parse(&update.status)?;

        let mut report = self.require_report(day).await?;
        report.status = status;
        self.reports.update(&report).await?;
        Ok(report.into_inner())
    }

    pub async fn delete_report(&self, day: &Day) -> Result<()> {
        let report = self.require_report(day).await?;
        self.reports.delete(report).await?;
        Ok(())
    }

    async fn find_report(&self, day: &Day) -> Result<Option<Handle<Report>>> {
        self.reports
            .get(&key::report_key(day.user.as_str(), day.date))
            .await
    }

    async fn require_report(&self, day: &Day) -> Result<Handle<Report>> {
        self.find_report(day)
            .await?
            .ok_or_else(|| KitchenError::not_found("No available report"))
    }
}
