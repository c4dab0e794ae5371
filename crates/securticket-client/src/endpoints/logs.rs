//! Activity log endpoints (admin audit trail).

use securticket_core::result::AppResult;
use securticket_entity::log::ActivityLogEntry;

use crate::http::{ApiClient, Method};
use crate::response;

impl ApiClient {
    /// GET `/logs/` — list activity log entries, optionally filtered to
    /// one user. Admin only; the server enforces the role.
    pub async fn list_activity_logs(
        &self,
        user_id: Option<i64>,
    ) -> AppResult<Vec<ActivityLogEntry>> {
        let path = match user_id {
            Some(id) => format!("/logs/?user_id={id}"),
            None => "/logs/".to_string(),
        };
        let response = self.dispatch(Method::Get, &path, None).await?;
        response::into_result(response)
    }
}
