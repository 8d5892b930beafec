// Application state for HTTP handlers
use crate::application::complaint_service::ComplaintService;
use crate::application::dashboard_service::DashboardService;

#[derive(Clone)]
pub struct AppState {
    pub complaint_service: ComplaintService,
    pub dashboard_service: DashboardService,
}
