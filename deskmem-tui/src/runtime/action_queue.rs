use deskmem_api::models::{
    Ack, Activity, DailyReport, HourlyReport, Page, Screenshot, SearchHit, TodayStats,
};
use deskmem_api::ApiError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub(super) type Loaded<T> = Result<T, ApiError>;

#[derive(Debug)]
pub(super) enum ReportData {
    Hourly(Vec<HourlyReport>),
    Daily(Vec<DailyReport>),
}

#[derive(Debug)]
pub(super) enum Action {
    CheckSession,
    SessionChecked,
    SubmitLogin,
    LoginFinished(Result<(), String>),
    Logout,
    LoggedOut,
    /// Load whatever the route on screen shows.
    Reload,
    RefreshDashboard,
    DashboardLoaded {
        ticket: u64,
        result: Loaded<(TodayStats, Page<Activity>)>,
    },
    TimelineLoaded {
        ticket: u64,
        result: Loaded<Page<Screenshot>>,
    },
    ReportsLoaded {
        ticket: u64,
        result: Loaded<ReportData>,
    },
    RunSearch,
    SearchLoaded {
        ticket: u64,
        query: String,
        result: Loaded<Page<SearchHit>>,
    },
    TriggerAnalysis,
    RetryFailed,
    MaintenanceFinished(Loaded<Ack>),
    OpenSelectedScreenshot,
    OpenSelectedHit,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
