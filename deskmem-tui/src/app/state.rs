use deskmem_api::models::{
    Activity, DailyReport, HourlyReport, Screenshot, SearchHit, TodayStats,
};
use time::{Date, Duration};

/// Generation counter that lets a view drop results from superseded loads.
///
/// Each load takes a ticket from [`LoadGuard::begin`]; only the result
/// carrying the latest ticket is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadGuard {
    generation: u64,
    in_flight: bool,
}

impl LoadGuard {
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = true;
        self.generation
    }

    /// Returns true and settles the guard if `ticket` is the latest one.
    pub fn finish(&mut self, ticket: u64) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Forget any load in flight; its result will be discarded.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub password: TextInput,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginState {
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.password.value.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub stats: Option<TodayStats>,
    pub recent: Vec<Activity>,
    pub guard: LoadGuard,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TimelineState {
    pub date: Date,
    pub page: u32,
    pub screenshots: Vec<Screenshot>,
    pub total: u64,
    pub selected: usize,
    pub guard: LoadGuard,
    pub error: Option<String>,
}

impl TimelineState {
    pub fn new(date: Date) -> Self {
        Self {
            date,
            page: 0,
            screenshots: Vec::new(),
            total: 0,
            selected: 0,
            guard: LoadGuard::default(),
            error: None,
        }
    }

    pub fn page_count(&self, page_size: u32) -> u32 {
        if page_size == 0 {
            return 1;
        }
        (self.total.div_ceil(page_size as u64) as u32).max(1)
    }

    /// Returns false when already on the last page.
    pub fn next_page(&mut self, page_size: u32) -> bool {
        if self.page + 1 >= self.page_count(page_size) {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Move to another day, back to its first page.
    pub fn shift_day(&mut self, days: i64) {
        self.set_date(self.date.saturating_add(Duration::days(days)));
    }

    pub fn set_date(&mut self, date: Date) {
        self.date = date;
        self.page = 0;
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.screenshots.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_screenshot(&self) -> Option<&Screenshot> {
        self.screenshots.get(self.selected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTab {
    Hourly,
    Daily,
}

#[derive(Debug, Clone)]
pub struct ReportsState {
    pub tab: ReportTab,
    /// Day shown on the hourly tab.
    pub date: Date,
    pub hourly: Vec<HourlyReport>,
    pub daily: Vec<DailyReport>,
    pub guard: LoadGuard,
    pub error: Option<String>,
}

impl ReportsState {
    pub fn new(date: Date) -> Self {
        Self {
            tab: ReportTab::Hourly,
            date,
            hourly: Vec::new(),
            daily: Vec::new(),
            guard: LoadGuard::default(),
            error: None,
        }
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            ReportTab::Hourly => ReportTab::Daily,
            ReportTab::Daily => ReportTab::Hourly,
        };
    }
}

#[derive(Debug, Clone)]
pub struct SearchState {
    pub input: TextInput,
    pub input_focused: bool,
    /// Query the current hits belong to.
    pub last_query: Option<String>,
    pub hits: Vec<SearchHit>,
    pub selected: usize,
    pub total: u64,
    pub guard: LoadGuard,
    pub error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            input_focused: true,
            last_query: None,
            hits: Vec::new(),
            selected: 0,
            total: 0,
            guard: LoadGuard::default(),
            error: None,
        }
    }
}

impl SearchState {
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.hits.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_hit(&self) -> Option<&SearchHit> {
        self.hits.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn stale_ticket_is_rejected() {
        let mut guard = LoadGuard::default();
        let first = guard.begin();
        let second = guard.begin();

        assert!(!guard.finish(first));
        assert!(guard.is_loading());
        assert!(guard.finish(second));
        assert!(!guard.is_loading());
    }

    #[test]
    fn invalidate_discards_in_flight_load() {
        let mut guard = LoadGuard::default();
        let ticket = guard.begin();
        guard.invalidate();

        assert!(!guard.is_loading());
        assert!(!guard.finish(ticket));
    }

    #[test]
    fn text_input_handles_multibyte_chars() {
        let mut input = TextInput::new();
        for c in "日志x".chars() {
            input.insert(c);
        }
        input.move_left();
        input.backspace();
        assert_eq!(input.value, "日x");
        assert_eq!(input.split_at_cursor(), ("日", "x"));
    }

    #[test]
    fn login_submit_needs_password_and_idle_form() {
        let mut login = LoginState::default();
        assert!(!login.can_submit());

        login.password.insert('p');
        assert!(login.can_submit());

        login.submitting = true;
        assert!(!login.can_submit());
    }

    #[test]
    fn timeline_paging_stays_in_range() {
        let mut timeline = TimelineState::new(date!(2024 - 06 - 02));
        timeline.total = 41;

        assert_eq!(timeline.page_count(20), 3);
        assert!(!timeline.prev_page());
        assert!(timeline.next_page(20));
        assert!(timeline.next_page(20));
        assert!(!timeline.next_page(20));
        assert_eq!(timeline.page, 2);
    }

    #[test]
    fn empty_timeline_has_one_page() {
        let timeline = TimelineState::new(date!(2024 - 06 - 02));
        assert_eq!(timeline.page_count(20), 1);
    }

    #[test]
    fn changing_day_resets_page() {
        let mut timeline = TimelineState::new(date!(2024 - 06 - 30));
        timeline.total = 100;
        timeline.next_page(20);
        timeline.selected = 3;

        timeline.shift_day(1);

        assert_eq!(timeline.date, date!(2024 - 07 - 01));
        assert_eq!(timeline.page, 0);
        assert_eq!(timeline.selected, 0);
    }

    fn hit(id: i64) -> SearchHit {
        SearchHit {
            id,
            activity_type: None,
            description: None,
            application: None,
            timestamp: time::macros::datetime!(2024-06-02 09:00 UTC),
            relevance: deskmem_api::models::Relevance::Keyword,
            score: None,
            screenshot_filename: None,
        }
    }

    #[test]
    fn search_selection_stays_within_hits() {
        let mut search = SearchState::default();
        assert!(search.selected_hit().is_none());
        search.select_next();
        assert_eq!(search.selected, 0);

        search.hits = vec![hit(1), hit(2)];
        search.select_next();
        search.select_next();
        assert_eq!(search.selected_hit().map(|h| h.id), Some(2));

        search.select_previous();
        search.select_previous();
        assert_eq!(search.selected_hit().map(|h| h.id), Some(1));
    }
}
