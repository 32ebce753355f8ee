//! Draft/commit state machine of a date or date-time picker.
//!
//! A [`Picker`] holds the immutable configuration of one picker instance and
//! reduces `(PickerState, Event)` into a new state plus an optional
//! [`Commit`]. The host owns the state value and feeds it back on every
//! event; nothing is shared or mutated behind its back.
//!
//! An open [`Session`] works on a [`Draft`]. The committed value only changes
//! at a commit: a day pick in date mode, a minute pick in date-time mode, or
//! an explicit clear. Closing a session with an unfinished draft simply drops
//! it, so the committed value is exactly what it was before.

use crate::calendar::{Clock, SystemClock, add_months, start_of_month};
use crate::codec::{ExternalValue, decode, display, encode};
use crate::config::{ConfigError, PickerConfig, PickerMode};
use crate::grid::{DayCell, YearWindow, build_day_grid, build_year_window, weekday_labels};
use crate::range::{ExclusionPredicate, Precision};
use crate::types::{Hour, Minute};
use crate::Instant;

/// How far the user got in the current session.
///
/// Every phase carries the working instant the picker displays; only the
/// phase says which of its parts the user actually chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Draft {
    /// Nothing chosen yet; `seed` only positions the calendar and time lists.
    Empty { seed: Instant },
    /// A day is chosen, the time is not confirmed.
    DateChosen { date: Instant },
    /// Day and hour chosen, minute still open.
    HourChosen { date: Instant },
    /// Matches a committed value.
    Complete { value: Instant },
}

impl Draft {
    pub const fn working(&self) -> Instant {
        match *self {
            Self::Empty { seed } => seed,
            Self::DateChosen { date } | Self::HourChosen { date } => date,
            Self::Complete { value } => value,
        }
    }

    /// The chosen day, if any.
    pub const fn chosen_date(&self) -> Option<Instant> {
        match *self {
            Self::Empty { .. } => None,
            Self::DateChosen { date } | Self::HourChosen { date } => Some(date.date_part()),
            Self::Complete { value } => Some(value.date_part()),
        }
    }

    pub const fn hour_chosen(&self) -> bool {
        matches!(self, Self::HourChosen { .. } | Self::Complete { .. })
    }

    /// Something was chosen that has not been committed.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::DateChosen { .. } | Self::HourChosen { .. })
    }
}

/// One open editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session {
    view:  Instant,
    draft: Draft,
}

impl Session {
    fn new(draft: Draft) -> Self {
        Self {
            view: start_of_month(draft.working()),
            draft,
        }
    }

    /// First day of the displayed month.
    pub const fn view(&self) -> Instant {
        self.view
    }

    pub const fn draft(&self) -> Draft {
        self.draft
    }
}

/// Everything that changes while a picker is used. Owned by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PickerState {
    committed: Option<Instant>,
    session:   Option<Session>,
}

impl PickerState {
    pub const fn committed(&self) -> Option<Instant> {
        self.committed
    }

    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the user is in the middle of an uncommitted selection.
    pub fn is_draft_pending(&self) -> bool {
        self.session.is_some_and(|s| s.draft.is_pending())
    }
}

/// Host input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Open,
    Close,
    Clear,
    PrevMonth,
    NextMonth,
    ShowMonth { year: u16, month: u8 },
    ShowYear(u16),
    PickDay(u8),
    PickHour(u8),
    PickMinute(u8),
    /// The externally stored value changed, e.g. a form reset.
    Sync(ExternalValue),
}

/// A change of the committed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub value:    Option<Instant>,
    /// `value` in the configured encoding.
    pub external: ExternalValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state:  PickerState,
    pub commit: Option<Commit>,
}

/// Rendering state of one day-grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub cell:     DayCell,
    pub enabled:  bool,
    pub selected: bool,
    pub today:    bool,
}

/// Configuration of one picker plus the reducer over its state.
pub struct Picker {
    config:  PickerConfig,
    exclude: Option<Box<ExclusionPredicate>>,
    clock:   Box<dyn Clock>,
}

impl std::fmt::Debug for Picker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picker")
            .field("config", &self.config)
            .field("exclude", &self.exclude.is_some())
            .finish_non_exhaustive()
    }
}

impl Picker {
    /// # Errors
    /// Returns `ConfigError` if the configuration does not validate.
    pub fn new(config: PickerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            exclude: None,
            clock: Box::new(SystemClock),
        })
    }

    /// Marks individual days as unselectable regardless of the range.
    #[must_use]
    pub fn with_exclusion(mut self, exclude: impl Fn(&Instant) -> bool + 'static) -> Self {
        self.exclude = Some(Box::new(exclude));
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Closed state holding the host's current value.
    pub fn initial_state(&self, current: &ExternalValue) -> PickerState {
        PickerState {
            committed: self.accept_external(current),
            session:   None,
        }
    }

    pub fn reduce(&self, mut state: PickerState, event: Event) -> Transition {
        let commit = self.apply(&mut state, event);
        Transition { state, commit }
    }

    /// In-place form of [`Picker::reduce`].
    pub fn apply(&self, state: &mut PickerState, event: Event) -> Option<Commit> {
        match event {
            Event::Open => {
                self.open(state);
                None
            },
            Event::Close => {
                self.close(state);
                None
            },
            Event::Clear => self.clear(state),
            Event::PrevMonth => {
                self.navigate(state, -1);
                None
            },
            Event::NextMonth => {
                self.navigate(state, 1);
                None
            },
            Event::ShowMonth { year, month } => {
                self.show_month(state, year, month);
                None
            },
            Event::ShowYear(year) => {
                self.show_year(state, year);
                None
            },
            Event::PickDay(day) => self.pick_day(state, day),
            Event::PickHour(hour) => {
                self.pick_hour(state, hour);
                None
            },
            Event::PickMinute(minute) => self.pick_minute(state, minute),
            Event::Sync(value) => {
                self.sync(state, &value);
                None
            },
        }
    }

    fn open(&self, state: &mut PickerState) {
        if state.session.is_some() {
            return;
        }
        let session = Session::new(self.seed(state.committed));
        tracing::debug!(event = "picker.session.opened", view = %session.view, draft = ?session.draft);
        state.session = Some(session);
    }

    fn close(&self, state: &mut PickerState) {
        let Some(session) = state.session.take() else {
            return;
        };
        if session.draft.is_pending() {
            tracing::debug!(
                event = "picker.session.rolled_back",
                draft = ?session.draft,
                committed = ?state.committed
            );
        }
    }

    fn clear(&self, state: &mut PickerState) -> Option<Commit> {
        let commit = self.commit(state, None);
        if let Some(session) = state.session.as_mut() {
            *session = Session::new(self.seed(None));
        }
        commit
    }

    fn navigate(&self, state: &mut PickerState, delta: i32) {
        let Some(session) = state.session.as_mut() else {
            return;
        };
        match add_months(session.view, delta) {
            Some(target) if self.month_reachable(target.year(), target.month()) => session.view = target,
            _ => tracing::debug!(event = "picker.nav.rejected", view = %session.view, delta),
        }
    }

    fn show_month(&self, state: &mut PickerState, year: u16, month: u8) {
        let Some(session) = state.session.as_mut() else {
            return;
        };
        match Instant::date(year, month, 1) {
            Ok(target) if self.month_reachable(year, month) => session.view = target,
            _ => tracing::debug!(event = "picker.nav.rejected", year, month),
        }
    }

    fn show_year(&self, state: &mut PickerState, year: u16) {
        let Some(session) = state.session.as_mut() else {
            return;
        };
        if !self.year_allowed(year) {
            tracing::debug!(event = "picker.nav.rejected", year);
            return;
        }
        // Keep the displayed month unless it lies outside the range in that year
        if let Ok(target) = Instant::date(year, session.view.month(), 1) {
            session.view = start_of_month(self.config.range.clamp(target));
        }
    }

    fn pick_day(&self, state: &mut PickerState, day: u8) -> Option<Commit> {
        let session = state.session.as_mut()?;
        let working = session.draft.working();
        let date = match session.view.with_day(day) {
            Ok(date) if self.config.range.day_allowed(date, self.exclude.as_deref()) => date,
            _ => {
                tracing::debug!(event = "picker.day.rejected", view = %session.view, day);
                return None;
            },
        };

        match self.config.mode {
            PickerMode::Date => {
                session.draft = Draft::Complete { value: date };
                self.commit(state, Some(date))
            },
            PickerMode::DateTime => {
                // Time has to be confirmed again after a day change
                session.draft = Draft::DateChosen {
                    date: date.with_time(working.hour_typed(), working.minute_typed()),
                };
                None
            },
        }
    }

    fn pick_hour(&self, state: &mut PickerState, hour: u8) {
        let Some(session) = state.session.as_mut() else {
            return;
        };
        let working = session.draft.working();
        let hour = match Hour::new(hour) {
            Ok(hour) if self.config.mode.requires_time() && self.hour_selectable(working, hour) => hour,
            _ => {
                tracing::debug!(event = "picker.hour.rejected", day = %working.date_part(), hour);
                return;
            },
        };

        let mut date = working.with_hour(hour);
        if !self.minute_selectable(date, working.minute_typed())
            && let Some(lowest) = self.selectable_minutes(date, hour).next()
        {
            date = date.with_minute(lowest);
        }
        session.draft = Draft::HourChosen { date };
    }

    fn pick_minute(&self, state: &mut PickerState, minute: u8) -> Option<Commit> {
        let session = state.session.as_mut()?;
        let working = session.draft.working();
        let value = match Minute::new(minute) {
            Ok(minute) if self.config.mode.requires_time() && self.minute_selectable(working, minute) => {
                working.with_minute(minute)
            },
            _ => {
                tracing::debug!(event = "picker.minute.rejected", working = %working, minute);
                return None;
            },
        };

        session.draft = Draft::Complete { value };
        self.commit(state, Some(value))
    }

    fn sync(&self, state: &mut PickerState, value: &ExternalValue) {
        if state.session.is_some() {
            tracing::debug!(event = "picker.sync.ignored", reason = "session open");
            return;
        }
        state.committed = self.accept_external(value);
    }

    /// Publishes `value` unless it equals what is already committed.
    fn commit(&self, state: &mut PickerState, value: Option<Instant>) -> Option<Commit> {
        if state.committed == value {
            return None;
        }
        state.committed = value;
        tracing::debug!(event = "picker.commit", value = ?value);
        Some(Commit {
            value,
            external: encode(value, self.config.encoding, self.config.mode),
        })
    }

    /// Draft for a new session: the committed value, else now clamped into the range.
    fn seed(&self, committed: Option<Instant>) -> Draft {
        if let Some(value) = committed {
            return Draft::Complete { value };
        }
        let candidate = self.config.range.clamp(self.clock.now());
        let seed = match self.config.mode {
            PickerMode::Date => candidate.date_part(),
            PickerMode::DateTime => candidate.with_minute(self.config.minute_step.floor(candidate.minute_typed())),
        };
        Draft::Empty { seed }
    }

    fn accept_external(&self, value: &ExternalValue) -> Option<Instant> {
        let decoded = decode(value, self.config.mode)?;
        if self.value_allowed(decoded) {
            Some(decoded)
        } else {
            tracing::debug!(event = "picker.value.out_of_range", value = %decoded);
            None
        }
    }

    /// Whether `value` may be committed in the configured mode.
    fn value_allowed(&self, value: Instant) -> bool {
        let range = &self.config.range;
        range.day_allowed(value, self.exclude.as_deref())
            && (!self.config.mode.requires_time() || range.allows(value, Precision::Minute))
    }

    /// Earliest minute the lower bound leaves open in `hour` of `day`.
    ///
    /// On the day of the range minimum, hours before its hour are closed and
    /// its own hour opens at its minute rounded up to the step.
    fn minute_floor(&self, day: Instant, hour: Hour) -> Option<Minute> {
        match self.config.range.min() {
            Some(min) if day.same_date(&min) && hour < min.hour_typed() => None,
            Some(min) if day.same_date(&min) && hour == min.hour_typed() => {
                self.config.minute_step.ceil(min.minute_typed())
            },
            _ => Some(Minute::ZERO),
        }
    }

    /// Whether `minute` in the hour of `at` is on the step grid and passes
    /// the lower bound, the range and the exclusions.
    fn minute_selectable(&self, at: Instant, minute: Minute) -> bool {
        self.config.minute_step.contains(minute)
            && self
                .minute_floor(at, at.hour_typed())
                .is_some_and(|floor| minute >= floor)
            && self.value_allowed(at.with_minute(minute))
    }

    /// Selectable minutes of `hour` on `day`, ascending.
    fn selectable_minutes(&self, day: Instant, hour: Hour) -> impl Iterator<Item = Minute> + '_ {
        let at = day.with_hour(hour);
        self.config
            .minute_step
            .grid()
            .filter(move |m| self.minute_selectable(at, *m))
    }

    fn hour_selectable(&self, day: Instant, hour: Hour) -> bool {
        self.selectable_minutes(day, hour).next().is_some()
    }

    /// Whether day `day` of the displayed month can be picked.
    pub fn day_allowed(&self, session: &Session, day: u8) -> bool {
        session
            .view
            .with_day(day)
            .is_ok_and(|date| self.config.range.day_allowed(date, self.exclude.as_deref()))
    }

    /// Whether the month has any day inside the range. Exclusions are ignored.
    pub fn month_allowed(&self, year: u16, month: u8) -> bool {
        self.config.range.month_has_open_day(year, month)
    }

    /// Whether the view may move to the month: its year is listed and it has a day inside the range.
    fn month_reachable(&self, year: u16, month: u8) -> bool {
        self.year_window().contains(year) && self.month_allowed(year, month)
    }

    /// Whether the year is listed and has any day inside the range.
    pub fn year_allowed(&self, year: u16) -> bool {
        self.year_window().contains(year) && self.config.range.year_has_open_day(year)
    }

    /// Whether `hour` has a selectable minute on the draft's day.
    pub fn hour_allowed(&self, session: &Session, hour: u8) -> bool {
        self.config.mode.requires_time()
            && Hour::new(hour).is_ok_and(|hour| self.hour_selectable(session.draft.working(), hour))
    }

    /// Whether `minute` is selectable in the draft's day and hour.
    pub fn minute_allowed(&self, session: &Session, minute: u8) -> bool {
        let working = session.draft.working();
        self.config.mode.requires_time()
            && Minute::new(minute).is_ok_and(|minute| self.minute_selectable(working, minute))
    }

    /// Whether moving the view by `delta` months would be accepted.
    pub fn can_navigate(&self, session: &Session, delta: i32) -> bool {
        add_months(session.view, delta).is_some_and(|target| self.month_reachable(target.year(), target.month()))
    }

    /// The displayed month with per-day state.
    pub fn day_grid(&self, session: &Session) -> Vec<GridCell> {
        let today = self.clock.now().date_part();
        let selected = session.draft.chosen_date();
        build_day_grid(session.view, self.config.first_day_of_week)
            .into_iter()
            .map(|cell| {
                let date = cell.day().and_then(|day| session.view.with_day(day).ok());
                GridCell {
                    cell,
                    enabled: date.is_some_and(|d| self.config.range.day_allowed(d, self.exclude.as_deref())),
                    selected: date.is_some() && date == selected,
                    today: date == Some(today),
                }
            })
            .collect()
    }

    /// Every hour with its availability on the draft's day.
    pub fn hour_options(&self, session: &Session) -> Vec<(u8, bool)> {
        (0..crate::HOURS_PER_DAY).map(|h| (h, self.hour_allowed(session, h))).collect()
    }

    /// Every grid minute with its availability in the draft's hour.
    pub fn minute_options(&self, session: &Session) -> Vec<(u8, bool)> {
        self.config
            .minute_step
            .grid()
            .map(|m| (m.get(), self.minute_allowed(session, m.get())))
            .collect()
    }

    pub fn year_window(&self) -> YearWindow {
        build_year_window(&self.config.range, self.clock.now(), self.config.year_spread)
    }

    pub fn weekday_labels(&self) -> [&'static str; 7] {
        weekday_labels(self.config.locale, self.config.first_day_of_week)
    }

    /// Month name and year of the displayed month, e.g. `January 2024`.
    pub fn view_label(&self, session: &Session) -> String {
        let view = session.view;
        format!("{} {}", self.config.locale.month_name(view.month_typed()), view.year())
    }

    /// Label of the draft; empty while nothing has been chosen.
    pub fn draft_label(&self, session: &Session) -> String {
        match session.draft {
            Draft::Empty { .. } => String::new(),
            draft => display(Some(draft.working()), self.config.locale, self.config.mode),
        }
    }

    /// Label of the committed value; empty when absent.
    pub fn value_label(&self, state: &PickerState) -> String {
        display(state.committed, self.config.locale, self.config.mode)
    }

    /// The committed value in the configured encoding.
    pub fn external_value(&self, state: &PickerState) -> ExternalValue {
        encode(state.committed, self.config.encoding, self.config.mode)
    }
}
