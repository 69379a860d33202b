//! Caller-owned session context.
//!
//! A `Session` owns the store, the current profile and today's record. The
//! day roll-over check runs once in [`Session::open`]; after that the record
//! only changes date when the caller asks via [`Session::recheck_day`].
//!
//! Mutations are applied to a copy, persisted, and only then swapped in, so a
//! failed write leaves the in-memory state unchanged.

use crate::aggregator::DailySummary;
use crate::calculator::{checked_daily_calorie_target, suggest_goals};
use crate::daily::{roll_over, DailyRecord, DateKey, DayState, FoodEntry, NewFoodEntry};
use crate::error::Result;
use crate::profile::{MacroGoals, UserProfile};
use crate::storage::NutritionStore;

pub struct Session<S: NutritionStore> {
    store: S,
    profile: UserProfile,
    record: DailyRecord,
    day_state: DayState,
}

impl<S: NutritionStore> Session<S> {
    /// Load the profile and today's record from `store`.
    ///
    /// A missing profile is replaced by the default one and saved. If the most
    /// recent stored day is not `today`, a fresh empty record is started and
    /// saved; the older day stays in the store untouched.
    pub fn open(mut store: S, today: DateKey) -> Result<Self> {
        let profile = match store.load_profile()? {
            Some(profile) => profile,
            None => {
                let profile = UserProfile::default();
                store.save_profile(&profile)?;
                profile
            }
        };

        let stored = match store.load_record(today)? {
            Some(record) => Some(record),
            None => store.latest_record()?,
        };
        let previous = stored.as_ref().map(|r| r.date);
        let (record, day_state) = roll_over(stored, today);
        if day_state == DayState::Reset {
            store.save_record(&record)?;
            match previous {
                Some(prev) => tracing::info!(%prev, %today, "started a new day"),
                None => tracing::info!(%today, "started first day"),
            }
        }

        Ok(Self {
            store,
            profile,
            record,
            day_state,
        })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn record(&self) -> &DailyRecord {
        &self.record
    }

    /// How the current record was obtained when the session opened (or last rechecked).
    pub fn day_state(&self) -> DayState {
        self.day_state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Edit the profile; the edit is validated before anything is saved.
    pub fn update_profile<F>(&mut self, edit: F) -> Result<&UserProfile>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut next = self.profile.clone();
        edit(&mut next);
        next.validate()?;
        self.store.save_profile(&next)?;
        self.profile = next;
        Ok(&self.profile)
    }

    /// Compute the suggested goals and overwrite all four stored goal fields.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` for unusable biometrics, or `InvalidGoal` when
    /// the suggestion is not positive; the stored goals are left as they were.
    pub fn apply_suggested_goals(&mut self) -> Result<MacroGoals> {
        checked_daily_calorie_target(&self.profile.biometrics)?;
        let goals = suggest_goals(&self.profile.biometrics);
        goals.validate()?;
        self.update_profile(|p| p.apply_goals(goals))?;
        Ok(goals)
    }

    pub fn log_food(&mut self, entry: NewFoodEntry) -> Result<FoodEntry> {
        let entry = entry.into_entry()?;
        let mut next = self.record.clone();
        next.log_food(entry.clone());
        self.commit(next)?;
        tracing::debug!(id = %entry.id, name = %entry.name, calories = entry.calories, "logged food");
        Ok(entry)
    }

    pub fn add_water(&mut self) -> Result<u32> {
        let mut next = self.record.clone();
        next.add_water();
        self.commit(next)?;
        Ok(self.record.water)
    }

    pub fn remove_water(&mut self) -> Result<u32> {
        let mut next = self.record.clone();
        next.remove_water();
        self.commit(next)?;
        Ok(self.record.water)
    }

    pub fn summary(&self) -> Result<DailySummary> {
        DailySummary::compute(&self.record, &self.profile.goals)
    }

    /// Re-run the roll-over check against a new reference date.
    pub fn recheck_day(&mut self, today: DateKey) -> Result<DayState> {
        if self.record.date == today {
            return Ok(DayState::Active);
        }
        let (record, state) = roll_over(self.store.load_record(today)?, today);
        if state == DayState::Reset {
            self.store.save_record(&record)?;
            tracing::info!(prev = %self.record.date, %today, "started a new day");
        }
        self.record = record;
        self.day_state = state;
        Ok(state)
    }

    fn commit(&mut self, next: DailyRecord) -> Result<()> {
        self.store.save_record(&next)?;
        self.record = next;
        Ok(())
    }
}
