//! Day counter and the daily food requirement.
//!
//! The clock is the single source of truth for the current day. Days start
//! at 1 and advance once per resolved turn. After every turn the food
//! requirement for the next one is drawn:
//!
//! ```text
//! rand_day         = uniform integer in [1, day]
//! food_requirement = ceil(rand_day ^ log10(day) / rand_day)
//! ```
//!
//! On day 1 the exponent is zero, so the requirement is always exactly 1.

use rand::Rng;

/// First day of every game.
pub const FIRST_DAY: u64 = 1;

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u64::MAX")]
    DayOverflow,

    /// The food requirement formula produced a value outside `i64`.
    #[error("food requirement out of range on day {day} (rand_day {rand_day})")]
    RequirementOutOfRange {
        /// The day the requirement was computed for.
        day: u64,
        /// The drawn day.
        rand_day: u64,
    },
}

/// Game clock counting resolved turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClock {
    day: u64,
}

impl DayClock {
    /// A clock on [`FIRST_DAY`].
    pub const fn new() -> Self {
        Self { day: FIRST_DAY }
    }

    /// The current day.
    pub const fn day(&self) -> u64 {
        self.day
    }

    /// Move to the next day. Returns the new day.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::DayOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.day = self.day.checked_add(1).ok_or(ClockError::DayOverflow)?;
        Ok(self.day)
    }

    /// Draw the food requirement for the turn following the current day.
    pub fn draw_food_requirement<R: Rng>(&self, rng: &mut R) -> Result<i64, ClockError> {
        let rand_day = rng.random_range(FIRST_DAY..=self.day.max(FIRST_DAY));
        food_requirement(self.day, rand_day)
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new()
    }
}

/// `ceil(rand_day ^ log10(day) / rand_day)`.
///
/// # Errors
///
/// Returns [`ClockError::RequirementOutOfRange`] if the result is not a
/// finite value representable as `i64`.
pub fn food_requirement(day: u64, rand_day: u64) -> Result<i64, ClockError> {
    let out_of_range = || ClockError::RequirementOutOfRange { day, rand_day };

    #[allow(clippy::cast_precision_loss)]
    let (day_f, rand_f) = (day.max(FIRST_DAY) as f64, rand_day.max(FIRST_DAY) as f64);

    let value = (rand_f.powf(day_f.log10()) / rand_f).ceil();
    if !value.is_finite() || value < 0.0 || value >= 9.0e18 {
        return Err(out_of_range());
    }

    #[allow(clippy::cast_possible_truncation)]
    let requirement = value as i64;
    Ok(requirement)
}
