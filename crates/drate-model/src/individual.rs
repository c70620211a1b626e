//! Individual records and their vaccination day sequences.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer day offset from the configured epoch.
pub type DayIndex = i64;

/// Maximum number of vaccination events recorded per individual.
pub const DOSE_SLOTS: usize = 7;

/// Opaque identity of an individual within one cohort.
///
/// Identifiers are assigned once when a cohort is built and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndividualId(u64);

impl IndividualId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vaccination day offsets, one optional entry per dose slot.
///
/// Gaps are kept as they appear in the source: a populated later slot with an
/// empty earlier slot is not compacted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseDays([Option<DayIndex>; DOSE_SLOTS]);

impl DoseDays {
    pub const fn new(slots: [Option<DayIndex>; DOSE_SLOTS]) -> Self {
        Self(slots)
    }

    /// A sequence with every slot empty.
    pub const fn empty() -> Self {
        Self([None; DOSE_SLOTS])
    }

    pub fn slots(&self) -> &[Option<DayIndex>; DOSE_SLOTS] {
        &self.0
    }

    pub fn get(&self, slot: usize) -> Option<DayIndex> {
        self.0.get(slot).copied().flatten()
    }

    /// Present day offsets in slot order.
    pub fn present(&self) -> impl Iterator<Item = DayIndex> + '_ {
        self.0.iter().filter_map(|slot| *slot)
    }

    pub fn has_any(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }

    pub fn count(&self) -> usize {
        self.present().count()
    }

    /// Latest present dose day. Slot order is not assumed to be sorted.
    pub fn last_dose_day(&self) -> Option<DayIndex> {
        self.present().max()
    }

    /// Earliest present dose day.
    pub fn first_dose_day(&self) -> Option<DayIndex> {
        self.present().min()
    }
}

impl From<[Option<DayIndex>; DOSE_SLOTS]> for DoseDays {
    fn from(slots: [Option<DayIndex>; DOSE_SLOTS]) -> Self {
        Self(slots)
    }
}

/// One person, real or synthetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    pub id: IndividualId,
    /// Missing when the source cell was empty or not an integer.
    pub birth_year: Option<i32>,
    /// `None` means censored: alive at the end of observation.
    pub death_day: Option<DayIndex>,
    pub dose_days: DoseDays,
}

impl Individual {
    pub fn new(id: IndividualId) -> Self {
        Self {
            id,
            birth_year: None,
            death_day: None,
            dose_days: DoseDays::empty(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.death_day.is_some()
    }

    pub fn is_vaccinated(&self) -> bool {
        self.dose_days.has_any()
    }

    /// Age reached in `reference_year`; `None` when unknown or not representable.
    pub fn age_in(&self, reference_year: i32) -> Option<i32> {
        self.birth_year
            .and_then(|year| reference_year.checked_sub(year))
    }

    /// Whether the individual could have lived to receive a dose on `day`.
    ///
    /// Survivors always qualify. A death on the same day does not.
    pub fn survives_past(&self, day: DayIndex) -> bool {
        match self.death_day {
            None => true,
            Some(death_day) => death_day > day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_and_first_dose_ignore_gaps() {
        let doses = DoseDays::new([None, Some(40), None, Some(12), None, None, Some(90)]);
        assert_eq!(doses.last_dose_day(), Some(90));
        assert_eq!(doses.first_dose_day(), Some(12));
        assert_eq!(doses.count(), 3);
        assert_eq!(doses.get(1), Some(40));
        assert_eq!(doses.get(0), None);
        assert_eq!(doses.get(DOSE_SLOTS), None);
    }

    #[test]
    fn empty_sequence_has_no_last_dose() {
        let doses = DoseDays::empty();
        assert!(!doses.has_any());
        assert_eq!(doses.last_dose_day(), None);
    }

    #[test]
    fn survival_check_is_strict() {
        let mut person = Individual::new(IndividualId::new(3));
        assert!(person.survives_past(10_000));
        person.death_day = Some(12);
        assert!(person.survives_past(11));
        assert!(!person.survives_past(12));
        assert!(!person.survives_past(13));
    }

    #[test]
    fn age_uses_reference_year() {
        let mut person = Individual::new(IndividualId::new(0));
        assert_eq!(person.age_in(2023), None);
        person.birth_year = Some(1953);
        assert_eq!(person.age_in(2023), Some(70));
    }

    #[test]
    fn extreme_birth_year_has_no_age() {
        let mut person = Individual::new(IndividualId::new(0));
        person.birth_year = Some(i32::MIN);
        assert_eq!(person.age_in(2023), None);
        person.birth_year = Some(i32::MAX);
        assert_eq!(person.age_in(-2), None);
    }
}
