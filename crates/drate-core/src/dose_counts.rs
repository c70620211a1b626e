//! Per-day vaccination counts over the observation window.

use drate_model::{Cohort, DayIndex};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyDoseCounts {
    /// Individuals whose first dose fell on day `i`.
    pub first_doses: Vec<usize>,
    /// Dose events of any slot on day `i`.
    pub all_doses: Vec<usize>,
}

impl DailyDoseCounts {
    /// Number of days covered, starting at day 0.
    pub fn days(&self) -> usize {
        self.first_doses.len()
    }

    /// First day with at least one first dose.
    pub fn vaccination_start_day(&self) -> Option<DayIndex> {
        self.first_doses
            .iter()
            .position(|count| *count > 0)
            .map(|day| day as DayIndex)
    }
}

fn bucket(day: DayIndex, days: usize) -> Option<usize> {
    usize::try_from(day).ok().filter(|index| *index < days)
}

/// Counts doses per day over `0..=end_day`; doses outside that range are ignored.
pub fn daily_dose_counts(cohort: &Cohort, end_day: DayIndex) -> DailyDoseCounts {
    let days = usize::try_from(end_day).map_or(0, |end| end + 1);
    let mut counts = DailyDoseCounts {
        first_doses: vec![0; days],
        all_doses: vec![0; days],
    };
    for person in cohort {
        if let Some(index) = person
            .dose_days
            .first_dose_day()
            .and_then(|day| bucket(day, days))
        {
            counts.first_doses[index] += 1;
        }
        for index in person.dose_days.present().filter_map(|day| bucket(day, days)) {
            counts.all_doses[index] += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use drate_model::{DoseDays, IndividualRecord};

    use super::*;

    fn cohort(doses: &[[Option<DayIndex>; 7]]) -> Cohort {
        Cohort::from_records(doses.iter().map(|slots| IndividualRecord {
            dose_days: DoseDays::new(*slots),
            ..IndividualRecord::default()
        }))
    }

    #[test]
    fn counts_first_and_all_doses() {
        let cohort = cohort(&[
            [Some(2), Some(4), None, None, None, None, None],
            [Some(4), None, None, None, None, None, None],
            [None; 7],
        ]);
        let counts = daily_dose_counts(&cohort, 5);
        assert_eq!(counts.days(), 6);
        assert_eq!(counts.first_doses, vec![0, 0, 1, 0, 1, 0]);
        assert_eq!(counts.all_doses, vec![0, 0, 1, 0, 2, 0]);
        assert_eq!(counts.vaccination_start_day(), Some(2));
    }

    #[test]
    fn out_of_window_doses_are_ignored() {
        let cohort = cohort(&[[Some(-3), Some(9), None, None, None, None, None]]);
        let counts = daily_dose_counts(&cohort, 5);
        assert!(counts.all_doses.iter().all(|count| *count == 0));
        assert_eq!(counts.vaccination_start_day(), None);
    }

    #[test]
    fn negative_end_day_yields_empty_counts() {
        let counts = daily_dose_counts(&Cohort::new(), -1);
        assert_eq!(counts.days(), 0);
    }
}
