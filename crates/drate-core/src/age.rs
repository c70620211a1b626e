//! Age-based cohort selection.

use drate_model::{Cohort, Individual};

/// Whether the individual's age in `reference_year` lies in `0..=max_age`.
///
/// Individuals without a birth year never qualify.
pub fn has_plausible_age(individual: &Individual, reference_year: i32, max_age: i32) -> bool {
    individual
        .age_in(reference_year)
        .is_some_and(|age| (0..=max_age).contains(&age))
}

/// Keeps only individuals who are exactly `age` years old in `reference_year`.
pub fn filter_by_age(cohort: &Cohort, reference_year: i32, age: i32) -> Cohort {
    let mut filtered = cohort.clone();
    filtered.retain(|person| person.age_in(reference_year) == Some(age));
    filtered
}

/// Drops individuals with a missing birth year or an implausible age.
pub fn filter_plausible_ages(cohort: &Cohort, reference_year: i32, max_age: i32) -> Cohort {
    let mut filtered = cohort.clone();
    filtered.retain(|person| has_plausible_age(person, reference_year, max_age));
    filtered
}

#[cfg(test)]
mod tests {
    use drate_model::{DoseDays, IndividualRecord};

    use super::*;

    fn cohort(birth_years: &[Option<i32>]) -> Cohort {
        Cohort::from_records(birth_years.iter().map(|birth_year| IndividualRecord {
            birth_year: *birth_year,
            death_day: None,
            dose_days: DoseDays::empty(),
        }))
    }

    #[test]
    fn keeps_exact_age_only() {
        let all = cohort(&[Some(1953), Some(1952), None, Some(1953), Some(1954)]);
        let ag70 = filter_by_age(&all, 2023, 70);
        let ids: Vec<u64> = ag70.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![0, 3]);
    }

    #[test]
    fn plausible_age_bounds_are_inclusive() {
        let all = cohort(&[Some(2023), Some(1910), Some(1909), Some(2024), None]);
        let kept = filter_plausible_ages(&all, 2023, 113);
        let ids: Vec<u64> = kept.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn extreme_birth_years_are_filtered_out() {
        let all = cohort(&[Some(i32::MIN), Some(1953), Some(i32::MAX)]);
        let kept = filter_plausible_ages(&all, 2023, 113);
        let ids: Vec<u64> = kept.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(filter_by_age(&all, 2023, 70).len(), 1);
    }
}
