//! A cohort is an ordered table of individuals with unique identifiers.

use serde::{Deserialize, Serialize};

use crate::individual::{DayIndex, DoseDays, Individual, IndividualId};

/// Fields of an individual before an identifier has been assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndividualRecord {
    pub birth_year: Option<i32>,
    pub death_day: Option<DayIndex>,
    pub dose_days: DoseDays,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    individuals: Vec<Individual>,
}

impl Cohort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cohort, assigning identifiers `0..n` in source order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = IndividualRecord>,
    {
        let mut cohort = Self::new();
        for record in records {
            cohort.push(record);
        }
        cohort
    }

    /// Append a record and return the identifier it was given.
    pub fn push(&mut self, record: IndividualRecord) -> IndividualId {
        let id = IndividualId::new(self.individuals.len() as u64);
        self.individuals.push(Individual {
            id,
            birth_year: record.birth_year,
            death_day: record.death_day,
            dose_days: record.dose_days,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Number of individuals with an observed death.
    pub fn death_count(&self) -> usize {
        self.individuals.iter().filter(|p| p.is_dead()).count()
    }

    /// Latest observed death day, if anyone died.
    pub fn max_death_day(&self) -> Option<DayIndex> {
        self.individuals.iter().filter_map(|p| p.death_day).max()
    }

    /// Individuals with at least one recorded dose, in source order.
    pub fn donors(&self) -> impl Iterator<Item = &Individual> + '_ {
        self.individuals.iter().filter(|p| p.is_vaccinated())
    }

    /// Keep only the individuals matching `keep`; identifiers are preserved.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Individual) -> bool,
    {
        self.individuals.retain(keep);
    }
}

impl<'a> IntoIterator for &'a Cohort {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(death_day: Option<DayIndex>, first_dose: Option<DayIndex>) -> IndividualRecord {
        let mut slots = [None; crate::individual::DOSE_SLOTS];
        slots[0] = first_dose;
        IndividualRecord {
            birth_year: Some(1953),
            death_day,
            dose_days: DoseDays::new(slots),
        }
    }

    #[test]
    fn identifiers_follow_insertion_order() {
        let cohort = Cohort::from_records(vec![
            record(None, None),
            record(Some(4), Some(1)),
            record(None, Some(2)),
        ]);
        let ids: Vec<u64> = cohort.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(cohort.death_count(), 1);
        assert_eq!(cohort.max_death_day(), Some(4));
        assert_eq!(cohort.donors().count(), 2);
    }

    #[test]
    fn retain_keeps_original_identifiers() {
        let mut cohort = Cohort::from_records(vec![
            record(None, None),
            record(Some(4), None),
            record(None, None),
        ]);
        cohort.retain(|p| !p.is_dead());
        let ids: Vec<u64> = cohort.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn empty_cohort_has_no_deaths() {
        let cohort = Cohort::new();
        assert!(cohort.is_empty());
        assert_eq!(cohort.max_death_day(), None);
    }
}
