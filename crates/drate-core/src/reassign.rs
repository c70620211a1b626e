//! Constrained dose-pattern reassignment.
//!
//! Each real individual's complete dose sequence (a donor) is transplanted
//! intact onto one synthetic individual (a recipient). A recipient qualifies
//! only if, in the synthetic world, they were still alive after the donor's
//! last dose. Recipients are searched by random sampling without replacement
//! from the still-unassigned pool, at most `retries` candidates per donor;
//! a donor with no qualifying candidate among those draws is skipped.
//!
//! Donors are processed in source order, so earlier donors see a larger pool
//! than later ones.

use std::collections::HashMap;

use rand::Rng;
use tracing::{debug, trace};

use drate_model::{Cohort, DayIndex, DoseDays, Individual, IndividualId, ReassignmentSummary};

use crate::report::Reporter;

/// A real individual's dose sequence, eligible for transplanting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DonorSequence {
    pub donor: IndividualId,
    pub dose_days: DoseDays,
    /// Latest present dose day; intermediate doses are not checked.
    pub last_dose_day: DayIndex,
}

impl DonorSequence {
    /// `None` when the individual has no dose at all.
    pub fn from_individual(individual: &Individual) -> Option<Self> {
        let last_dose_day = individual.dose_days.last_dose_day()?;
        Some(Self {
            donor: individual.id,
            dose_days: individual.dose_days,
            last_dose_day,
        })
    }
}

/// Donor sequences of a cohort in source order; undosed individuals are left out.
pub fn eligible_donors(cohort: &Cohort) -> Vec<DonorSequence> {
    cohort
        .iter()
        .filter_map(DonorSequence::from_individual)
        .collect()
}

/// One successful transplant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub donor: IndividualId,
    pub recipient: IndividualId,
    pub last_dose_day: DayIndex,
    pub dose_days: DoseDays,
}

/// Result of placing a single donor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Position of the chosen recipient in the recipient slice.
    Assigned(usize),
    /// Every recipient was already assigned.
    PoolExhausted,
    /// No candidate among the drawn trial pool survived past the last dose.
    NoCandidate,
}

/// The set of recipients that have not received a dose sequence yet.
#[derive(Debug, Clone)]
pub struct UnassignedPool {
    unassigned: Vec<usize>,
    assigned: Vec<bool>,
}

impl UnassignedPool {
    pub fn new(size: usize) -> Self {
        Self {
            unassigned: (0..size).collect(),
            assigned: vec![false; size],
        }
    }

    pub fn len(&self) -> usize {
        self.unassigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unassigned.is_empty()
    }

    pub fn is_assigned(&self, index: usize) -> bool {
        self.assigned.get(index).copied().unwrap_or(false)
    }

    /// Unassigned positions, in no particular order.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Tries to find a recipient for a donor whose last dose is `last_dose_day`.
    ///
    /// Draws up to `min(retries, len)` distinct candidates uniformly at random
    /// (incremental Fisher-Yates) and takes the first one that survives past
    /// the last dose. The trial pool is never widened beyond `retries`, even if
    /// a qualifying recipient exists elsewhere in the pool.
    ///
    /// `recipients` must be the slice this pool was created for.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        recipients: &[Individual],
        last_dose_day: DayIndex,
        retries: usize,
        rng: &mut R,
    ) -> Placement {
        debug_assert_eq!(recipients.len(), self.assigned.len());
        if self.unassigned.is_empty() {
            return Placement::PoolExhausted;
        }
        let draws = retries.min(self.unassigned.len());
        for drawn in 0..draws {
            let pick = rng.random_range(drawn..self.unassigned.len());
            self.unassigned.swap(drawn, pick);
            let candidate = self.unassigned[drawn];
            if recipients[candidate].survives_past(last_dose_day) {
                self.unassigned.swap_remove(drawn);
                self.assigned[candidate] = true;
                return Placement::Assigned(candidate);
            }
        }
        Placement::NoCandidate
    }
}

/// Everything the engine produced for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReassignmentOutcome {
    pub summary: ReassignmentSummary,
    /// Successful transplants in donor order.
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReassignmentEngine {
    retries: usize,
}

impl Default for ReassignmentEngine {
    fn default() -> Self {
        Self::new(drate_model::DEFAULT_RETRIES)
    }
}

impl ReassignmentEngine {
    pub fn new(retries: usize) -> Self {
        Self { retries }
    }

    pub fn retries(&self) -> usize {
        self.retries
    }

    /// Matches donors to recipients without modifying either.
    ///
    /// Assignment and skip counts are written to `reporter` once all donors
    /// have been processed.
    pub fn run<R: Rng + ?Sized>(
        &self,
        recipients: &Cohort,
        donors: &[DonorSequence],
        rng: &mut R,
        reporter: &mut dyn Reporter,
    ) -> ReassignmentOutcome {
        let people = recipients.individuals();
        let mut pool = UnassignedPool::new(people.len());
        let mut outcome = ReassignmentOutcome {
            summary: ReassignmentSummary {
                eligible_donors: donors.len(),
                ..ReassignmentSummary::default()
            },
            assignments: Vec::new(),
        };

        for donor in donors {
            match pool.place(people, donor.last_dose_day, self.retries, rng) {
                Placement::Assigned(index) => {
                    let recipient = people[index].id;
                    trace!(
                        donor = %donor.donor,
                        recipient = %recipient,
                        last_dose_day = donor.last_dose_day,
                        "assigned dose sequence"
                    );
                    outcome.summary.assigned += 1;
                    outcome.assignments.push(Assignment {
                        donor: donor.donor,
                        recipient,
                        last_dose_day: donor.last_dose_day,
                        dose_days: donor.dose_days,
                    });
                }
                Placement::PoolExhausted => {
                    trace!(donor = %donor.donor, "skipped donor: pool exhausted");
                    outcome.summary.skipped_pool_exhausted += 1;
                }
                Placement::NoCandidate => {
                    trace!(
                        donor = %donor.donor,
                        last_dose_day = donor.last_dose_day,
                        "skipped donor: no surviving candidate"
                    );
                    outcome.summary.skipped_no_candidate += 1;
                }
            }
        }

        debug!(
            eligible_donors = outcome.summary.eligible_donors,
            assigned = outcome.summary.assigned,
            skipped_pool_exhausted = outcome.summary.skipped_pool_exhausted,
            skipped_no_candidate = outcome.summary.skipped_no_candidate,
            "reassignment complete"
        );
        reporter.record(&format!(
            "Assigned {} doses, Skipped {}",
            outcome.summary.assigned,
            outcome.summary.skipped()
        ));
        outcome
    }
}

/// Writes each assigned dose sequence onto its recipient.
///
/// Returns the number of sequences written. Assignments whose recipient is not
/// part of `cohort` are ignored.
pub fn apply_assignments(cohort: &mut Cohort, assignments: &[Assignment]) -> usize {
    let positions: HashMap<IndividualId, usize> = cohort
        .iter()
        .enumerate()
        .map(|(index, person)| (person.id, index))
        .collect();
    let people = cohort.individuals_mut();
    let mut applied = 0;
    for assignment in assignments {
        if let Some(&index) = positions.get(&assignment.recipient) {
            people[index].dose_days = assignment.dose_days;
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use drate_model::IndividualRecord;

    use super::*;

    fn recipients(death_days: &[Option<DayIndex>]) -> Cohort {
        Cohort::from_records(death_days.iter().map(|death_day| IndividualRecord {
            birth_year: Some(1953),
            death_day: *death_day,
            dose_days: DoseDays::empty(),
        }))
    }

    fn donor(id: u64, last: DayIndex) -> DonorSequence {
        DonorSequence {
            donor: IndividualId::new(id),
            dose_days: DoseDays::new([Some(1), Some(last), None, None, None, None, None]),
            last_dose_day: last,
        }
    }

    #[test]
    fn picks_only_candidates_that_outlive_last_dose() {
        let cohort = recipients(&[None, Some(10), None, Some(5), Some(20)]);
        for seed in 0..200 {
            let mut pool = UnassignedPool::new(cohort.len());
            let mut rng = StdRng::seed_from_u64(seed);
            let placement = pool.place(cohort.individuals(), 12, 10_000, &mut rng);
            match placement {
                Placement::Assigned(index) => assert!([0, 2, 4].contains(&index)),
                other => panic!("expected an assignment, got {other:?}"),
            }
        }
    }

    #[test]
    fn death_on_last_dose_day_does_not_qualify() {
        let cohort = recipients(&[Some(12), Some(12)]);
        let mut pool = UnassignedPool::new(cohort.len());
        let placement = pool.place(cohort.individuals(), 12, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(placement, Placement::NoCandidate);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn empty_pool_skips_without_touching_state() {
        let cohort = recipients(&[]);
        let mut pool = UnassignedPool::new(0);
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(
            pool.place(cohort.individuals(), 0, 10, &mut rng),
            Placement::PoolExhausted
        );
        assert!(pool.is_empty());
    }

    #[test]
    fn zero_retries_skips_even_when_candidates_exist() {
        let cohort = recipients(&[None, None, None]);
        let mut pool = UnassignedPool::new(cohort.len());
        let placement = pool.place(cohort.individuals(), 0, 0, &mut StdRng::seed_from_u64(3));
        assert_eq!(placement, Placement::NoCandidate);
        let mut left = pool.unassigned().to_vec();
        left.sort_unstable();
        assert_eq!(left, vec![0, 1, 2]);
    }

    #[test]
    fn truncated_trial_pool_can_miss_the_only_survivor() {
        // One survivor among many early deaths: with a single draw per donor
        // some seeds must miss it.
        let mut deaths = vec![Some(1); 99];
        deaths.push(None);
        let cohort = recipients(&deaths);
        let skipped = (0..50)
            .filter(|seed| {
                let mut pool = UnassignedPool::new(cohort.len());
                let placement =
                    pool.place(cohort.individuals(), 50, 1, &mut StdRng::seed_from_u64(*seed));
                placement == Placement::NoCandidate
            })
            .count();
        assert!(skipped > 0);
    }

    #[test]
    fn exhausted_pool_counts_remaining_donors_as_skipped() {
        let cohort = recipients(&[None, None]);
        let donors: Vec<DonorSequence> = (0..5).map(|id| donor(id, 30)).collect();
        let mut lines: Vec<String> = Vec::new();
        let outcome = ReassignmentEngine::new(100).run(
            &cohort,
            &donors,
            &mut StdRng::seed_from_u64(42),
            &mut lines,
        );
        assert_eq!(outcome.summary.assigned, 2);
        assert_eq!(outcome.summary.skipped_pool_exhausted, 3);
        assert_eq!(outcome.summary.skipped_no_candidate, 0);
        assert_eq!(lines, vec!["Assigned 2 doses, Skipped 3".to_string()]);
    }

    #[test]
    fn run_is_reproducible_for_a_seed() {
        let cohort = recipients(&[None, Some(40), None, Some(5), Some(90), None, Some(60)]);
        let donors: Vec<DonorSequence> = (0..5).map(|id| donor(id, 10 * id as i64)).collect();
        let engine = ReassignmentEngine::default();
        let first = engine.run(&cohort, &donors, &mut StdRng::seed_from_u64(42), &mut Vec::<String>::new());
        let second = engine.run(&cohort, &donors, &mut StdRng::seed_from_u64(42), &mut Vec::<String>::new());
        assert_eq!(first, second);
    }

    #[test]
    fn undosed_individuals_are_not_donors() {
        let cohort = Cohort::from_records(vec![
            IndividualRecord::default(),
            IndividualRecord {
                dose_days: DoseDays::new([None, None, Some(200), None, None, None, Some(150)]),
                ..IndividualRecord::default()
            },
        ]);
        let donors = eligible_donors(&cohort);
        assert_eq!(donors.len(), 1);
        assert_eq!(donors[0].donor, IndividualId::new(1));
        assert_eq!(donors[0].last_dose_day, 200);
    }

    #[test]
    fn apply_copies_whole_sequence_with_gaps() {
        let mut cohort = recipients(&[None, None]);
        let doses = DoseDays::new([None, Some(4), None, Some(9), None, None, None]);
        let applied = apply_assignments(
            &mut cohort,
            &[Assignment {
                donor: IndividualId::new(77),
                recipient: IndividualId::new(1),
                last_dose_day: 9,
                dose_days: doses,
            }],
        );
        assert_eq!(applied, 1);
        assert_eq!(cohort.get(1).unwrap().dose_days, doses);
        assert!(!cohort.get(0).unwrap().is_vaccinated());
    }
}
