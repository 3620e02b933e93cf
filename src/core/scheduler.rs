//! Rotation scheduling: spread password changes over the reset period.
//!
//! Each credential starts on the day it would reach the reset period (see
//! [`target_day`]). Days are then processed in increasing order:
//!
//! 1. Overflow above the daily limit moves to the least-loaded earlier day
//!    that still has room.
//! 2. If the day is still overfull, or credentials are waiting from an
//!    earlier day, the day is emptied onto the carry-over queue and refilled
//!    from its head, so the longest-waiting credentials are placed first.
//! 3. While the day is more than one above the least-loaded earlier day,
//!    credentials move there.
//! 4. A day left below the limit becomes available to later days.
//!
//! Credentials only ever move to earlier days, except through the
//! carry-over queue when every earlier day is full.

use crate::core::carry_over::CarryOverQueue;
use crate::core::day_buckets::DayBuckets;
use crate::core::error::ScheduleError;
use crate::core::occupancy_heap::{DayLoad, OccupancyHeap};
use crate::core::target_day::target_day;
use crate::models::credential::CredentialAge;
use crate::models::schedule::Schedule;
use crate::models::schedule_settings::ScheduleSection;
use std::cmp::Reverse;
use tracing::debug;

/// Compute a rotation schedule for `credentials`.
///
/// Input order does not matter: credentials are ordered by age (oldest
/// first) and then identifier before placement.
pub fn schedule(
    credentials: &[CredentialAge],
    settings: &ScheduleSection,
) -> Result<Schedule, ScheduleError> {
    let mut scheduler = Scheduler::new(settings)?;
    scheduler.load(credentials)?;
    scheduler.redistribute();
    scheduler.finish()
}

/// State for one scheduling run.
#[derive(Debug)]
pub struct Scheduler {
    settings: ScheduleSection,
    max_per_day: usize,
    buckets: DayBuckets,
    open_days: OccupancyHeap,
    carry_over: CarryOverQueue,
}

impl Scheduler {
    pub fn new(settings: &ScheduleSection) -> Result<Self, ScheduleError> {
        if settings.reset_period == 0 {
            return Err(ScheduleError::InvalidResetPeriod);
        }
        if settings.max_changes_per_day == 0 {
            return Err(ScheduleError::InvalidMaxChanges);
        }
        Ok(Self {
            settings: *settings,
            max_per_day: settings.max_changes_per_day as usize,
            buckets: DayBuckets::new(settings.reset_period as usize),
            open_days: OccupancyHeap::new(),
            carry_over: CarryOverQueue::new(),
        })
    }

    /// Validate `credentials` and place each on its target day.
    ///
    /// Nothing is placed unless the whole input is valid and fits within
    /// `reset_period * max_changes_per_day`.
    pub fn load(&mut self, credentials: &[CredentialAge]) -> Result<(), ScheduleError> {
        for (index, cred) in credentials.iter().enumerate() {
            if cred.id.is_empty() {
                return Err(ScheduleError::EmptyIdentifier { index });
            }
            if cred.age_days < 0 {
                return Err(ScheduleError::NegativeAge {
                    id: cred.id.clone(),
                    age_days: cred.age_days,
                });
            }
        }

        let capacity = self.settings.capacity();
        let required = (self.buckets.total() + credentials.len()) as u64;
        if required > capacity {
            return Err(ScheduleError::Infeasible {
                credentials: required as usize,
                capacity,
                reset_period: self.settings.reset_period,
                max_changes_per_day: self.settings.max_changes_per_day,
            });
        }

        let mut ordered: Vec<&CredentialAge> = credentials.iter().collect();
        ordered.sort_by(|a, b| {
            (Reverse(a.age_days), &a.id).cmp(&(Reverse(b.age_days), &b.id))
        });
        for cred in ordered {
            let day = target_day(cred.age_days, self.settings.reset_period);
            self.buckets.push(day, cred.id.clone());
        }
        Ok(())
    }

    /// Run the day-by-day redistribution pass over the whole horizon.
    pub fn redistribute(&mut self) {
        for day in 0..self.buckets.days() {
            self.redistribute_day(day);
        }
        debug!(
            credentials = self.buckets.total(),
            reset_period = self.settings.reset_period,
            max_per_day = self.max_per_day,
            carried_over = self.carry_over.len(),
            "redistribution complete"
        );
    }

    fn redistribute_day(&mut self, day: usize) {
        while self.buckets.len(day) > self.max_per_day {
            let Some(open) = self.open_days.pop() else {
                break;
            };
            self.move_to_open_day(day, open.day);
        }

        if self.buckets.len(day) > self.max_per_day || !self.carry_over.is_empty() {
            let evicted = self.buckets.take(day);
            self.carry_over.extend(evicted);
            while self.buckets.len(day) < self.max_per_day {
                match self.carry_over.dequeue() {
                    Some(id) => self.buckets.push(day, id),
                    None => break,
                }
            }
        }

        while let Some(&open) = self.open_days.peek() {
            if self.buckets.len(day) <= open.load + 1 {
                break;
            }
            self.open_days.pop();
            self.move_to_open_day(day, open.day);
        }

        let load = self.buckets.len(day);
        if load < self.max_per_day {
            self.open_days.push(DayLoad { day, load });
        }
    }

    // `to` must already have been popped from the heap.
    fn move_to_open_day(&mut self, from: usize, to: usize) {
        self.buckets.move_last(from, to);
        let load = self.buckets.len(to);
        if load < self.max_per_day {
            self.open_days.push(DayLoad { day: to, load });
        }
    }

    /// Emit the schedule, failing if any credential is still waiting.
    pub fn finish(self) -> Result<Schedule, ScheduleError> {
        if !self.carry_over.is_empty() {
            return Err(ScheduleError::UnplacedCredentials {
                remaining: self.carry_over.into_remaining(),
            });
        }
        Ok(Schedule {
            reset_period: self.settings.reset_period,
            max_changes_per_day: self.settings.max_changes_per_day,
            days: self.buckets.into_blocks(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(reset_period: u32, max_changes_per_day: u32) -> ScheduleSection {
        ScheduleSection {
            reset_period,
            max_changes_per_day,
        }
    }

    fn creds(pairs: &[(&str, i64)]) -> Vec<CredentialAge> {
        pairs.iter().map(|(id, age)| CredentialAge::new(*id, *age)).collect()
    }

    #[test]
    fn test_expired_credential_due_today() {
        let s = schedule(&creds(&[("old", 380)]), &settings(365, 5)).unwrap();
        assert_eq!(s.due_today(), ["old"]);
        assert_eq!(s.days.len(), 1);
    }

    #[test]
    fn test_uncontended_credential_keeps_target_day() {
        let s = schedule(&creds(&[("mid", 150)]), &settings(365, 5)).unwrap();
        assert_eq!(s.day_of("mid"), Some(215));
        assert!(s.due_today().is_empty());
    }

    #[test]
    fn test_overfull_day_zero_spills_forward() {
        let input = creds(&[("a", 10), ("b", 10), ("c", 10), ("d", 10), ("e", 10)]);
        let s = schedule(&input, &settings(10, 2)).unwrap();
        let loads: Vec<usize> = s.days.iter().map(|b| b.credentials.len()).collect();
        assert_eq!(s.days.iter().map(|b| b.day).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(loads, vec![2, 2, 1]);
        assert_eq!(s.days[0].credentials, vec!["a", "b"]);
        assert_eq!(s.days[1].credentials, vec!["c", "d"]);
        assert_eq!(s.days[2].credentials, vec!["e"]);
    }

    #[test]
    fn test_infeasible_rejected_before_scheduling() {
        let input = creds(&[("a", 5), ("b", 5), ("c", 5), ("d", 5), ("e", 5), ("f", 5)]);
        let err = schedule(&input, &settings(5, 1)).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::Infeasible {
                credentials: 6,
                capacity: 5,
                reset_period: 5,
                max_changes_per_day: 1,
            }
        );
    }

    #[test]
    fn test_exact_capacity_is_feasible() {
        let input = creds(&[("a", 5), ("b", 5), ("c", 5), ("d", 5), ("e", 5)]);
        let s = schedule(&input, &settings(5, 1)).unwrap();
        assert_eq!(s.total(), 5);
        assert_eq!(s.peak(), 1);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            schedule(&[], &settings(0, 5)).unwrap_err(),
            ScheduleError::InvalidResetPeriod
        );
        assert_eq!(
            schedule(&[], &settings(365, 0)).unwrap_err(),
            ScheduleError::InvalidMaxChanges
        );
    }

    #[test]
    fn test_invalid_records() {
        let err = schedule(&creds(&[("ok", 3), ("", 4)]), &settings(10, 1)).unwrap_err();
        assert_eq!(err, ScheduleError::EmptyIdentifier { index: 1 });

        let err = schedule(&creds(&[("future", -2)]), &settings(10, 1)).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NegativeAge {
                id: "future".into(),
                age_days: -2
            }
        );
    }

    #[test]
    fn test_empty_input_gives_empty_schedule() {
        let s = schedule(&[], &settings(365, 5)).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.total(), 0);
    }

    #[test]
    fn test_fresh_credential_lands_on_last_day() {
        let s = schedule(&creds(&[("new", 0)]), &settings(30, 5)).unwrap();
        assert_eq!(s.day_of("new"), Some(29));
    }

    #[test]
    fn test_overflow_moves_to_earlier_days() {
        // Ten credentials all due on the last day of a ten-day horizon end up
        // one per day.
        let input: Vec<CredentialAge> = (0..10)
            .map(|i| CredentialAge::new(format!("c{}", i), 1))
            .collect();
        let s = schedule(&input, &settings(10, 5)).unwrap();
        assert_eq!(s.loads(), vec![1; 10]);
    }

    #[test]
    fn test_pair_on_same_day_is_split() {
        let s = schedule(&creds(&[("a", 5), ("b", 5)]), &settings(10, 5)).unwrap();
        assert_eq!(s.day_of("a"), Some(5));
        assert_eq!(s.day_of("b"), Some(0));
    }

    #[test]
    fn test_most_expired_placed_first() {
        let input = creds(&[("c", 3), ("a", 5), ("b", 4)]);
        let s = schedule(&input, &settings(3, 1)).unwrap();
        assert_eq!(s.day_of("a"), Some(0));
        assert_eq!(s.day_of("b"), Some(1));
        assert_eq!(s.day_of("c"), Some(2));
    }

    #[test]
    fn test_residue_placed_ahead_of_later_bucket() {
        let input = creds(&[("x1", 10), ("x2", 10), ("x3", 10), ("y", 3), ("z", 3)]);
        let s = schedule(&input, &settings(4, 2)).unwrap();
        assert_eq!(s.day(0).unwrap().credentials, vec!["x1", "x2"]);
        assert_eq!(s.day(1).unwrap().credentials, vec!["x3", "y"]);
        assert_eq!(s.day(2).unwrap().credentials, vec!["z"]);
        assert!(s.day(3).is_none());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = creds(&[("a", 100), ("b", 100), ("c", 20), ("d", 400), ("e", 0)]);
        let mut reversed = forward.clone();
        reversed.reverse();
        let cfg = settings(30, 1);
        assert_eq!(schedule(&forward, &cfg).unwrap(), schedule(&reversed, &cfg).unwrap());
    }

    #[test]
    fn test_duplicate_identifiers_are_both_scheduled() {
        let s = schedule(&creds(&[("dup", 40), ("dup", 40)]), &settings(30, 1)).unwrap();
        assert_eq!(s.total(), 2);
        assert_eq!(s.peak(), 1);
    }

    #[test]
    fn test_finish_reports_residue() {
        let mut scheduler = Scheduler::new(&settings(2, 1)).unwrap();
        scheduler.carry_over.extend(vec!["stuck".to_string()]);
        let err = scheduler.finish().unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnplacedCredentials {
                remaining: vec!["stuck".into()]
            }
        );
    }

    #[test]
    fn test_uniform_ages_fill_within_limit() {
        let input: Vec<CredentialAge> = (0..1800)
            .map(|i| CredentialAge::new(format!("cred-{:04}", i), (i % 365) as i64))
            .collect();
        let s = schedule(&input, &settings(365, 5)).unwrap();
        assert_eq!(s.total(), 1800);
        assert!(s.peak() <= 5);
        assert!(s.days.iter().all(|b| b.day < 365));
    }
}
