//! Instance materialization.
//!
//! A pass reads one snapshot of every task joined with its latest instance,
//! decides per task whether the next instance is due, and writes all new
//! instances as one batch. A pass moves each task at most one recurrence step
//! forward, and an open instance blocks the next one, which together make
//! repeated passes idempotent.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::error::CoreError;
use crate::models::{PlannedInstance, SchedulableTask, ScheduleSummary};
use crate::recurrence::CadenceRegistry;
use crate::repository::Store;

/// Why a task gets no new instance in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The cadence returned the latest date again; the chain has ended.
    Ended,
    /// The next date lies after the pass's `until` date.
    NotDue,
    /// The latest instance has not been completed yet.
    Open,
}

/// Per-task outcome of planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Create(NaiveDate),
    Skip(SkipReason),
}

/// Stateless scheduler over an injected cadence registry.
#[derive(Debug, Clone)]
pub struct Scheduler {
    registry: Arc<CadenceRegistry>,
}

impl Scheduler {
    pub fn new(registry: Arc<CadenceRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CadenceRegistry {
        &self.registry
    }

    /// Decides what a pass bounded by `until` does for a single task.
    ///
    /// Fails only when the stored cadence is not registered.
    pub fn decide(&self, task: &SchedulableTask, until: NaiveDate) -> Result<Decision, CoreError> {
        let rule = self.registry.get(&task.cadence)?;

        let latest = task.latest();
        let candidate = match latest {
            Some((last, _)) => rule.next(last),
            None => task.start_date,
        };

        let decision = match latest {
            Some((last, _)) if candidate == last => Decision::Skip(SkipReason::Ended),
            _ if candidate > until => Decision::Skip(SkipReason::NotDue),
            Some((_, false)) => Decision::Skip(SkipReason::Open),
            _ => Decision::Create(candidate),
        };
        Ok(decision)
    }

    /// Plans the instances a pass bounded by `until` creates for `tasks`.
    pub fn plan(
        &self,
        tasks: &[SchedulableTask],
        until: NaiveDate,
    ) -> Result<Vec<PlannedInstance>, CoreError> {
        let mut planned = Vec::new();

        for task in tasks {
            match self.decide(task, until)? {
                Decision::Create(date) => {
                    trace!(task_id = task.task_id, %date, "instance due");
                    planned.push(PlannedInstance {
                        task_id: task.task_id,
                        task_name: task.name.clone(),
                        date,
                    });
                }
                Decision::Skip(reason) => {
                    trace!(task_id = task.task_id, ?reason, "task skipped");
                }
            }
        }

        Ok(planned)
    }

    /// Runs one scheduling pass against `store`.
    ///
    /// All reads happen before any write. Nothing is written when planning
    /// fails.
    pub async fn run<S>(&self, store: &S, until: NaiveDate) -> Result<ScheduleSummary, CoreError>
    where
        S: Store + ?Sized,
    {
        let snapshot = store.select_schedulable().await?;
        let planned = self.plan(&snapshot, until)?;
        debug!(tasks = snapshot.len(), due = planned.len(), %until, "planned scheduling pass");

        let created = store.insert_instances(&planned).await?;
        if !created.is_empty() {
            info!(created = created.len(), %until, "materialized task instances");
        }

        Ok(ScheduleSummary {
            until,
            tasks_examined: snapshot.len(),
            created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scheduler() -> Scheduler {
        Scheduler::new(Arc::new(CadenceRegistry::with_builtins()))
    }

    fn row(cadence: &str, start: NaiveDate, latest: Option<(NaiveDate, bool)>) -> SchedulableTask {
        SchedulableTask {
            task_id: 1,
            name: "Task".to_string(),
            cadence: cadence.to_string(),
            start_date: start,
            latest_date: latest.map(|(d, _)| d),
            latest_done: latest.map(|(_, done)| done),
        }
    }

    /// Replays passes over an in-memory history of `(date, done)` pairs.
    fn simulate_pass(
        scheduler: &Scheduler,
        cadence: &str,
        start: NaiveDate,
        history: &mut Vec<(NaiveDate, bool)>,
        until: NaiveDate,
    ) -> Decision {
        let latest = history.iter().max_by_key(|(d, _)| *d).copied();
        let decision = scheduler.decide(&row(cadence, start, latest), until).unwrap();
        if let Decision::Create(d) = decision {
            history.push((d, false));
        }
        decision
    }

    mod decide_tests {
        use super::*;

        #[test]
        fn test_first_instance_at_start_date() {
            let s = scheduler();
            let start = date(2016, 11, 3);
            assert_eq!(
                s.decide(&row("daily", start, None), start).unwrap(),
                Decision::Create(start)
            );
        }

        #[test]
        fn test_future_start_is_not_due() {
            let s = scheduler();
            let task = row("weekly", date(2016, 11, 5), None);
            assert_eq!(
                s.decide(&task, date(2016, 11, 4)).unwrap(),
                Decision::Skip(SkipReason::NotDue)
            );
        }

        #[test]
        fn test_open_instance_blocks_next() {
            let s = scheduler();
            let task = row("daily", date(2016, 11, 3), Some((date(2016, 11, 3), false)));
            assert_eq!(
                s.decide(&task, date(2017, 1, 1)).unwrap(),
                Decision::Skip(SkipReason::Open)
            );
        }

        #[test]
        fn test_done_instance_advances_one_step() {
            let s = scheduler();
            let task = row("monthly", date(2016, 11, 4), Some((date(2016, 11, 4), true)));
            assert_eq!(
                s.decide(&task, date(2020, 1, 1)).unwrap(),
                Decision::Create(date(2016, 12, 4))
            );
        }

        #[test]
        fn test_once_task_ends_after_first_instance() {
            let s = scheduler();
            let start = date(2016, 11, 2);
            for done in [false, true] {
                let task = row("once", start, Some((start, done)));
                assert_eq!(
                    s.decide(&task, date(2020, 1, 1)).unwrap(),
                    Decision::Skip(SkipReason::Ended)
                );
            }
        }

        #[test]
        fn test_next_after_until_is_not_due() {
            let s = scheduler();
            let task = row("weekly", date(2016, 11, 5), Some((date(2016, 11, 5), true)));
            assert_eq!(
                s.decide(&task, date(2016, 11, 11)).unwrap(),
                Decision::Skip(SkipReason::NotDue)
            );
            assert_eq!(
                s.decide(&task, date(2016, 11, 12)).unwrap(),
                Decision::Create(date(2016, 11, 12))
            );
        }

        #[test]
        fn test_unknown_stored_cadence_is_an_error() {
            let s = scheduler();
            let task = row("hourly", date(2016, 11, 5), None);
            assert!(matches!(
                s.decide(&task, date(2016, 11, 5)),
                Err(CoreError::UnsupportedCadence(_))
            ));
        }
    }

    mod plan_tests {
        use super::*;

        #[test]
        fn test_plan_only_includes_due_tasks() {
            let s = scheduler();
            let mut coffee = row("daily", date(2016, 11, 3), None);
            coffee.task_id = 1;
            coffee.name = "Make coffee".to_string();
            let mut gas = row("weekly", date(2016, 11, 5), None);
            gas.task_id = 2;
            let mut bills = row("monthly", date(2016, 11, 4), Some((date(2016, 11, 4), false)));
            bills.task_id = 3;

            let planned = s.plan(&[coffee, gas, bills], date(2016, 11, 4)).unwrap();

            assert_eq!(
                planned,
                vec![PlannedInstance {
                    task_id: 1,
                    task_name: "Make coffee".to_string(),
                    date: date(2016, 11, 3),
                }]
            );
        }

        #[test]
        fn test_plan_empty_snapshot() {
            assert!(scheduler().plan(&[], date(2016, 11, 4)).unwrap().is_empty());
        }

        #[test]
        fn test_plan_fails_whole_pass_on_bad_cadence() {
            let s = scheduler();
            let good = row("daily", date(2016, 11, 3), None);
            let bad = row("sometimes", date(2016, 11, 3), None);
            assert!(s.plan(&[good, bad], date(2016, 11, 3)).is_err());
        }
    }

    proptest! {
        #[test]
        fn prop_repeated_passes_create_nothing_new(
            cadence in prop::sample::select(vec!["once", "daily", "weekly", "monthly"]),
            offset in 0i64..400,
            passes in 2usize..6,
        ) {
            let s = scheduler();
            let start = date(2016, 11, 4);
            let until = start + chrono::Duration::days(offset);
            let mut history = Vec::new();

            simulate_pass(&s, cadence, start, &mut history, until);
            let after_first = history.clone();
            for _ in 1..passes {
                simulate_pass(&s, cadence, start, &mut history, until);
            }
            prop_assert_eq!(history, after_first);
        }

        #[test]
        fn prop_catch_up_advances_one_step_per_completion(
            cadence in prop::sample::select(vec!["daily", "weekly", "monthly"]),
            gap_days in 0i64..2000,
        ) {
            let s = scheduler();
            let start = date(2016, 11, 4);
            let until = start + chrono::Duration::days(gap_days);
            let rule = s.registry().get(cadence).unwrap();
            let mut history = Vec::new();

            prop_assert_eq!(
                simulate_pass(&s, cadence, start, &mut history, until),
                Decision::Create(start)
            );

            let mut expected = start;
            loop {
                history.last_mut().unwrap().1 = true;
                let before = history.len();
                let next = rule.next(expected);
                match simulate_pass(&s, cadence, start, &mut history, until) {
                    Decision::Create(d) => {
                        prop_assert_eq!(d, next);
                        prop_assert!(d <= until);
                        prop_assert_eq!(history.len(), before + 1);
                        expected = d;
                    }
                    Decision::Skip(reason) => {
                        prop_assert_eq!(reason, SkipReason::NotDue);
                        prop_assert!(next > until);
                        break;
                    }
                }
            }
        }
    }
}
