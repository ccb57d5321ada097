//! Expansion of a recurring bill into its concrete dated instances.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bill::Bill;
use super::date_math;

const DEFAULT_HORIZON_MONTHS: i32 = 12;
/// Hard guard on instances generated per series, independent of the horizon.
const MAX_GENERATED_INSTANCES: usize = 1024;

/// How a bill repeats after its first due date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RecurrenceRule {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Annually,
    /// Weekday indices, 0 = Sunday .. 6 = Saturday. An empty set yields no
    /// instances beyond the seed.
    SpecificDays(BTreeSet<u8>),
}

impl RecurrenceRule {
    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceRule::None => "Nenhuma",
            RecurrenceRule::Daily => "Diário",
            RecurrenceRule::Weekly => "Semanal",
            RecurrenceRule::Monthly => "Mensal",
            RecurrenceRule::Annually => "Anual",
            RecurrenceRule::SpecificDays(_) => "Dias da semana",
        }
    }
}

/// Supplies identifiers for generated instances. Injectable so tests can pin
/// down deterministic ids.
pub trait IdSource {
    fn next_id(&mut self) -> Uuid;
}

/// Production id source backed by v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Expands a seed bill into the full ordered series up to the horizon.
///
/// The seed is always the first element. Every generated instance copies the
/// seed except for its id, due date, `parent_id` (the seed's id), and
/// `is_paid` (always false). Generated due dates strictly increase, start
/// strictly after the seed's due date, and never exceed the horizon: the
/// explicit `recurrence_end` when present, otherwise twelve calendar months
/// after the seed. An end date on or before the seed's due date yields only
/// the seed.
pub fn expand_series(seed: &Bill, ids: &mut dyn IdSource) -> Vec<Bill> {
    let mut instances = vec![seed.clone()];
    if seed.recurrence == RecurrenceRule::None {
        return instances;
    }
    let horizon = seed
        .recurrence_end
        .unwrap_or_else(|| date_math::add_months(seed.due_date, DEFAULT_HORIZON_MONTHS));

    match &seed.recurrence {
        RecurrenceRule::None => {}
        RecurrenceRule::Daily => {
            step_until_horizon(seed, horizon, ids, &mut instances, |base, n| {
                date_math::add_days(base, n as i64)
            });
        }
        RecurrenceRule::Weekly => {
            step_until_horizon(seed, horizon, ids, &mut instances, |base, n| {
                date_math::add_weeks(base, n as i64)
            });
        }
        RecurrenceRule::Monthly => {
            step_until_horizon(seed, horizon, ids, &mut instances, |base, n| {
                date_math::add_months(base, n)
            });
        }
        RecurrenceRule::Annually => {
            step_until_horizon(seed, horizon, ids, &mut instances, |base, n| {
                date_math::add_years(base, n)
            });
        }
        RecurrenceRule::SpecificDays(weekdays) => {
            if !weekdays.is_empty() {
                let mut cursor = date_math::add_days(seed.due_date, 1);
                while cursor <= horizon && instances.len() <= MAX_GENERATED_INSTANCES {
                    if weekdays.contains(&(cursor.weekday().num_days_from_sunday() as u8)) {
                        instances.push(instance_for(seed, cursor, ids.next_id()));
                    }
                    cursor = date_math::add_days(cursor, 1);
                }
            }
        }
    }

    tracing::debug!(
        series = %seed.id,
        rule = seed.recurrence.label(),
        generated = instances.len() - 1,
        "expanded recurring bill"
    );
    instances
}

/// Emits occurrence `n` as `step(seed_date, n)` rather than stepping the
/// previous cursor. Anchoring every occurrence to the seed keeps month-end
/// clamping local to the short month: Jan 31 yields Feb 29, Mar 31, Apr 30,
/// and a Feb 29 seed regains Feb 29 in later leap years.
fn step_until_horizon(
    seed: &Bill,
    horizon: NaiveDate,
    ids: &mut dyn IdSource,
    out: &mut Vec<Bill>,
    step: impl Fn(NaiveDate, i32) -> NaiveDate,
) {
    let mut occurrence = 1;
    loop {
        let cursor = step(seed.due_date, occurrence);
        if cursor > horizon || out.len() > MAX_GENERATED_INSTANCES {
            break;
        }
        out.push(instance_for(seed, cursor, ids.next_id()));
        occurrence += 1;
    }
}

/// Stamps one generated instance from the seed and a target date. No shared
/// state between instances; each is a detached value.
fn instance_for(seed: &Bill, due_date: NaiveDate, id: Uuid) -> Bill {
    Bill {
        id,
        due_date,
        parent_id: Some(seed.id),
        is_paid: false,
        ..seed.clone()
    }
}
