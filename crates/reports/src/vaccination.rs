use chrono::{Duration, NaiveDateTime, NaiveTime};
use model::vaccination::VaccinationRecord;
use timewindow::{hours_between, SortableDate};

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eta {
    At(NaiveDateTime),
    /// No progress in the rate window, the checkpoint is never reached.
    Never,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointEta {
    pub checkpoint: f64,
    pub eta: Eta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub shots: u64,
    pub coverage: f64,
    pub rate_per_hour: f64,
    /// Unreached checkpoints, ascending.
    pub checkpoints: Vec<CheckpointEta>,
}

/// Projects when `target * checkpoint` shots are reached at the current pace.
///
/// The pace is measured from `baseline` when it is newer than `start_date` and
/// falls on a day before `now`, otherwise from `start_date` with zero shots. Both ends of the rate window and
/// the projection origin are pinned to `pinned_hour` of their day.
pub fn project_checkpoints(
    current: &VaccinationRecord,
    baseline: Option<&VaccinationRecord>,
    start_date: SortableDate,
    target: u64,
    checkpoints: &[f64],
    now: NaiveDateTime,
    pinned_hour: u32,
) -> Projection {
    let (anchor, gained) = match baseline {
        Some(baseline) if baseline.date > start_date && baseline.date.date() < now.date() => (
            baseline.date.date(),
            current.shots.saturating_sub(baseline.shots),
        ),
        _ => (start_date.date(), current.shots),
    };
    let hours = hours_between(anchor, now.date(), pinned_hour);
    let rate_per_hour = if hours > 0.0 {
        gained as f64 / hours
    } else {
        0.0
    };

    let coverage = if target == 0 {
        1.0
    } else {
        current.shots as f64 / target as f64
    };

    let mut fractions: Vec<f64> = checkpoints.to_vec();
    if let Some(next) = next_round_checkpoint(coverage) {
        if !fractions.iter().any(|f| (f - next).abs() < EPSILON) {
            fractions.push(next);
        }
    }
    fractions.sort_by(|a, b| a.total_cmp(b));
    fractions.dedup_by(|a, b| (*a - *b).abs() < EPSILON);

    let origin = now.date().and_time(
        NaiveTime::from_hms_opt(pinned_hour, 0, 0).unwrap_or(NaiveTime::MIN),
    );
    let checkpoints = fractions
        .into_iter()
        .filter(|fraction| target as f64 * fraction > current.shots as f64)
        .map(|checkpoint| {
            let missing = target as f64 * checkpoint - current.shots as f64;
            CheckpointEta {
                checkpoint,
                eta: eta(origin, missing, rate_per_hour),
            }
        })
        .collect();

    Projection {
        shots: current.shots,
        coverage,
        rate_per_hour,
        checkpoints,
    }
}

/// Next whole ten percent above `coverage`, if any is left.
pub fn next_round_checkpoint(coverage: f64) -> Option<f64> {
    let next = ((coverage * 10.0 + EPSILON).floor() + 1.0) / 10.0;
    if next > 1.0 + EPSILON {
        None
    } else {
        Some(next)
    }
}

fn eta(origin: NaiveDateTime, missing: f64, rate_per_hour: f64) -> Eta {
    if rate_per_hour <= 0.0 {
        return Eta::Never;
    }
    let minutes = (missing / rate_per_hour * 60.0).round();
    if !minutes.is_finite() || minutes > i64::MAX as f64 {
        return Eta::Never;
    }
    Duration::try_minutes(minutes as i64)
        .and_then(|needed| origin.checked_add_signed(needed))
        .map_or(Eta::Never, Eta::At)
}
