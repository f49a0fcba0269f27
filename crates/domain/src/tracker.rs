use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Returns the half-open UTC day interval `[start-of-day(now), start-of-day(now) + 1 day)`
/// containing the given timestamp in millis.
pub fn day_bounds(now: i64) -> (i64, i64) {
    let day_start = now - now.rem_euclid(DAY_MILLIS);
    (day_start, day_start + DAY_MILLIS)
}

/// One of the four fixed reminder checkpoints after an order
/// entered the nurture sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum ReminderStage {
    Day3,
    Day7,
    Day14,
    Day30,
}

#[derive(Error, Debug)]
pub enum InvalidStageError {
    #[error("{0} is not a valid reminder stage, expected one of 3, 7, 14 or 30")]
    UnknownStage(u32),
}

impl ReminderStage {
    /// All stages in chronological order
    pub const ALL: [ReminderStage; 4] = [
        ReminderStage::Day3,
        ReminderStage::Day7,
        ReminderStage::Day14,
        ReminderStage::Day30,
    ];

    /// Stages in the order the batch runner evaluates them. Latest first, so
    /// that a tracker with several stages coincidentally due on the same day
    /// only gets the most recent one.
    pub const SEND_ORDER: [ReminderStage; 4] = [
        ReminderStage::Day30,
        ReminderStage::Day14,
        ReminderStage::Day7,
        ReminderStage::Day3,
    ];

    pub fn day(&self) -> u32 {
        match self {
            ReminderStage::Day3 => 3,
            ReminderStage::Day7 => 7,
            ReminderStage::Day14 => 14,
            ReminderStage::Day30 => 30,
        }
    }

    /// Millis between the submission timestamp and this stage's due timestamp
    pub fn offset_millis(&self) -> i64 {
        self.day() as i64 * DAY_MILLIS
    }
}

impl From<ReminderStage> for u32 {
    fn from(stage: ReminderStage) -> Self {
        stage.day()
    }
}

impl TryFrom<u32> for ReminderStage {
    type Error = InvalidStageError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        match day {
            3 => Ok(ReminderStage::Day3),
            7 => Ok(ReminderStage::Day7),
            14 => Ok(ReminderStage::Day14),
            30 => Ok(ReminderStage::Day30),
            _ => Err(InvalidStageError::UnknownStage(day)),
        }
    }
}

impl std::fmt::Display for ReminderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "day{}", self.day())
    }
}

/// Per-stage outcome of the reminder sequence. The due timestamp is computed
/// once when the tracker is created and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    pub due_at: i64,
    pub sent: bool,
    pub sent_at: Option<i64>,
    pub last_error: Option<String>,
}

impl StageRecord {
    fn new(due_at: i64) -> Self {
        Self {
            due_at,
            sent: false,
            sent_at: None,
            last_error: None,
        }
    }

    /// A stage is due within an interval when it has not been sent and its
    /// due timestamp falls inside `[start, end)`. A failed send from a
    /// previous day stays due every following day until resolved.
    pub fn is_due_before(&self, end: i64) -> bool {
        !self.sent && self.due_at < end
    }

    pub fn record_sent(&mut self, now: i64) {
        self.sent = true;
        self.sent_at = Some(now);
        self.last_error = None;
    }

    /// Failures must never leave a stale `sent=true` from an earlier run
    pub fn record_failure(&mut self, error: String) {
        self.sent = false;
        self.last_error = Some(error);
    }
}

/// The fixed set of four stage records of a `ReminderTracker`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecords {
    pub day3: StageRecord,
    pub day7: StageRecord,
    pub day14: StageRecord,
    pub day30: StageRecord,
}

impl StageRecords {
    pub fn new(submitted_at: i64) -> Self {
        Self {
            day3: StageRecord::new(submitted_at + ReminderStage::Day3.offset_millis()),
            day7: StageRecord::new(submitted_at + ReminderStage::Day7.offset_millis()),
            day14: StageRecord::new(submitted_at + ReminderStage::Day14.offset_millis()),
            day30: StageRecord::new(submitted_at + ReminderStage::Day30.offset_millis()),
        }
    }

    pub fn get(&self, stage: ReminderStage) -> &StageRecord {
        match stage {
            ReminderStage::Day3 => &self.day3,
            ReminderStage::Day7 => &self.day7,
            ReminderStage::Day14 => &self.day14,
            ReminderStage::Day30 => &self.day30,
        }
    }

    pub fn get_mut(&mut self, stage: ReminderStage) -> &mut StageRecord {
        match stage {
            ReminderStage::Day3 => &mut self.day3,
            ReminderStage::Day7 => &mut self.day7,
            ReminderStage::Day14 => &mut self.day14,
            ReminderStage::Day30 => &mut self.day30,
        }
    }
}

/// Lifecycle status of a `ReminderTracker`. Every status except `Pending`
/// is terminal and excludes the tracker from the due-set selector, until a
/// cancelled tracker is manually reactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerStatus {
    Pending,
    Reviewed,
    Unreviewed,
    Cancelled,
}

impl TrackerStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TrackerStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerStatus::Pending => "pending",
            TrackerStatus::Reviewed => "reviewed",
            TrackerStatus::Unreviewed => "unreviewed",
            TrackerStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidStatusTransition {
    #[error("A tracker with status {from} cannot transition to {to}")]
    NotAllowed {
        from: TrackerStatus,
        to: TrackerStatus,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Product context carried only for template substitution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductContext {
    pub id: Option<String>,
    pub name: Option<String>,
    pub link: Option<String>,
    pub review_link: Option<String>,
}

/// A `ReminderTracker` tracks the scheduled "please review" reminder emails
/// for a single order that opted into the nurture sequence.
#[derive(Debug, Clone)]
pub struct ReminderTracker {
    pub id: ID,
    /// The order this tracker belongs to, unique across all trackers
    pub order_id: String,
    pub customer: CustomerContact,
    pub product: ProductContext,
    /// When the order entered the sequence, anchors all four stage due-dates
    pub submitted_at: i64,
    pub stages: StageRecords,
    pub status: TrackerStatus,
    /// False exactly when the status is terminal
    pub is_active: bool,
    /// The stage (if any) that triggered a manual mark-reviewed
    pub reviewed_stage: Option<ReminderStage>,
    pub reviewed_at: Option<i64>,
    pub notes: Option<String>,
}

impl ReminderTracker {
    pub fn new(
        order_id: String,
        customer: CustomerContact,
        product: ProductContext,
        submitted_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            order_id,
            customer,
            product,
            submitted_at,
            stages: StageRecords::new(submitted_at),
            status: TrackerStatus::Pending,
            is_active: true,
            reviewed_stage: None,
            reviewed_at: None,
            notes: None,
        }
    }

    /// The stage the batch runner should attempt for this tracker, if any.
    /// Stages are evaluated latest first so that at most one reminder goes
    /// out per tracker per run, even when several stages are due on the same
    /// day after a backfill.
    pub fn next_due_stage(&self, day_end: i64) -> Option<ReminderStage> {
        ReminderStage::SEND_ORDER
            .into_iter()
            .find(|stage| self.stages.get(*stage).is_due_before(day_end))
    }

    pub fn mark_reviewed(
        &mut self,
        stage: Option<ReminderStage>,
        now: i64,
    ) -> Result<(), InvalidStatusTransition> {
        if self.status != TrackerStatus::Pending {
            return Err(InvalidStatusTransition::NotAllowed {
                from: self.status,
                to: TrackerStatus::Reviewed,
            });
        }
        self.status = TrackerStatus::Reviewed;
        self.is_active = false;
        self.reviewed_stage = stage;
        self.reviewed_at = Some(now);
        Ok(())
    }

    pub fn mark_unreviewed(&mut self) -> Result<(), InvalidStatusTransition> {
        if self.status != TrackerStatus::Pending {
            return Err(InvalidStatusTransition::NotAllowed {
                from: self.status,
                to: TrackerStatus::Unreviewed,
            });
        }
        self.status = TrackerStatus::Unreviewed;
        self.is_active = false;
        Ok(())
    }

    pub fn cancel(&mut self, notes: Option<String>) -> Result<(), InvalidStatusTransition> {
        if self.status == TrackerStatus::Cancelled {
            return Err(InvalidStatusTransition::NotAllowed {
                from: self.status,
                to: TrackerStatus::Cancelled,
            });
        }
        self.status = TrackerStatus::Cancelled;
        self.is_active = false;
        if notes.is_some() {
            self.notes = notes;
        }
        Ok(())
    }

    /// A cancelled tracker re-enters the due-set selector with its original
    /// due timestamps intact
    pub fn reactivate(&mut self) -> Result<(), InvalidStatusTransition> {
        if self.status != TrackerStatus::Cancelled {
            return Err(InvalidStatusTransition::NotAllowed {
                from: self.status,
                to: TrackerStatus::Pending,
            });
        }
        self.status = TrackerStatus::Pending;
        self.is_active = true;
        Ok(())
    }

    /// Terminal promotion: once the final reminder has gone out unanswered
    /// there is nothing left to send and the tracker gives up. Returns true
    /// when the status changed.
    pub fn promote_if_exhausted(&mut self) -> bool {
        if self.stages.day30.sent && self.status == TrackerStatus::Pending {
            self.status = TrackerStatus::Unreviewed;
            self.is_active = false;
            return true;
        }
        false
    }
}

impl Entity for ReminderTracker {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(submitted_at: i64) -> ReminderTracker {
        ReminderTracker::new(
            "111-2222222-3333333".into(),
            CustomerContact {
                email: "ana@nurture.test".into(),
                name: "Ana".into(),
                phone: None,
            },
            Default::default(),
            submitted_at,
        )
    }

    #[test]
    fn day_bounds_covers_a_full_utc_day() {
        let (start, end) = day_bounds(DAY_MILLIS + 500);
        assert_eq!(start, DAY_MILLIS);
        assert_eq!(end, 2 * DAY_MILLIS);

        let (start, _) = day_bounds(DAY_MILLIS);
        assert_eq!(start, DAY_MILLIS);
    }

    #[test]
    fn stage_due_dates_are_anchored_at_submission() {
        let t = tracker(1000);
        assert_eq!(t.stages.day3.due_at, 1000 + 3 * DAY_MILLIS);
        assert_eq!(t.stages.day7.due_at, 1000 + 7 * DAY_MILLIS);
        assert_eq!(t.stages.day14.due_at, 1000 + 14 * DAY_MILLIS);
        assert_eq!(t.stages.day30.due_at, 1000 + 30 * DAY_MILLIS);
        assert!(ReminderStage::ALL
            .iter()
            .all(|s| !t.stages.get(*s).sent && t.stages.get(*s).sent_at.is_none()));
    }

    #[test]
    fn next_due_stage_prefers_latest_when_several_are_due() {
        let mut t = tracker(0);
        let (_, day_end) = day_bounds(30 * DAY_MILLIS);

        // Day 3, 7, 14 and 30 are all unsent and overdue
        assert_eq!(t.next_due_stage(day_end), Some(ReminderStage::Day30));

        t.stages.day30.record_sent(30 * DAY_MILLIS);
        assert_eq!(t.next_due_stage(day_end), Some(ReminderStage::Day14));
    }

    #[test]
    fn next_due_stage_is_none_before_first_checkpoint() {
        let t = tracker(0);
        let (_, day_end) = day_bounds(DAY_MILLIS);
        assert_eq!(t.next_due_stage(day_end), None);
    }

    #[test]
    fn failed_stage_stays_due_on_later_days() {
        let mut t = tracker(0);
        t.stages.day3.record_failure("rejected".into());

        let (_, day_end) = day_bounds(5 * DAY_MILLIS);
        assert_eq!(t.next_due_stage(day_end), Some(ReminderStage::Day3));
        assert!(!t.stages.day3.sent);
        assert_eq!(t.stages.day3.last_error.as_deref(), Some("rejected"));
    }

    #[test]
    fn record_sent_clears_previous_error() {
        let mut record = StageRecord::new(0);
        record.record_failure("relay unavailable".into());
        record.record_sent(500);
        assert!(record.sent);
        assert_eq!(record.sent_at, Some(500));
        assert!(record.last_error.is_none());
    }

    #[test]
    fn status_transitions_follow_the_state_machine() {
        let mut t = tracker(0);

        t.mark_reviewed(Some(ReminderStage::Day7), 100).unwrap();
        assert_eq!(t.status, TrackerStatus::Reviewed);
        assert!(!t.is_active);
        assert_eq!(t.reviewed_stage, Some(ReminderStage::Day7));
        assert!(t.mark_reviewed(None, 200).is_err());

        // reviewed -> cancelled is allowed, cancelled -> cancelled is not
        t.cancel(Some("customer asked us to stop".into())).unwrap();
        assert_eq!(t.status, TrackerStatus::Cancelled);
        assert!(t.cancel(None).is_err());

        t.reactivate().unwrap();
        assert_eq!(t.status, TrackerStatus::Pending);
        assert!(t.is_active);
        assert!(t.reactivate().is_err());
    }

    #[test]
    fn reactivate_requires_cancelled_status() {
        let mut t = tracker(0);
        assert!(t.reactivate().is_err());
        t.mark_unreviewed().unwrap();
        assert!(t.reactivate().is_err());
    }

    #[test]
    fn promotes_to_unreviewed_only_after_final_stage_sent() {
        let mut t = tracker(0);
        assert!(!t.promote_if_exhausted());

        t.stages.day30.record_sent(30 * DAY_MILLIS);
        assert!(t.promote_if_exhausted());
        assert_eq!(t.status, TrackerStatus::Unreviewed);
        assert!(!t.is_active);

        // Already terminal, nothing more to promote
        assert!(!t.promote_if_exhausted());
    }

    #[test]
    fn promotion_does_not_touch_reviewed_trackers() {
        let mut t = tracker(0);
        t.stages.day30.record_sent(30 * DAY_MILLIS);
        t.status = TrackerStatus::Reviewed;
        t.is_active = false;
        assert!(!t.promote_if_exhausted());
        assert_eq!(t.status, TrackerStatus::Reviewed);
    }

    #[test]
    fn stage_from_day_roundtrip() {
        for stage in ReminderStage::ALL {
            assert_eq!(ReminderStage::try_from(stage.day()).unwrap(), stage);
        }
        assert!(ReminderStage::try_from(5).is_err());
    }
}
