pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod list;
pub mod month;
pub mod new;
pub mod show;

use anyhow::Result;
use eventcal_core::{Event, EventDraft, EventStore, Frequency};

/// Recurrence flags as they apply to a draft.
///
/// Setting a frequency turns recurrence on; `--days` alone implies weekly.
pub(crate) fn apply_recurrence(
    draft: &mut EventDraft,
    frequency: Option<Frequency>,
    days: Option<Vec<String>>,
) {
    let implied = days.as_ref().map(|_| Frequency::Weekly);
    let frequency = frequency.or(implied);

    if let Some(frequency) = frequency {
        draft.is_recurring = Some(true);
        draft.frequency = Some(frequency.as_str().to_string());
    }
    if let Some(days) = days {
        draft.days_of_week = Some(days.into_iter().map(|d| normalize_day(&d)).collect());
    }
}

/// "monday" / "MON" / "mon" -> "Mon"; anything else is kept as typed
fn normalize_day(day: &str) -> String {
    let day = day.trim();
    let lower = day.to_ascii_lowercase();
    ["sun", "mon", "tue", "wed", "thu", "fri", "sat"]
        .iter()
        .find(|abbr| lower.starts_with(*abbr))
        .map(|abbr| {
            let mut s = abbr.to_string();
            s[..1].make_ascii_uppercase();
            s
        })
        .unwrap_or_else(|| day.to_string())
}

pub(crate) fn require_event(store: &EventStore, id: i64) -> Result<Event> {
    store
        .get(id)?
        .ok_or_else(|| anyhow::anyhow!("Event {} not found. Run `eventcal list` to see ids.", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_day_accepts_common_spellings() {
        assert_eq!(normalize_day("monday"), "Mon");
        assert_eq!(normalize_day("WED"), "Wed");
        assert_eq!(normalize_day(" fri "), "Fri");
        assert_eq!(normalize_day("xyz"), "xyz");
    }

    #[test]
    fn days_alone_imply_weekly() {
        let mut draft = EventDraft::default();
        apply_recurrence(&mut draft, None, Some(vec!["tue".into(), "Thu".into()]));

        assert_eq!(draft.is_recurring, Some(true));
        assert_eq!(draft.frequency.as_deref(), Some("weekly"));
        let expected = vec!["Tue".to_string(), "Thu".to_string()];
        assert_eq!(draft.days_of_week, Some(expected));
    }

    #[test]
    fn no_flags_leave_draft_untouched() {
        let mut draft = EventDraft::default();
        apply_recurrence(&mut draft, None, None);
        assert_eq!(draft.is_recurring, None);
        assert_eq!(draft.frequency, None);
    }
}
