use serde::Serialize;

use crate::entry::Entry;
use crate::size::{format_size, Size};

/// Count and size over some set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub count: usize,
    pub size_kib: f64,
    /// At least one contributing entry had no parseable size.
    pub has_unknown: bool,
}

impl Totals {
    pub fn over<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        Self::over_where(entries, |_| true)
    }

    /// `size_kib` is a float sum, so its last bits may depend on iteration
    /// order. The displayed size does not.
    pub fn over_where<'a, F>(entries: impl IntoIterator<Item = &'a Entry>, mut predicate: F) -> Self
    where
        F: FnMut(&Entry) -> bool,
    {
        let mut totals = Totals::default();
        for entry in entries.into_iter().filter(|e| predicate(*e)) {
            totals.count += 1;
            match entry.size().kib() {
                Some(kib) => totals.size_kib += kib,
                None => totals.has_unknown = true,
            }
        }
        totals
    }

    pub fn size_display(&self) -> String {
        format_size(Size::Known(self.size_kib), self.has_unknown)
    }
}

/// Selected totals next to the totals of the whole listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub selected: Totals,
    pub total: Totals,
}

impl Summary {
    pub fn of(entries: &[Entry]) -> Self {
        Self {
            selected: Totals::over_where(entries, Entry::is_selected),
            total: Totals::over(entries),
        }
    }

    pub fn count_display(&self) -> String {
        format!("{} / {}", self.selected.count, self.total.count)
    }

    pub fn size_display(&self) -> String {
        format!(
            "{} / {}",
            self.selected.size_display(),
            self.total.size_display()
        )
    }
}

pub fn select_all(entries: &mut [Entry]) {
    set_all(entries, true);
}

pub fn unselect_all(entries: &mut [Entry]) {
    set_all(entries, false);
}

fn set_all(entries: &mut [Entry], value: bool) {
    for entry in entries.iter_mut() {
        entry.set_selected(value);
    }
    tracing::debug!("Set {} entries to selected={}", entries.len(), value);
}
