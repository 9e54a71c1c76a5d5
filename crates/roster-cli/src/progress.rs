use indicatif::{ProgressBar, ProgressStyle};

use roster_model::{ChangeLogEntry, ChangeLogSource, MemberId};

/// Counts change log fetches on a terminal spinner.
pub struct ChangeLogProgress<'a, S: ?Sized> {
    inner: &'a S,
    bar: ProgressBar,
}

impl<'a, S> ChangeLogProgress<'a, S>
where
    S: ChangeLogSource + ?Sized,
{
    pub fn new(inner: &'a S, visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("{spinner} {msg}: {pos}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            bar.set_style(style);
            bar.set_message("loading change logs");
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { inner, bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl<S> ChangeLogSource for ChangeLogProgress<'_, S>
where
    S: ChangeLogSource + ?Sized,
{
    fn fetch_change_log(&self, member_id: MemberId) -> Vec<ChangeLogEntry> {
        let entries = self.inner.fetch_change_log(member_id);
        self.bar.inc(1);
        entries
    }
}
