use std::path::PathBuf;

use crate::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Report what would happen without touching the filesystem.
    #[default]
    DryRun,
    Execute,
}

#[derive(Debug)]
pub enum FileOutcome {
    Renamed { to: PathBuf },
    WouldRename { to: PathBuf },
    /// The extracted text already is the file's name.
    Unchanged,
    NoText,
    Collision { target: PathBuf },
    ProcessingFailed(Error),
    RenameFailed { to: PathBuf, error: std::io::Error },
}

impl FileOutcome {
    pub fn is_renamed(&self) -> bool {
        matches!(self, Self::Renamed { .. } | Self::WouldRename { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NoText
                | Self::Collision { .. }
                | Self::ProcessingFailed(_)
                | Self::RenameFailed { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameSummary {
    pub mode: Mode,
    pub renamed: usize,
    pub failed: usize,
    pub unchanged: usize,
}

impl RenameSummary {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &FileOutcome) {
        if outcome.is_renamed() {
            self.renamed += 1;
        } else if outcome.is_failure() {
            self.failed += 1;
        } else {
            self.unchanged += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.renamed + self.failed + self.unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_outcome_once() {
        let mut summary = RenameSummary::new(Mode::Execute);
        let outcomes = [
            FileOutcome::Renamed { to: "a.png".into() },
            FileOutcome::NoText,
            FileOutcome::Collision { target: "b.png".into() },
            FileOutcome::Unchanged,
            FileOutcome::ProcessingFailed(Error::Ocr("boom".into())),
        ];
        for outcome in &outcomes {
            summary.record(outcome);
        }
        assert_eq!(summary.renamed, 1);
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.total(), outcomes.len());
    }

    #[test]
    fn dry_run_renames_are_counted() {
        let mut summary = RenameSummary::default();
        summary.record(&FileOutcome::WouldRename { to: "x.png".into() });
        assert_eq!(summary.mode, Mode::DryRun);
        assert_eq!(summary.renamed, 1);
    }
}
