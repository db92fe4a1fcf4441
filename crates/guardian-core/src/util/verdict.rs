//! Three-valued evaluation used by every aggregate in a report.
//!
//! A probe that could not be evaluated is `Indeterminate`, which is kept
//! distinct from `Fail` so details can say why, but both project to
//! `passed() == false`. Nothing ever defaults to `Pass`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    Indeterminate,
}

impl Verdict {
    pub fn from_bool(value: bool) -> Self {
        if value { Verdict::Pass } else { Verdict::Fail }
    }

    pub fn passed(self) -> bool {
        self == Verdict::Pass
    }

    /// Conjunction. `Fail` dominates, then `Indeterminate`.
    pub fn and(self, other: Verdict) -> Verdict {
        match (self, other) {
            (Verdict::Fail, _) | (_, Verdict::Fail) => Verdict::Fail,
            (Verdict::Indeterminate, _) | (_, Verdict::Indeterminate) => Verdict::Indeterminate,
            (Verdict::Pass, Verdict::Pass) => Verdict::Pass,
        }
    }

    /// Conjunction over a sequence. An empty sequence carries no evidence
    /// and is `Indeterminate`.
    pub fn all<I>(verdicts: I) -> Verdict
    where
        I: IntoIterator<Item = Verdict>,
    {
        verdicts
            .into_iter()
            .reduce(Verdict::and)
            .unwrap_or(Verdict::Indeterminate)
    }
}
