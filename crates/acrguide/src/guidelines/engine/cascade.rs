use crate::guidelines::domain::{Outcome, Tier};
use tracing::trace;

/// Ordered decision table over a parsed finding.
///
/// Rules are tried in the order they are chained; the first one whose
/// predicate holds decides and every later rule is skipped.
pub(crate) struct Cascade<'a, C, T> {
    subject: &'a C,
    decided: Option<T>,
}

impl<'a, C, T> Cascade<'a, C, T> {
    pub(crate) fn over(subject: &'a C) -> Self {
        Self {
            subject,
            decided: None,
        }
    }

    pub(crate) fn rule(
        mut self,
        label: &'static str,
        when: impl FnOnce(&C) -> bool,
        then: impl FnOnce(&C) -> T,
    ) -> Self {
        if self.decided.is_none() && when(self.subject) {
            trace!(rule = label, "guideline rule matched");
            self.decided = Some(then(self.subject));
        }
        self
    }

    pub(crate) fn otherwise(self, then: impl FnOnce(&C) -> T) -> T {
        match self.decided {
            Some(decided) => decided,
            None => then(self.subject),
        }
    }

    /// Like [`Cascade::otherwise`] for tables whose fallthrough is "no verdict".
    pub(crate) fn decided(self) -> Option<T> {
        self.decided
    }
}

/// Tier and wording chosen by a rule, plus notes that only that rule adds.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Verdict {
    pub(crate) tier: Tier,
    pub(crate) recommendation: String,
    pub(crate) extra_notes: Vec<String>,
}

impl Verdict {
    pub(crate) fn new(tier: Tier, recommendation: impl Into<String>) -> Self {
        Self {
            tier,
            recommendation: recommendation.into(),
            extra_notes: Vec::new(),
        }
    }

    pub(crate) fn with_note(mut self, note: impl Into<String>) -> Self {
        self.extra_notes.push(note.into());
        self
    }

    /// Guideline-wide notes come first, rule-specific ones after.
    pub(crate) fn into_outcome<S: AsRef<str>>(self, notes: &[S]) -> Outcome {
        let mut all_notes: Vec<String> = notes.iter().map(|note| note.as_ref().to_string()).collect();
        all_notes.extend(self.extra_notes);
        Outcome::new(self.tier, self.recommendation).with_notes(all_notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        let picked = Cascade::over(&5)
            .rule("small", |n| *n < 3, |_| "small")
            .rule("medium", |n| *n < 10, |_| "medium")
            .rule("also medium", |n| *n < 8, |_| "shadowed")
            .otherwise(|_| "large");
        assert_eq!(picked, "medium");
    }

    #[test]
    fn falls_through_to_otherwise() {
        let picked = Cascade::over(&50)
            .rule("small", |n| *n < 3, |_| "small")
            .otherwise(|_| "large");
        assert_eq!(picked, "large");

        let undecided: Option<&str> = Cascade::over(&50).rule("small", |n| *n < 3, |_| "small").decided();
        assert_eq!(undecided, None);
    }

    #[test]
    fn verdict_appends_rule_notes_after_base_notes() {
        let outcome = Verdict::new(Tier::FurtherWorkup, "CT")
            .with_note("extra")
            .into_outcome(&["base"]);
        assert_eq!(outcome.notes, vec!["base".to_string(), "extra".to_string()]);
        assert_eq!(outcome.tier, Tier::FurtherWorkup);
    }
}
