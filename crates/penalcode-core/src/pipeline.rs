//! Pipeline orchestration: classify → validate → normalise → tag.
//!
//! Each record is handled independently and lands in exactly one of the two
//! outputs. A failed criminality or section check short-circuits the
//! remaining stages. Both outputs preserve input order.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::criminality;
use crate::normalize::normalize_class;
use crate::offense::{CleanedOffense, RawOffense, Rejection, RejectionReason};
use crate::registry::ReferenceRegistry;
use crate::statute::is_valid_section;
use crate::vfo::tag_vfo;

/// Result of pushing one record through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Cleaned(CleanedOffense),
    Rejected(Rejection),
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub cleaned: usize,
    pub rejected: usize,
    pub not_criminal: usize,
    pub invalid_section: usize,
    /// Cleaned records carrying the VFO designation.
    pub vfo: usize,
    /// Cleaned records whose class is outside the registry's canonical set.
    pub non_canonical: usize,
}

/// Output of a full pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub cleaned: Vec<CleanedOffense>,
    pub rejected: Vec<Rejection>,
    pub summary: RunSummary,
}

/// The offense cleaning pipeline, bound to one reference registry.
pub struct Pipeline {
    registry: ReferenceRegistry,
}

impl Pipeline {
    pub fn new(registry: ReferenceRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ReferenceRegistry {
        &self.registry
    }

    /// Run a single record through all stages.
    pub fn process(&self, offense: RawOffense) -> Outcome {
        let verdict = criminality::assess(&self.registry, &offense);
        if !verdict.is_criminal() {
            debug!(
                name = offense.name(),
                class = offense.class(),
                rule = verdict.as_str(),
                "rejected: not criminal"
            );
            return Outcome::Rejected(Rejection {
                reason: RejectionReason::NotCriminal,
                offense,
            });
        }

        if !is_valid_section(&self.registry, &offense) {
            debug!(
                name = offense.name(),
                section = offense.statute_location_id(),
                "rejected: invalid section"
            );
            return Outcome::Rejected(Rejection {
                reason: RejectionReason::InvalidSection,
                offense,
            });
        }

        let class = normalize_class(&self.registry, &offense);
        let normalized = RawOffense {
            class: Some(class),
            ..offense
        };
        Outcome::Cleaned(tag_vfo(&self.registry, normalized))
    }

    /// Run every record, in order, partitioning into cleaned and rejected.
    pub fn run<I>(&self, offenses: I) -> PipelineOutput
    where
        I: IntoIterator<Item = RawOffense>,
    {
        let mut out = PipelineOutput::default();

        for offense in offenses {
            out.summary.total += 1;
            match self.process(offense) {
                Outcome::Cleaned(cleaned) => {
                    if cleaned.vfo {
                        out.summary.vfo += 1;
                    }
                    if !self.registry.is_canonical(&cleaned.class) {
                        out.summary.non_canonical += 1;
                        warn!(
                            name = cleaned.name(),
                            class = %cleaned.class,
                            section = %cleaned.statute_location_id,
                            "accepted offense has non-canonical class"
                        );
                    }
                    out.cleaned.push(cleaned);
                }
                Outcome::Rejected(rejection) => {
                    match rejection.reason {
                        RejectionReason::NotCriminal => out.summary.not_criminal += 1,
                        RejectionReason::InvalidSection => out.summary.invalid_section += 1,
                    }
                    out.rejected.push(rejection);
                }
            }
        }

        out.summary.cleaned = out.cleaned.len();
        out.summary.rejected = out.rejected.len();

        let s = &out.summary;
        info!(
            total = s.total,
            cleaned = s.cleaned,
            rejected = s.rejected,
            not_criminal = s.not_criminal,
            invalid_section = s.invalid_section,
            vfo = s.vfo,
            "offense cleanup complete"
        );

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfo::VFO_LEGAL_BASIS;
    use proptest::prelude::*;

    /// Small synthetic registry: three valid sections, one VFO.
    fn registry() -> ReferenceRegistry {
        ReferenceRegistry::new(
            ["100.00", "120.05", "120.10"],
            ["120.05"],
            [
                "A-I", "A-II", "B", "C", "D", "E", "A Misd", "B Misd", "Unclassified Misd",
                "Violation", "Infraction",
            ],
        )
        .unwrap()
    }

    fn raw(name: Option<&str>, class: &str, section: &str) -> RawOffense {
        RawOffense {
            name: name.map(Into::into),
            class: Some(class.into()),
            statute_location_id: Some(section.into()),
            ..Default::default()
        }
    }

    #[test]
    fn violent_assault_is_cleaned_and_tagged() {
        let pipeline = Pipeline::new(registry());
        let out = pipeline.run([raw(Some("Assault"), "D", "120.05")]);

        assert!(out.rejected.is_empty());
        let cleaned = &out.cleaned[0];
        assert_eq!(cleaned.class, "D");
        assert!(cleaned.vfo);
        assert_eq!(cleaned.vfo_legal_basis.as_deref(), Some(VFO_LEGAL_BASIS));
    }

    #[test]
    fn definitions_entry_is_not_criminal() {
        let pipeline = Pipeline::new(registry());
        let out = pipeline.run([raw(Some("General Definitions"), "Unclassified Misd", "100.00")]);

        assert!(out.cleaned.is_empty());
        assert_eq!(out.rejected[0].reason, RejectionReason::NotCriminal);
        assert_eq!(out.rejected[0].offense.name(), "General Definitions");
    }

    #[test]
    fn unknown_section_is_invalid() {
        let pipeline = Pipeline::new(registry());
        let out = pipeline.run([raw(None, "B", "999.99")]);

        assert!(out.cleaned.is_empty());
        assert_eq!(out.rejected[0].reason, RejectionReason::InvalidSection);
    }

    #[test]
    fn coarse_felony_is_rejected_before_normalisation() {
        let pipeline = Pipeline::new(registry());
        let mut o = raw(None, "Felony", "120.10");
        o.offense_level = Some("C".into());

        let out = pipeline.run([o.clone()]);
        assert!(out.cleaned.is_empty());
        assert_eq!(out.rejected[0].reason, RejectionReason::NotCriminal);
        // The rejected record is reported exactly as received.
        assert_eq!(out.rejected[0].offense, o);
    }

    #[test]
    fn criminality_checked_before_section() {
        let pipeline = Pipeline::new(registry());
        let out = pipeline.run([raw(None, "Unknown", "999.99")]);
        assert_eq!(out.rejected[0].reason, RejectionReason::NotCriminal);
    }

    #[test]
    fn missing_class_rejected_as_not_criminal() {
        let pipeline = Pipeline::new(registry());
        let o = RawOffense {
            name: Some("Assault".into()),
            statute_location_id: Some("120.05".into()),
            ..Default::default()
        };
        let out = pipeline.run([o]);
        assert_eq!(out.rejected[0].reason, RejectionReason::NotCriminal);
    }

    #[test]
    fn outputs_preserve_input_order() {
        let pipeline = Pipeline::new(registry());
        let out = pipeline.run([
            raw(Some("one"), "B", "120.10"),
            raw(Some("two"), "Unknown", "120.10"),
            raw(Some("three"), "C", "120.05"),
            raw(Some("four"), "E", "1.00"),
            raw(Some("five"), "A Misd", "100.00"),
        ]);

        let cleaned: Vec<&str> = out.cleaned.iter().map(|c| c.name()).collect();
        let rejected: Vec<&str> = out.rejected.iter().map(|r| r.offense.name()).collect();
        assert_eq!(cleaned, vec!["one", "three", "five"]);
        assert_eq!(rejected, vec!["two", "four"]);
    }

    #[test]
    fn summary_counts_each_outcome() {
        let pipeline = Pipeline::new(registry());
        let out = pipeline.run([
            raw(Some("a"), "D", "120.05"),
            raw(Some("b"), "A", "120.10"),
            raw(Some("c"), "Variable", "120.10"),
            raw(Some("d"), "B", "404.00"),
        ]);

        assert_eq!(
            out.summary,
            RunSummary {
                total: 4,
                cleaned: 2,
                rejected: 2,
                not_criminal: 1,
                invalid_section: 1,
                vfo: 1,
                non_canonical: 1,
            }
        );
    }

    #[test]
    fn empty_input() {
        let out = Pipeline::new(registry()).run(Vec::new());
        assert!(out.cleaned.is_empty());
        assert!(out.rejected.is_empty());
        assert_eq!(out.summary, RunSummary::default());
    }

    // ── Properties ──

    fn arb_class() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::sample::select(vec![
            "A-I", "A-II", "B", "C", "D", "E", "A Misd", "B Misd", "Unclassified Misd",
            "Violation", "Infraction", "Felony", "Misdemeanor", "Variable", "Unknown", "",
        ]))
        .prop_map(|c| c.map(String::from))
    }

    fn arb_section() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::sample::select(vec!["100.00", "120.05", "120.10", "999.99", ""]))
            .prop_map(|s| s.map(String::from))
    }

    fn arb_name() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::sample::select(vec![
            "Assault",
            "Menacing",
            "General provisions",
            "Definitions",
            "Purpose",
            "Robbery",
        ]))
        .prop_map(|n| n.map(String::from))
    }

    fn arb_offense() -> impl Strategy<Value = RawOffense> {
        (arb_name(), arb_class(), arb_section(), any::<Option<bool>>()).prop_map(
            |(name, class, section, vfo)| RawOffense {
                name,
                class,
                statute_location_id: section,
                vfo,
                vfo_legal_basis: vfo.map(|_| VFO_LEGAL_BASIS.to_string()),
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn every_record_lands_in_exactly_one_output(offenses in prop::collection::vec(arb_offense(), 0..40)) {
            let n = offenses.len();
            let out = Pipeline::new(registry()).run(offenses);
            prop_assert_eq!(out.cleaned.len() + out.rejected.len(), n);
            prop_assert_eq!(out.summary.total, n);
        }

        #[test]
        fn cleaned_records_are_canonical_and_valid(offenses in prop::collection::vec(arb_offense(), 0..40)) {
            let registry = registry();
            let out = Pipeline::new(registry.clone()).run(offenses);
            for c in &out.cleaned {
                prop_assert!(registry.is_canonical(&c.class), "class {}", c.class);
                prop_assert!(registry.is_valid_section(&c.statute_location_id));
            }
        }

        #[test]
        fn rejection_reason_matches_failed_check(offenses in prop::collection::vec(arb_offense(), 0..40)) {
            let registry = registry();
            let out = Pipeline::new(registry.clone()).run(offenses);
            for r in &out.rejected {
                let criminal = criminality::is_criminal(&registry, &r.offense);
                match r.reason {
                    RejectionReason::NotCriminal => prop_assert!(!criminal),
                    RejectionReason::InvalidSection => {
                        prop_assert!(criminal);
                        prop_assert!(!is_valid_section(&registry, &r.offense));
                    }
                }
            }
        }

        #[test]
        fn vfo_flag_tracks_vfo_sections(offenses in prop::collection::vec(arb_offense(), 0..40)) {
            let registry = registry();
            let out = Pipeline::new(registry.clone()).run(offenses);
            for c in &out.cleaned {
                prop_assert_eq!(c.vfo, registry.is_vfo_section(&c.statute_location_id));
                if !c.vfo {
                    prop_assert!(c.vfo_legal_basis.is_none());
                    prop_assert!(c.vfo_notes.is_none());
                }
            }
        }

        #[test]
        fn rerunning_cleaned_output_is_idempotent(offenses in prop::collection::vec(arb_offense(), 0..40)) {
            let pipeline = Pipeline::new(registry());
            let first = pipeline.run(offenses);
            let second = pipeline.run(first.cleaned.iter().cloned().map(RawOffense::from));
            prop_assert!(second.rejected.is_empty());
            prop_assert_eq!(second.cleaned, first.cleaned);
        }
    }
}
