//! Priority Resolver and SLA Classifier
//!
//! Both are total lookups over closed enums.

use desk_common::{Impact, Priority, SlaLevel, Urgency};

/// Derive priority from the impact × urgency matrix
///
/// | Impact \ Urgency | LOW    | NORMAL | HIGH     | IMMEDIATE |
/// |------------------|--------|--------|----------|-----------|
/// | MINOR            | LOW    | LOW    | MEDIUM   | MEDIUM    |
/// | MODERATE         | LOW    | MEDIUM | HIGH     | HIGH      |
/// | MAJOR            | MEDIUM | HIGH   | HIGH     | CRITICAL  |
/// | CRITICAL         | HIGH   | HIGH   | CRITICAL | CRITICAL  |
pub fn resolve_priority(impact: Impact, urgency: Urgency) -> Priority {
    use Impact as I;
    use Priority as P;
    use Urgency as U;

    match (impact, urgency) {
        (I::Minor, U::Low | U::Normal) => P::Low,
        (I::Minor, U::High | U::Immediate) => P::Medium,

        (I::Moderate, U::Low) => P::Low,
        (I::Moderate, U::Normal) => P::Medium,
        (I::Moderate, U::High | U::Immediate) => P::High,

        (I::Major, U::Low) => P::Medium,
        (I::Major, U::Normal | U::High) => P::High,
        (I::Major, U::Immediate) => P::Critical,

        (I::Critical, U::Low | U::Normal) => P::High,
        (I::Critical, U::High | U::Immediate) => P::Critical,
    }
}

/// Pick the SLA tier for a ticket
///
/// Critical priority or critical impact always lands in `CRITICAL_SUPPORT`;
/// high priority or major impact in `PREMIUM`; everything else `STANDARD`.
pub fn classify_sla(priority: Priority, impact: Impact) -> SlaLevel {
    match (priority, impact) {
        (Priority::Critical, _) | (_, Impact::Critical) => SlaLevel::CriticalSupport,
        (Priority::High, _) | (_, Impact::Major) => SlaLevel::Premium,
        _ => SlaLevel::Standard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_priority_matrix() {
        let expected = [
            (Impact::Minor, [Priority::Low, Priority::Low, Priority::Medium, Priority::Medium]),
            (Impact::Moderate, [Priority::Low, Priority::Medium, Priority::High, Priority::High]),
            (Impact::Major, [Priority::Medium, Priority::High, Priority::High, Priority::Critical]),
            (Impact::Critical, [Priority::High, Priority::High, Priority::Critical, Priority::Critical]),
        ];

        for (impact, row) in expected {
            for (urgency, want) in Urgency::ALL.into_iter().zip(row) {
                assert_eq!(
                    resolve_priority(impact, urgency),
                    want,
                    "{impact} x {urgency}"
                );
            }
        }
    }

    #[test]
    fn test_priority_examples() {
        assert_eq!(resolve_priority(Impact::Major, Urgency::Immediate), Priority::Critical);
        assert_eq!(resolve_priority(Impact::Minor, Urgency::Low), Priority::Low);
    }

    #[test]
    fn test_classify_sla() {
        assert_eq!(classify_sla(Priority::Low, Impact::Minor), SlaLevel::Standard);
        assert_eq!(classify_sla(Priority::Medium, Impact::Moderate), SlaLevel::Standard);
        assert_eq!(classify_sla(Priority::Medium, Impact::Major), SlaLevel::Premium);
        assert_eq!(classify_sla(Priority::High, Impact::Minor), SlaLevel::Premium);
        assert_eq!(classify_sla(Priority::High, Impact::Critical), SlaLevel::CriticalSupport);
        assert_eq!(classify_sla(Priority::Low, Impact::Critical), SlaLevel::CriticalSupport);
    }

    fn impact() -> impl Strategy<Value = Impact> {
        prop::sample::select(Impact::ALL.to_vec())
    }

    fn urgency() -> impl Strategy<Value = Urgency> {
        prop::sample::select(Urgency::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_critical_priority_is_critical_support(impact in impact()) {
            prop_assert_eq!(classify_sla(Priority::Critical, impact), SlaLevel::CriticalSupport);
        }

        #[test]
        fn prop_priority_monotone_in_urgency(impact in impact(), a in urgency(), b in urgency()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(resolve_priority(impact, lo) <= resolve_priority(impact, hi));
        }

        #[test]
        fn prop_priority_monotone_in_impact(urgency in urgency(), a in impact(), b in impact()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(resolve_priority(lo, urgency) <= resolve_priority(hi, urgency));
        }
    }
}
