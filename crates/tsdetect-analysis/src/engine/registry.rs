//! Declarative detector catalog.
//!
//! Both granularity passes are derived from one table, so the two
//! detector sets cannot drift apart. Table order is registration order,
//! which is also the report column order.

use crate::detectors::SmellKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorSpec {
    pub kind: SmellKind,
    pub class_level: bool,
    pub method_level: bool,
    /// Cannot run without a parsed production file.
    pub needs_production: bool,
}

const fn spec(kind: SmellKind, method_level: bool, needs_production: bool) -> DetectorSpec {
    DetectorSpec {
        kind,
        class_level: true,
        method_level,
        needs_production,
    }
}

pub const CATALOG: &[DetectorSpec] = &[
    spec(SmellKind::AssertionRoulette, true, false),
    spec(SmellKind::ConditionalTestLogic, true, false),
    spec(SmellKind::ConstructorInitialization, false, false),
    spec(SmellKind::DefaultTest, false, false),
    spec(SmellKind::EmptyTest, true, false),
    spec(SmellKind::ExceptionCatchingThrowing, true, false),
    spec(SmellKind::GeneralFixture, true, false),
    spec(SmellKind::MysteryGuest, true, false),
    spec(SmellKind::PrintStatement, true, false),
    spec(SmellKind::RedundantAssertion, true, false),
    spec(SmellKind::SensitiveEquality, true, false),
    spec(SmellKind::VerboseTest, true, false),
    spec(SmellKind::SleepyTest, true, false),
    spec(SmellKind::EagerTest, true, true),
    spec(SmellKind::LazyTest, true, true),
    spec(SmellKind::DuplicateAssert, true, false),
    spec(SmellKind::UnknownTest, true, false),
    spec(SmellKind::IgnoredTest, true, false),
    spec(SmellKind::ResourceOptimism, true, false),
    spec(SmellKind::MagicNumberTest, true, false),
    spec(SmellKind::DependentTest, false, false),
];

pub fn class_catalog() -> impl Iterator<Item = &'static DetectorSpec> {
    CATALOG.iter().filter(|s| s.class_level)
}

pub fn method_catalog() -> impl Iterator<Item = &'static DetectorSpec> {
    CATALOG.iter().filter(|s| s.method_level)
}

/// Every smell name in registration order: the shared report columns.
pub fn smell_names() -> Vec<&'static str> {
    CATALOG.iter().map(|s| s.kind.name()).collect()
}
