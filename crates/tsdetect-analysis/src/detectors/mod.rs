//! Test smell detectors.
//!
//! Each detector walks the test methods of one test file with a fresh
//! per-method scan and emits one `CodeElement` per method (or one for the
//! test class, for class-scoped smells).

pub mod helpers;
pub mod traits;

pub mod assertion_roulette;
pub mod conditional_test_logic;
pub mod constructor_initialization;
pub mod duplicate_assert;
pub mod exception_catching_throwing;
pub mod general_fixture;
pub mod ignored_test;
pub mod mystery_guest;
pub mod print_statement;
pub mod redundant_assertion;
pub mod resource_optimism;
pub mod sensitive_equality;
pub mod unknown_test;
pub mod verbose_test;

use serde::Serialize;
use tsdetect_core::config::DetectionConfig;

use crate::syntax::CompilationUnit;

pub use traits::Detector;

/// Everything a detector may look at for one file pair.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub test: &'a CompilationUnit,
    pub production: Option<&'a CompilationUnit>,
    /// Test file name without extension.
    pub test_type_name: &'a str,
    /// Production file name without extension.
    pub production_type_name: Option<&'a str>,
    pub config: &'a DetectionConfig,
}

/// Identity of every detector in the catalog. The display names are the
/// report's column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SmellKind {
    #[serde(rename = "Assertion Roulette")]
    AssertionRoulette,
    #[serde(rename = "Conditional Test Logic")]
    ConditionalTestLogic,
    #[serde(rename = "Constructor Initialization")]
    ConstructorInitialization,
    #[serde(rename = "Default Test")]
    DefaultTest,
    #[serde(rename = "Empty Test")]
    EmptyTest,
    #[serde(rename = "Exception Catching Throwing")]
    ExceptionCatchingThrowing,
    #[serde(rename = "General Fixture")]
    GeneralFixture,
    #[serde(rename = "Mystery Guest")]
    MysteryGuest,
    #[serde(rename = "Print Statement")]
    PrintStatement,
    #[serde(rename = "Redundant Assertion")]
    RedundantAssertion,
    #[serde(rename = "Sensitive Equality")]
    SensitiveEquality,
    #[serde(rename = "Verbose Test")]
    VerboseTest,
    #[serde(rename = "Sleepy Test")]
    SleepyTest,
    #[serde(rename = "Eager Test")]
    EagerTest,
    #[serde(rename = "Lazy Test")]
    LazyTest,
    #[serde(rename = "Duplicate Assert")]
    DuplicateAssert,
    #[serde(rename = "Unknown Test")]
    UnknownTest,
    #[serde(rename = "Ignored Test")]
    IgnoredTest,
    #[serde(rename = "Resource Optimism")]
    ResourceOptimism,
    #[serde(rename = "Magic Number Test")]
    MagicNumberTest,
    #[serde(rename = "Dependent Test")]
    DependentTest,
}

impl SmellKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AssertionRoulette => "Assertion Roulette",
            Self::ConditionalTestLogic => "Conditional Test Logic",
            Self::ConstructorInitialization => "Constructor Initialization",
            Self::DefaultTest => "Default Test",
            Self::EmptyTest => "Empty Test",
            Self::ExceptionCatchingThrowing => "Exception Catching Throwing",
            Self::GeneralFixture => "General Fixture",
            Self::MysteryGuest => "Mystery Guest",
            Self::PrintStatement => "Print Statement",
            Self::RedundantAssertion => "Redundant Assertion",
            Self::SensitiveEquality => "Sensitive Equality",
            Self::VerboseTest => "Verbose Test",
            Self::SleepyTest => "Sleepy Test",
            Self::EagerTest => "Eager Test",
            Self::LazyTest => "Lazy Test",
            Self::DuplicateAssert => "Duplicate Assert",
            Self::UnknownTest => "Unknown Test",
            Self::IgnoredTest => "Ignored Test",
            Self::ResourceOptimism => "Resource Optimism",
            Self::MagicNumberTest => "Magic Number Test",
            Self::DependentTest => "Dependent Test",
        }
    }

    /// A fresh detector instance with empty state.
    pub fn build(&self) -> Box<dyn Detector> {
        match self {
            Self::AssertionRoulette => Box::new(assertion_roulette::AssertionRoulette::new()),
            Self::ConditionalTestLogic => {
                Box::new(conditional_test_logic::ConditionalTestLogic::new())
            }
            Self::ConstructorInitialization => {
                Box::new(constructor_initialization::ConstructorInitialization::new())
            }
            Self::DefaultTest => Box::new(default_test::DefaultTest::new()),
            Self::EmptyTest => Box::new(empty_test::EmptyTest::new()),
            Self::ExceptionCatchingThrowing => {
                Box::new(exception_catching_throwing::ExceptionCatchingThrowing::new())
            }
            Self::GeneralFixture => Box::new(general_fixture::GeneralFixture::new()),
            Self::MysteryGuest => Box::new(mystery_guest::MysteryGuest::new()),
            Self::PrintStatement => Box::new(print_statement::PrintStatement::new()),
            Self::RedundantAssertion => Box::new(redundant_assertion::RedundantAssertion::new()),
            Self::SensitiveEquality => Box::new(sensitive_equality::SensitiveEquality::new()),
            Self::VerboseTest => Box::new(verbose_test::VerboseTest::new()),
            Self::SleepyTest => Box::new(sleepy_test::SleepyTest::new()),
            Self::EagerTest => Box::new(eager_test::EagerTest::new()),
            Self::LazyTest => Box::new(lazy_test::LazyTest::new()),
            Self::DuplicateAssert => Box::new(duplicate_assert::DuplicateAssert::new()),
            Self::UnknownTest => Box::new(unknown_test::UnknownTest::new()),
            Self::IgnoredTest => Box::new(ignored_test::IgnoredTest::new()),
            Self::ResourceOptimism => Box::new(resource_optimism::ResourceOptimism::new()),
            Self::MagicNumberTest => Box::new(magic_number_test::MagicNumberTest::new()),
            Self::DependentTest => Box::new(dependent_test::DependentTest::new()),
        }
    }
}

impl std::fmt::Display for SmellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
