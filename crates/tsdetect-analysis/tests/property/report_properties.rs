use std::fs;

use proptest::prelude::*;
use tempfile::TempDir;
use tsdetect_analysis::report::{CsvReportWriter, FilePair};
use tsdetect_analysis::SmellDetector;
use tsdetect_core::config::DetectionConfig;

const STATEMENTS: &[&str] = &[
    "assertEquals(3, calc.add(1, 2));",
    "assertTrue(\"positive\", calc.add(1, 1) > 0);",
    "System.out.println(calc);",
    "if (calc == null) { fail(); }",
    "Thread.sleep(10);",
    "calc.subtract(4, 1);",
    "File f = new File(\"x\");",
    "for (int i = 0; i < 3; i++) { calc.add(i, i); }",
    "try { calc.divide(1, 0); } catch (ArithmeticException e) { }",
    "assertEquals(calc.toString(), calc.toString());",
];

fn method_bodies() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..STATEMENTS.len(), 0..6), 0..6)
}

fn render(bodies: &[Vec<usize>]) -> String {
    let mut source = String::from("public class GeneratedTest {\n");
    for (i, body) in bodies.iter().enumerate() {
        source.push_str(&format!("    @Test public void test{i}() throws Exception {{\n"));
        source.push_str("        Calculator calc = new Calculator();\n");
        for &s in body {
            source.push_str("        ");
            source.push_str(STATEMENTS[s]);
            source.push('\n');
        }
        source.push_str("    }\n");
    }
    source.push_str("    private void helper() { System.out.println(1); }\n}\n");
    source
}

fn csv(detector: &mut SmellDetector, pair: &FilePair) -> String {
    let analysis = detector.detect(pair);
    let mut writer = CsvReportWriter::new(Vec::new(), "memory");
    writer.write_report(&analysis.class_level).unwrap();
    writer.write_report(&analysis.method_level).unwrap();
    String::from_utf8(writer.finish().unwrap()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn one_class_row_and_one_row_per_test_method(bodies in method_bodies()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("GeneratedTest.java");
        fs::write(&path, render(&bodies)).unwrap();
        let pair = FilePair::new("gen", path.to_string_lossy(), "");

        let mut detector = SmellDetector::new(DetectionConfig::default()).unwrap();
        let analysis = detector.detect(&pair);

        prop_assert_eq!(analysis.class_level.rows().len(), 1);
        let rows = analysis.method_level.rows();
        prop_assert_eq!(rows.len(), bodies.len());
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(&row.test_method, &format!("test{i}"));
            prop_assert_eq!(row.verdicts.len(), analysis.method_level.detectors.len());
            // Every method-level detector emits an element per test method.
            prop_assert!(row.verdicts.iter().all(|v| v.as_bool().is_some()));
        }
    }

    #[test]
    fn repeated_analysis_is_byte_identical(bodies in method_bodies()) {
        let dir = TempDir::new().unwrap();
        let test = dir.path().join("GeneratedTest.java");
        let production = dir.path().join("Calculator.java");
        fs::write(&test, render(&bodies)).unwrap();
        fs::write(
            &production,
            "public class Calculator { int add(int a, int b) { return a + b; } }",
        )
        .unwrap();
        let pair = FilePair::new("gen", test.to_string_lossy(), production.to_string_lossy());

        let mut detector = SmellDetector::new(DetectionConfig::default()).unwrap();
        let first = csv(&mut detector, &pair);
        let second = csv(&mut detector, &pair);
        prop_assert_eq!(first, second);
    }
}
