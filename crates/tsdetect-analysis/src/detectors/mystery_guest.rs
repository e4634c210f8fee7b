//! Mystery Guest: the test reaches for an external resource (files,
//! databases, network) that is invisible from the test body.

use super::helpers::per_test_method;
use super::{AnalysisContext, Detector, SmellKind};
use crate::report::CodeElement;
use crate::syntax::visit::{walk_expr, walk_local_var, walk_method_body, Visit};
use crate::syntax::{Expr, LocalVar};

/// Types that stand for an external resource.
const RESOURCE_TYPES: &[&str] = &[
    "File",
    "FileInputStream",
    "FileOutputStream",
    "FileReader",
    "FileWriter",
    "RandomAccessFile",
    "BufferedReader",
    "BufferedWriter",
    "InputStreamReader",
    "OutputStreamWriter",
    "Path",
    "Files",
    "Connection",
    "DriverManager",
    "DataSource",
    "Statement",
    "PreparedStatement",
    "ResultSet",
    "SQLiteDatabase",
    "SQLiteOpenHelper",
    "Cursor",
    "ContentResolver",
    "HttpClient",
    "HttpURLConnection",
    "HttpGet",
    "HttpPost",
    "HttpResponse",
    "URL",
    "URLConnection",
    "Socket",
    "ServerSocket",
    "SoapObject",
];

#[derive(Debug, Default)]
pub struct MysteryGuest {
    elements: Vec<CodeElement>,
}

impl MysteryGuest {
    pub fn new() -> Self {
        Self::default()
    }
}

struct ResourceScan<'c> {
    extra: &'c [String],
    count: usize,
}

impl ResourceScan<'_> {
    fn is_resource(&self, name: &str) -> bool {
        RESOURCE_TYPES.contains(&name) || self.extra.iter().any(|t| t == name)
    }
}

impl Visit for ResourceScan<'_> {
    fn visit_local_var(&mut self, var: &LocalVar) {
        if self.is_resource(&var.ty.name) {
            self.count += var.variables.len();
        }
        walk_local_var(self, var);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::New { ty, .. } = expr {
            if self.is_resource(&ty.name) {
                self.count += 1;
            }
        }
        walk_expr(self, expr);
    }
}

impl Detector for MysteryGuest {
    fn kind(&self) -> SmellKind {
        SmellKind::MysteryGuest
    }

    fn analyze(&mut self, ctx: &AnalysisContext<'_>) {
        self.elements = per_test_method(ctx, |test| {
            let mut scan = ResourceScan {
                extra: &ctx.config.mystery_guest_types,
                count: 0,
            };
            walk_method_body(&mut scan, test.method);
            CodeElement::method(test.name(), scan.count > 0).with_metric("MysteryCount", scan.count)
        });
    }

    fn elements(&self) -> &[CodeElement] {
        &self.elements
    }

    fn into_elements(self: Box<Self>) -> Vec<CodeElement> {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use tsdetect_core::config::DetectionConfig;

    use crate::detectors::helpers::fixtures::{flagged, run, run_with};
    use super::*;

    #[test]
    fn test_file_access_is_a_mystery_guest() {
        let elements = run(
            SmellKind::MysteryGuest,
            r#"
            class FixtureTest {
                @Test void testReadsFile() throws Exception {
                    File input = new File("data/input.txt");
                    assertTrue(input.length() > 0);
                }
                @Test void testPure() { assertEquals(2, 1 + 1); }
            }
            "#,
            None,
        );
        assert!(flagged(&elements, "testReadsFile"));
        assert_eq!(elements[0].metric("MysteryCount"), Some("2"));
        assert!(!flagged(&elements, "testPure"));
    }

    #[test]
    fn test_configured_types_extend_the_list() {
        let config = DetectionConfig {
            mystery_guest_types: vec!["S3Client".to_string()],
            ..Default::default()
        };
        let elements = run_with(
            SmellKind::MysteryGuest,
            "class FixtureTest { @Test void testBucket() { S3Client c = S3Client.create(); } }",
            None,
            &config,
        );
        assert!(flagged(&elements, "testBucket"));
    }
}
