//! Batch input: one `app,test[,production]` line per file pair.

use std::fs;
use std::io;
use std::path::Path;

use tsdetect_analysis::report::FilePair;
use tsdetect_core::errors::InputError;

pub fn load_file_pairs(path: &Path) -> Result<Vec<FilePair>, InputError> {
    if path.is_dir() {
        return Err(InputError::IsDirectory {
            path: path.display().to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InputError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => InputError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        },
    })?;
    let pairs = parse_file_pairs(&text)?;
    tracing::info!(path = %path.display(), pairs = pairs.len(), "loaded file pairs");
    Ok(pairs)
}

/// Blank lines are skipped. Fields past the third are ignored.
pub fn parse_file_pairs(text: &str) -> Result<Vec<FilePair>, InputError> {
    let mut pairs = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (app, test, production) = match fields.as_slice() {
            [app, test] => (*app, *test, ""),
            [app, test, production, rest @ ..] => {
                if !rest.is_empty() {
                    tracing::debug!(line = index + 1, extra = rest.len(), "ignoring extra fields");
                }
                (*app, *test, *production)
            }
            _ => {
                return Err(InputError::MalformedLine {
                    line: index + 1,
                    message: format!("expected app,test[,production], got '{line}'"),
                });
            }
        };
        if test.is_empty() {
            return Err(InputError::MalformedLine {
                line: index + 1,
                message: "empty test file path".to_string(),
            });
        }

        let mut pair = FilePair::new(app, test, production);
        pair.relative_test_file_path = relative_path(app, test);
        pair.relative_production_file_path = relative_path(app, production);
        pairs.push(pair);
    }
    Ok(pairs)
}

/// Path below the last `<sep><app><sep>` segment, or the whole path when
/// the app directory does not occur.
pub fn relative_path(app: &str, path: &str) -> String {
    if app.is_empty() || path.is_empty() {
        return path.to_string();
    }
    ['/', '\\']
        .iter()
        .filter_map(|sep| {
            let marker = format!("{sep}{app}{sep}");
            path.rfind(&marker).map(|i| i + marker.len())
        })
        .max()
        .map(|start| path[start..].to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path("demo", "/repos/demo/src/test/FooTest.java"),
            "src/test/FooTest.java"
        );
        assert_eq!(
            relative_path("demo", "/demo/x/demo/src/FooTest.java"),
            "src/FooTest.java"
        );
        assert_eq!(relative_path("demo", "/other/FooTest.java"), "/other/FooTest.java");
        assert_eq!(
            relative_path("demo", r"C:\work\demo\src\FooTest.java"),
            r"src\FooTest.java"
        );
        assert_eq!(relative_path("demo", ""), "");
    }
}
