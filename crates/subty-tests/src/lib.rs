//! Golden file tests. Every `.sb` file of a directory is run through a function and the output is
//! compared with the `.expect` file next to it. A missing `.expect` file is written with the
//! current output, so new cases only need to be reviewed once.

use std::{
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;

pub struct Test {
    pub directory: &'static str,
    pub run: fn(source: String) -> String,
}

/// Splits `name.ext` into its stem and its extension.
pub fn split_name(file: &Path) -> (String, String) {
    let name = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut path = name.split('.').collect::<Vec<_>>();
    let typ = path.pop().unwrap_or_default();

    (path.join("."), typ.to_string())
}

fn sources(directory: &str) -> Vec<PathBuf> {
    let entries = fs::read_dir(directory)
        .unwrap_or_else(|err| panic!("cannot read test directory '{directory}': {err}"));

    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && split_name(path).1 == "sb")
        .sorted()
        .collect()
}

/// Runs every case of every test, failing with the list of cases whose output changed.
pub fn test_runner(tests: &[&Test]) {
    let mut failures = vec![];

    for test in tests {
        for file in sources(test.directory) {
            let (file_name, _) = split_name(&file);
            println!("testing '{file_name}'");

            let content = fs::read_to_string(&file).unwrap();
            let result = (test.run)(content);

            let path = file.with_extension("expect");

            if let Ok(expects) = fs::read_to_string(&path) {
                if expects.trim_end() != result.trim_end() {
                    failures.push(format!(
                        "'{file_name}'\n--- expected\n{}\n--- got\n{}",
                        expects.trim_end(),
                        result.trim_end()
                    ));
                }
            } else {
                fs::write(path, result).unwrap();
            }
        }
    }

    assert!(failures.is_empty(), "some tests failed:\n\n{}", failures.join("\n\n"));
}

#[macro_export]
macro_rules! mk_test {
    ($name:ident, $directory:expr, $code:expr) => {
        #[test]
        fn $name() {
            const TEST: $crate::Test = $crate::Test {
                directory: concat!(env!("CARGO_MANIFEST_DIR"), $directory),
                run: $code,
            };

            $crate::test_runner(&[&TEST]);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_the_last_dot() {
        let (name, typ) = split_name(Path::new("suite/programs/a.b.sb"));
        assert_eq!(name, "a.b");
        assert_eq!(typ, "sb");
    }
}
