// Batch Coordinator Tests
//
// Parallel fan-out over real files: omission of failures, import closure,
// cycle safety, cancellation and directory discovery.

use crate::batch::{discover_files, BatchConfig, CancellationToken, ParallelExtractor};
use crate::config::MetaConfig;
use crate::extractors::ExtractorManager;
use crate::language::Grammar;
use crate::tests::test_utils::{canonical_key, fixture_key, fixture_path, write_files};
use tempfile::TempDir;

fn extractor(threads: usize) -> ParallelExtractor {
    ParallelExtractor::new(
        ExtractorManager::default(),
        BatchConfig {
            num_threads: threads,
            report_progress: false,
        },
    )
}

#[cfg(test)]
mod script_batches {
    use super::*;

    #[test]
    fn test_broken_file_is_omitted() {
        let good = fixture_key("component.js");
        let broken = fixture_key("broken.js");
        let results = extractor(2).extract_scripts(&[good.clone(), broken]);

        assert_eq!(results.len(), 1);
        assert!(results.contains_key(&good));
    }

    #[test]
    fn test_unregistered_ambiguous_and_missing_files_are_omitted() {
        let paths = vec![
            fixture_key("page.js"),
            fixture_key("helper.js"),
            fixture_key("ambiguous.js"),
            fixture_key("nope.js"),
            fixture_key("wrapped-page.js"),
        ];
        let results = extractor(4).extract_scripts(&paths);
        let keys: Vec<&String> = results.keys().collect();
        assert_eq!(keys, vec![&paths[0], &paths[4]]);
    }

    #[test]
    fn test_batch_matches_single_file_extraction() {
        let path = fixture_key("component.js");
        let single = ExtractorManager::default()
            .parse_script_file(&fixture_path("component.js"), None)
            .unwrap()
            .unwrap();
        let results = extractor(1).extract_scripts(std::slice::from_ref(&path));
        assert_eq!(results.get(&path), Some(&single));
    }

    #[test]
    fn test_cancelled_batch_schedules_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let results = extractor(2)
            .with_cancellation(token.clone())
            .extract_scripts(&[fixture_key("component.js"), fixture_key("page.js")]);
        assert!(token.is_cancelled());
        assert!(results.is_empty());
    }
}

#[cfg(test)]
mod stylesheet_batches {
    use super::*;

    #[test]
    fn test_broken_stylesheet_policy_in_batches() {
        let dir = TempDir::new().unwrap();
        let paths = write_files(
            dir.path(),
            &[("ok.css", ".ok { color: red; }"), ("broken.css", ".broken { color: ;; ")],
        );
        let keys: Vec<String> = paths.iter().map(|p| p.to_string_lossy().into_owned()).collect();

        // default: recovered documents are kept, possibly partial
        let tolerant = extractor(2).extract_stylesheets(&keys);
        assert_eq!(tolerant.len(), 2);
        assert!(tolerant.contains_key(&keys[1]));

        // strict: the broken file is omitted like any other failure
        let strict_config = MetaConfig {
            tolerate_style_errors: false,
            ..MetaConfig::default()
        };
        let strict = ParallelExtractor::new(ExtractorManager::new(strict_config), BatchConfig::default())
            .extract_stylesheets(&keys);
        assert_eq!(strict.keys().collect::<Vec<_>>(), vec![&keys[0]]);
        assert_eq!(strict[&keys[0]].classes[0].name, "ok");
    }

    #[test]
    fn test_import_cycle_yields_two_entries() {
        let a = fixture_key("cycle-a.css");
        let results = extractor(4).extract_stylesheets(std::slice::from_ref(&a));

        assert_eq!(results.len(), 2);
        assert!(results.contains_key(&a));
        assert!(results.contains_key(&canonical_key(&fixture_path("cycle-b.css"))));
    }

    #[test]
    fn test_both_cycle_members_requested() {
        let a = fixture_key("cycle-a.css");
        let b = fixture_key("cycle-b.css");
        let results = extractor(2).extract_stylesheets(&[a.clone(), b.clone()]);
        let keys: Vec<&String> = results.keys().collect();
        assert_eq!(keys, vec![&a, &b]);
    }

    #[test]
    fn test_transitive_closure_skips_remote_and_missing_imports() {
        let page = fixture_key("page.css");
        let results = extractor(3).extract_stylesheets(std::slice::from_ref(&page));

        assert_eq!(results.len(), 3);
        assert!(results.contains_key(&page));
        assert!(results.contains_key(&canonical_key(&fixture_path("common.css"))));
        let theme = &results[&canonical_key(&fixture_path("theme.css"))];
        assert_eq!(theme.classes[0].name, "primary");
    }

    #[test]
    fn test_diamond_imports_parse_shared_file_once() {
        let dir = TempDir::new().unwrap();
        let paths = write_files(
            dir.path(),
            &[
                ("main.css", "@import \"left.css\";\n@import \"right.css\";\n.main {}"),
                ("left.css", "@import \"shared/base.css\";\n.left {}"),
                ("right.css", "@import \"./shared/base.css\";\n.right {}"),
                ("shared/base.css", ".base {}"),
            ],
        );
        let main = paths[0].to_string_lossy().into_owned();
        let results = extractor(4).extract_stylesheets(std::slice::from_ref(&main));

        assert_eq!(results.len(), 4);
        let base_key = canonical_key(&paths[3]);
        assert_eq!(results[&base_key].classes[0].name, "base");
    }

    #[test]
    fn test_rooted_imports_use_style_root() {
        let dir = TempDir::new().unwrap();
        let paths = write_files(
            dir.path(),
            &[
                ("pages/index/index.wxss", "@import \"/styles/theme.wxss\";\n.index {}"),
                ("styles/theme.wxss", ".theme {}"),
            ],
        );
        let config = MetaConfig {
            style_root: Some(dir.path().to_path_buf()),
            ..MetaConfig::default()
        };
        let parallel = ParallelExtractor::new(ExtractorManager::new(config), BatchConfig::default());
        let index = paths[0].to_string_lossy().into_owned();
        let results = parallel.extract_stylesheets(std::slice::from_ref(&index));

        assert_eq!(results.len(), 2);
        assert!(results.contains_key(&canonical_key(&paths[1])));
    }
}

#[cfg(test)]
mod discovery {
    use super::*;

    #[test]
    fn test_discover_files_by_grammar() {
        let dir = TempDir::new().unwrap();
        write_files(
            dir.path(),
            &[
                ("pages/a/a.js", "Page({data: {}, onLoad() {}});"),
                ("pages/a/a.wxss", ".a {}"),
                ("components/b/b.js", "Component({});"),
                ("components/b/b.css", ".b {}"),
                ("components/b/b.json", "{}"),
            ],
        );

        let scripts = discover_files(dir.path(), Grammar::Script).unwrap();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].ends_with("b.js"));
        assert!(scripts[1].ends_with("a.js"));

        let styles = discover_files(dir.path(), Grammar::Style).unwrap();
        assert_eq!(styles.len(), 2);
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = discover_files(&dir.path().join("missing"), Grammar::Script);
        assert!(matches!(result, Err(crate::error::MetaError::NotFound { .. })));
    }
}
