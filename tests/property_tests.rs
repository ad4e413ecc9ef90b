//! Property-based tests for ml-logwriter
//!
//! - Logged values read back as their rendered text
//! - Keys are never overwritten
//! - Graph validation rejects every length mismatch without touching disk

use std::collections::BTreeMap;
use std::fs;

use ml_logwriter::artifacts::{render_value, validate_name, LogArtifacts};
use ml_logwriter::Error;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Keys that are valid file names on every platform we run on.
fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

fn arb_entries() -> impl Strategy<Value = BTreeMap<String, f64>> {
    proptest::collection::btree_map(arb_key(), -1e6f64..1e6, 1..8)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: every metric file holds the rendered value, and the text
    /// parses back to the same float
    #[test]
    fn prop_metrics_read_back(entries in arb_entries()) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LogArtifacts::new(dir.path());
        store.create(Some("run")).unwrap();

        let written = store.log_metrics(entries.clone()).unwrap();
        prop_assert_eq!(written.len(), entries.len());

        for (key, value) in &entries {
            let text = fs::read_to_string(dir.path().join("run/metrics").join(key)).unwrap();
            prop_assert_eq!(&text, &render_value(value).unwrap());
            prop_assert_eq!(text.parse::<f64>().unwrap(), *value);
        }
    }

    /// Property: logging any already-logged key fails and keeps the old value
    #[test]
    fn prop_no_overwrite(entries in arb_entries(), replacement in -1e6f64..1e6) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LogArtifacts::new(dir.path());
        store.create(Some("run")).unwrap();
        store.log_parameters(entries.clone()).unwrap();

        let (key, original) = entries.iter().next().unwrap();
        let err = store.log_parameters([(key.as_str(), replacement)]).unwrap_err();
        let is_already_logged = matches!(err, Error::AlreadyLogged { .. });
        prop_assert!(is_already_logged);

        let text = fs::read_to_string(dir.path().join("run/parameters").join(key)).unwrap();
        prop_assert_eq!(text, render_value(original).unwrap());
    }

    /// Property: unequal lengths are always a validation error, with no output
    #[test]
    fn prop_graph_length_mismatch(
        x in proptest::collection::vec(-100.0f64..100.0, 0..20),
        y in proptest::collection::vec(-100.0f64..100.0, 0..20),
    ) {
        prop_assume!(x.len() != y.len());
        let dir = tempfile::tempdir().unwrap();
        let mut store = LogArtifacts::new(dir.path());
        store.create(Some("run")).unwrap();

        let result = store.log_performance_graph(&x, &y, "t", "x", "y", "g");
        let is_validation = matches!(result, Err(Error::Validation(_)));
        prop_assert!(is_validation);
        prop_assert!(!dir.path().join("run/performance_graphs").exists());
    }

    /// Property: names containing a separator are always rejected
    #[test]
    fn prop_separator_names_rejected(prefix in "[a-z]{0,5}", suffix in "[a-z]{0,5}") {
        let name = format!("{prefix}/{suffix}");
        prop_assert!(validate_name(&name).is_err());
    }
}
