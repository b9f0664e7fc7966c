// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vigil credential engine.
//!
//! This crate provides the error type, the domain types shared between the
//! analysis pipeline, the mutation engine and the vault, and the adapter
//! traits for the engine's two external boundaries: the AI advisor and the
//! vault persistence port.

pub mod error;
pub mod traits;
pub mod types;

pub use error::VigilError;
pub use traits::{AdvisorAdapter, PluginAdapter, VaultStore};
pub use types::{
    AdapterType, AnalysisResult, CaptureKind, CredentialEntry, EntryId, HealthStatus,
    StrengthenResult, Substitution, SuggestionSet, VaultSnapshot,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vigil_error_messages() {
        assert_eq!(VigilError::EmptyInput.to_string(), "input is empty");
        let stale = VigilError::StaleResultDiscarded {
            sequence: 2,
            latest: 3,
        };
        assert_eq!(
            stale.to_string(),
            "stale result discarded: run 2 superseded by run 3"
        );
        let range = VigilError::InvalidRange {
            start: 5,
            end: 2,
            len: 4,
        };
        assert!(range.to_string().contains("5..2"));
    }

    #[test]
    fn collaborator_failures_are_classified() {
        assert!(VigilError::evaluation("down").is_collaborator_failure());
        assert!(VigilError::strengthen("down").is_collaborator_failure());
        assert!(VigilError::suggest("down").is_collaborator_failure());
        assert!(!VigilError::EmptyInput.is_collaborator_failure());
        assert!(!VigilError::BoostInFlight.is_collaborator_failure());
    }

    #[test]
    fn analysis_result_keeps_unknown_fields() {
        let json = r#"{
            "score": 42,
            "attackVectors": ["Dictionary Attack", "Brute Force"],
            "crackTime": "2 minutes",
            "aiInsight": "common word",
            "confidence": 0.9
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).expect("should parse");
        assert_eq!(result.score, 42.0);
        assert_eq!(result.attack_vectors, vec!["Dictionary Attack", "Brute Force"]);
        assert_eq!(result.crack_time, "2 minutes");
        assert!(result.weaknesses.is_empty());
        assert_eq!(result.extra.get("confidence"), Some(&serde_json::json!(0.9)));
    }

    #[test]
    fn analysis_result_requires_score() {
        let json = r#"{"attackVectors": []}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn suggestion_set_uses_wire_names() {
        let json = r##"{
            "suggestedSymbols": ["!", "#"],
            "suggestedSuffixes": ["2024"],
            "leetspeak": [{"original": "a", "replacement": "@"}]
        }"##;
        let set: SuggestionSet = serde_json::from_str(json).expect("should parse");
        assert_eq!(set.symbols, vec!["!", "#"]);
        assert_eq!(set.suffixes, vec!["2024"]);
        assert_eq!(set.substitutions, vec![Substitution::new("a", "@")]);
    }

    #[test]
    fn strengthen_result_accepts_both_names() {
        let a: StrengthenResult =
            serde_json::from_str(r#"{"boostedPassword": "Dr4g0n#", "explanation": "x"}"#)
                .unwrap();
        let b: StrengthenResult =
            serde_json::from_str(r#"{"strengthenedText": "Dr4g0n#"}"#).unwrap();
        assert_eq!(a.strengthened_text, b.strengthened_text);
        assert!(b.explanation.is_empty());
    }

    #[test]
    fn capture_kind_display_and_parse() {
        use std::str::FromStr;
        for kind in CaptureKind::ALL {
            let parsed = CaptureKind::from_str(&kind.to_string()).expect("should parse back");
            assert_eq!(kind, parsed);
        }
        assert_eq!(CaptureKind::from_str("VOICE").unwrap(), CaptureKind::Voice);
        assert_eq!(
            serde_json::to_string(&CaptureKind::Retina).unwrap(),
            "\"retina\""
        );
    }

    #[test]
    fn entry_id_short_prefix() {
        let id = EntryId::from("abcdef123");
        assert_eq!(id.short(), "abcd");
        assert_eq!(EntryId::from("ab").short(), "ab");
        assert_ne!(EntryId::generate(), EntryId::generate());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_advisor_adapter<T: AdvisorAdapter>() {}
        fn _assert_vault_store<T: VaultStore>() {}
    }
}
