//! Serde roundtrip and JsonSchema validation for the `/verify` wire types.

use cite_core::entities::*;
use cite_core::enums::CitationStatus;
use cite_core::review::ReviewProposal;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn verified_citation() -> Citation {
    Citation {
        id: "cit-a3f8b2c1".into(),
        raw_text: "Smith (2020) found X [doi: 10.1000/xyz123]".into(),
        metadata: CitationMetadata {
            title: Some("Finding X".into()),
            authors: vec!["Jane Smith".into()],
            year: Some(2020),
            doi: Some("10.1000/xyz123".into()),
            journal: Some("Journal of X".into()),
            volume: Some("12".into()),
            issue: Some("3".into()),
        },
        status: CitationStatus::Verified,
        confidence: 0.99,
        verification_source: "Crossref + Google Search".into(),
        source_url: Some("https://example.org/x".into()),
        explanation: "Registry and web search agree.".into(),
    }
}

fn unverified_citation() -> Citation {
    Citation {
        id: "c2".into(),
        raw_text: "Doe, personal communication".into(),
        metadata: CitationMetadata::default(),
        status: CitationStatus::Unverified,
        confidence: 0.5,
        verification_source: "None".into(),
        source_url: None,
        explanation: String::new(),
    }
}

roundtrip_and_validate!(citation_roundtrip, Citation, verified_citation());

roundtrip_and_validate!(
    result_with_bibliography_roundtrip,
    VerificationResult,
    VerificationResult::new(
        vec![verified_citation(), unverified_citation()],
        Some(MultiStyleBibliography {
            apa: "Smith, J. (2020). Finding X.".into(),
            mla: "Smith, Jane. \"Finding X.\" 2020.".into(),
            chicago: "Smith, Jane. 2020. \"Finding X.\"".into(),
            ieee: "[1] J. Smith, \"Finding X,\" 2020.".into(),
        }),
    )
);

roundtrip_and_validate!(
    result_without_bibliography_roundtrip,
    VerificationResult,
    VerificationResult::new(vec![unverified_citation()], None)
);

roundtrip_and_validate!(
    review_proposal_roundtrip,
    ReviewProposal,
    ReviewProposal {
        id: "c1".into(),
        status: CitationStatus::PartialMatch,
        reasoning: "Authors differ from registry record.".into(),
    }
);

roundtrip_and_validate!(
    candidate_roundtrip,
    CandidateCitation,
    CandidateCitation {
        id: Some("c1".into()),
        raw_text: "Smith 2020".into(),
        title: Some("Finding X".into()),
        authors: vec!["Smith".into()],
        year: Some(2020),
        doi: None,
        journal: None,
    }
);

#[test]
fn result_wire_keys_match_contract() {
    let result = VerificationResult::new(vec![verified_citation()], None);
    let value = serde_json::to_value(&result).unwrap();
    let object = value.as_object().unwrap();
    let mut keys: Vec<_> = object.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["citations".to_string(), "summary".to_string()]);

    let summary = &value["summary"];
    for key in ["total", "verified", "hallucinated", "unverified"] {
        assert!(summary.get(key).is_some(), "summary missing {key}");
    }
}
