// tests for keyword risk flagging

use solace::RiskClassifier;

#[test]
fn test_flags_each_phrase() {
    for phrase in RiskClassifier::phrases() {
        assert!(RiskClassifier::scan(phrase), "{phrase} should flag");
    }
}

#[test]
fn test_ignores_case() {
    assert!(RiskClassifier::scan("I want to DIE"));
    assert!(RiskClassifier::scan("sometimes I think about SUICIDE"));
    assert!(RiskClassifier::scan("I Want To End My Life"));
}

#[test]
fn test_matches_inside_longer_text() {
    assert!(RiskClassifier::scan("honestly i just want to kill myself tonight."));
    assert!(RiskClassifier::scan("been thinking about suicide again"));
}

#[test]
fn test_calm_message_is_not_flagged() {
    assert!(!RiskClassifier::scan("I had a long day"));
    assert!(!RiskClassifier::scan("work was stressful but I'm okay"));
    assert!(!RiskClassifier::scan(""));
}

#[test]
fn test_negation_still_flags() {
    // lexical only, no negation handling
    assert!(RiskClassifier::scan("I do NOT want to hurt myself"));
}

#[test]
fn test_no_stemming() {
    assert!(!RiskClassifier::scan("I want to kill time"));
    assert!(!RiskClassifier::scan("i wanted to dye my hair"));
}

#[test]
fn test_first_match_reports_phrase() {
    assert_eq!(
        RiskClassifier::first_match("I might hurt myself"),
        Some("hurt myself")
    );
    assert_eq!(RiskClassifier::first_match("just tired"), None);
}

#[test]
fn test_is_deterministic() {
    let text = "I want to die";
    let first = RiskClassifier::scan(text);
    for _ in 0..10 {
        assert_eq!(RiskClassifier::scan(text), first);
    }
}
