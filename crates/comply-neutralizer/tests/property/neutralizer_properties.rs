//! Property tests for the neutralizer.

use comply_core::config::NeutralizerConfig;
use comply_core::models::{NeutralTerm, Tier3Event};
use comply_neutralizer::Neutralizer;
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "Bankkaufmann", "Kauffrau", "Kaufmann", "für", "Lehrer", "Lehrerin", "Leiter",
    "Abteilungsleiter", "Koch", "Köchin", "und", "im", "Team", "Projekt", "Fachkraft",
    "Einzelhandel", ",", ".", "Herr", "Frau",
];

fn terms() -> Vec<NeutralTerm> {
    vec![
        NeutralTerm::new("Lehrer", "Lehrkraft", "job"),
        NeutralTerm::new("Lehrerin", "Lehrkraft", "job"),
        NeutralTerm::new("Leiter", "Leitung", "job"),
        NeutralTerm::new("Abteilungsleiter", "Abteilungsleitung", "job"),
        NeutralTerm::new("Koch", "Kochfachkraft", "job"),
        NeutralTerm::new("Köchin", "Kochfachkraft", "job"),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..30).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn second_pass_changes_nothing(text in arb_text()) {
        let n = Neutralizer::new(&NeutralizerConfig::default(), terms(), None).unwrap();
        let first = n.neutralize(&text, "p.pdf").unwrap();
        let second = n.neutralize(&first.text, "p.pdf").unwrap();
        prop_assert_eq!(&second.text, &first.text);
        prop_assert_eq!(second.rewrite_count(), 0);
    }

    #[test]
    fn no_action_only_when_alone(text in arb_text()) {
        let n = Neutralizer::new(&NeutralizerConfig::default(), terms(), None).unwrap();
        let out = n.neutralize(&text, "p.pdf").unwrap();
        let no_action = out.events.iter().filter(|e| matches!(e, Tier3Event::NoAction)).count();
        prop_assert!(no_action == 0 || out.events.len() == 1);
        prop_assert!(!out.events.is_empty());
    }
}
