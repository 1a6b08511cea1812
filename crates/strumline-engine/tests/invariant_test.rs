use proptest::prelude::*;
use strumline_engine::{
    Autoplay, ChartRow, Chord, Engine, EngineConfig, InputFrame, ScoreRule, ScoreSource,
    StrumEvent,
};

/// Per-tick player action: either a raw button mask or the autoplay's choice.
#[derive(Debug, Clone, Copy)]
enum Action {
    Raw { lanes: u8, strum: bool },
    Auto,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (any::<u8>(), any::<bool>()).prop_map(|(lanes, strum)| Action::Raw { lanes, strum }),
        Just(Action::Auto),
    ]
}

fn small_ceiling() -> EngineConfig {
    EngineConfig {
        score: ScoreRule {
            max_score: 40,
            ..Default::default()
        },
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn score_stays_within_bounds(
        rows in prop::collection::vec(any::<u8>(), 0..250),
        actions in prop::collection::vec(action(), 1..400),
    ) {
        let mut engine = Engine::new(small_ceiling());
        let mut autoplay = Autoplay::new();

        for (tick, action) in actions.iter().enumerate() {
            let frame = match *action {
                Action::Raw { lanes, strum } => InputFrame {
                    lanes: Chord::from_bits(lanes).lanes(),
                    strum,
                },
                Action::Auto => autoplay.sample_for(&engine.view()),
            };
            let row = rows.get(tick).map(|&b| ChartRow::from_bits(b)).unwrap_or(ChartRow::EMPTY);
            let report = engine.tick(row, frame);

            prop_assert!(report.score <= 40);
            prop_assert_eq!(report.score, engine.score());

            for lane in 0..4 {
                if report.mark_hit[lane] {
                    prop_assert!(report.zones[lane].has_head);
                }
            }
            if report.event == Some(StrumEvent::Hit) {
                prop_assert_eq!(report.required, report.pressed);
                prop_assert!(!report.required.is_empty());
            } else {
                prop_assert_eq!(report.mark_hit, [false; 4]);
            }
        }
    }

    #[test]
    fn winning_candidate_is_never_a_sum(
        rows in prop::collection::vec(any::<u8>(), 0..250),
        actions in prop::collection::vec(action(), 1..400),
    ) {
        let mut engine = Engine::default();
        let mut autoplay = Autoplay::new();

        for (tick, action) in actions.iter().enumerate() {
            let frame = match *action {
                Action::Raw { lanes, strum } => InputFrame {
                    lanes: Chord::from_bits(lanes).lanes(),
                    strum,
                },
                Action::Auto => autoplay.sample_for(&engine.view()),
            };
            let row = rows.get(tick).map(|&b| ChartRow::from_bits(b)).unwrap_or(ChartRow::EMPTY);
            let report = engine.tick(row, frame);
            let pre = i64::from(report.score_before);
            let clamp = |v: i64| v.clamp(0, 99_999);

            let expected = match report.applied {
                Some(ScoreSource::MissedNotes) => clamp(pre - i64::from(report.missed_count)),
                Some(ScoreSource::Sustain) => {
                    prop_assert_eq!(report.missed_count, 0);
                    clamp(pre + i64::from(report.tail_count))
                }
                Some(ScoreSource::Hit) => {
                    prop_assert_eq!(report.tail_count, 0);
                    prop_assert_eq!(report.missed_count, 0);
                    clamp(pre + 10)
                }
                Some(ScoreSource::Miss) => {
                    prop_assert_eq!(report.tail_count, 0);
                    prop_assert_eq!(report.missed_count, 0);
                    clamp(pre - 1)
                }
                None => {
                    prop_assert_eq!(report.event, None);
                    pre
                }
            };
            prop_assert_eq!(i64::from(report.score), expected);
        }
    }
}
