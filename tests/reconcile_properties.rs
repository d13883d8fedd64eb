use scoreline::reconcile::{
    merge, normalize, parse_live_events, parse_odds_events, resolve, MergedEvent, OddsQuote,
    RawLiveEvent, ScoreEstimate,
};
use serde_json::{json, Value};

fn live(value: Value) -> Vec<RawLiveEvent> {
    parse_live_events(value)
}

fn odds_entry(home: &str, away: &str, home_price: i64, away_price: i64) -> Value {
    json!({
        "home_team": home,
        "away_team": away,
        "bookmakers": [{"key": "draftkings", "markets": [{"key": "h2h", "outcomes": [
            {"name": home, "price": home_price},
            {"name": away, "price": away_price}
        ]}]}]
    })
}

fn slate() -> (Value, Vec<Value>) {
    let live_feed = json!([
        {"id": "g1", "teams": {"home": {"name": "Los Angeles Lakers"}, "away": {"name": "Boston Celtics"}},
         "scores": {"home": {"total": 101}, "away": {"total": 99}}},
        {"id": "g2", "teams": {"home": {"name": "Miami Heat"}, "away": {"name": "Chicago Bulls"}},
         "periods": {"q1": {"home": 20, "away": 25}}},
        {"id": "g3", "teams": {"home": {"name": "Denver Nuggets"}, "away": {"name": "Utah Jazz"}}},
        {"teams": {"home": {"name": "Phoenix Suns"}, "away": {"name": "Golden State Warriors"}},
         "statistics": {"home": {"points": 70}, "away": {"points": 66}}}
    ]);
    let odds_feed = vec![
        odds_entry("Miami Heat", "Chicago Bulls", -120, 100),
        odds_entry("Los Angeles Lakers", "Boston Celtics", -150, 130),
        odds_entry("Phoenix Suns", "Golden State Warriors", 110, -130),
        odds_entry("New York Knicks", "Brooklyn Nets", -300, 250),
    ];
    (live_feed, odds_feed)
}

#[test]
fn normalization_is_idempotent() {
    let samples = [
        "The Los Angeles Lakers",
        "Philadelphia 76ers",
        "  the  THE the ",
        "T.H.E.",
        "Thé Rangers",
        "Brighton & Hove Albion",
        "th e",
        "Paris Saint-Germain",
        "",
    ];
    for s in samples {
        let once = normalize(Some(s));
        assert_eq!(normalize(Some(&once)), once, "input {s:?}");
    }
}

#[test]
fn normalization_ignores_case_and_article() {
    assert_eq!(
        normalize(Some("The Los Angeles Lakers")),
        normalize(Some("los angeles lakers"))
    );
}

#[test]
fn direct_total_beats_period_sum() {
    let events = live(json!([{
        "scores": {"home": {"total": 100}, "away": {"total": 98}},
        "periods": {"q1": {"home": 1, "away": 2}, "q2": {"home": 3, "away": 4}}
    }]));
    assert_eq!(
        resolve(&events[0]),
        Some(ScoreEstimate {
            home: 100.0,
            away: 98.0,
            estimated: false
        })
    );
}

#[test]
fn period_fallback_sums_each_side() {
    let events = live(json!([{
        "periods": {"q1": {"home": 10, "away": 12}, "q2": {"home": 8, "away": 9}}
    }]));
    assert_eq!(
        resolve(&events[0]),
        Some(ScoreEstimate {
            home: 18.0,
            away: 21.0,
            estimated: true
        })
    );
}

#[test]
fn no_score_data_resolves_to_none() {
    let events = live(json!([{"id": "g1"}]));
    assert_eq!(resolve(&events[0]), None);
}

#[test]
fn odds_feed_order_does_not_change_result() {
    let (live_feed, odds_feed) = slate();
    let live_events = live(live_feed);

    let forward = merge(&live_events, &parse_odds_events(Value::Array(odds_feed.clone())));

    let mut reversed = odds_feed.clone();
    reversed.reverse();
    let backward = merge(&live_events, &parse_odds_events(Value::Array(reversed)));

    let mut rotated = odds_feed;
    rotated.rotate_left(1);
    let shifted = merge(&live_events, &parse_odds_events(Value::Array(rotated)));

    assert_eq!(forward, backward);
    assert_eq!(forward, shifted);
}

#[test]
fn unmatched_live_event_gets_null_odds() {
    let (live_feed, odds_feed) = slate();
    let merged = merge(&live(live_feed), &parse_odds_events(Value::Array(odds_feed)));
    let nuggets = merged.iter().find(|m| m.id == "g3").expect("g3 present");
    assert_eq!(nuggets.odds, OddsQuote::unresolved());
    assert_eq!(
        serde_json::to_value(nuggets.odds).expect("json"),
        json!({"homeMoneyline": null, "awayMoneyline": null})
    );
}

#[test]
fn output_follows_live_feed_order() {
    let (live_feed, odds_feed) = slate();
    let live_events = live(live_feed);
    let mut odds_feed = odds_feed;
    odds_feed.reverse();

    let merged = merge(&live_events, &parse_odds_events(Value::Array(odds_feed)));
    let ids: Vec<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["g1", "g2", "g3", "Golden State Warriors-Phoenix Suns"]
    );
    // Knicks/Nets only exist in the odds feed
    assert_eq!(merged.len(), 4);
}

#[test]
fn every_tier_appears_in_one_pass() {
    let (live_feed, odds_feed) = slate();
    let merged = merge(&live(live_feed), &parse_odds_events(Value::Array(odds_feed)));

    assert_eq!(merged[0].score.map(|s| s.estimated), Some(false));
    assert_eq!(
        merged[1].score,
        Some(ScoreEstimate {
            home: 20.0,
            away: 25.0,
            estimated: true
        })
    );
    assert_eq!(merged[2].score, None);
    assert_eq!(
        merged[3].score,
        Some(ScoreEstimate {
            home: 70.0,
            away: 66.0,
            estimated: true
        })
    );
    assert_eq!(merged[3].odds.home_moneyline, Some(110.0));
    assert_eq!(merged[3].odds.away_moneyline, Some(-130.0));
}

#[test]
fn lakers_celtics_end_to_end() {
    let live_events = live(json!([{
        "id": "g1",
        "teams": {"home": {"name": "Lakers"}, "away": {"name": "Celtics"}},
        "scores": {"home": {"total": 100}, "away": {"total": 98}}
    }]));
    let odds_events = parse_odds_events(json!([{
        "home_team": "Los Angeles Lakers",
        "away_team": "Boston Celtics",
        "bookmakers": [{"markets": [{"outcomes": [
            {"name": "Los Angeles Lakers", "price": -150},
            {"name": "Boston Celtics", "price": 130}
        ]}]}]
    }]));

    let merged = merge(&live_events, &odds_events);
    assert_eq!(
        merged,
        vec![MergedEvent {
            id: "g1".into(),
            home_name: "Lakers".into(),
            away_name: "Celtics".into(),
            score: Some(ScoreEstimate {
                home: 100.0,
                away: 98.0,
                estimated: false
            }),
            odds: OddsQuote {
                home_moneyline: Some(-150.0),
                away_moneyline: Some(130.0)
            },
        }]
    );

    let encoded = serde_json::to_value(&merged).expect("json");
    assert_eq!(
        encoded,
        json!([{
            "id": "g1",
            "homeName": "Lakers",
            "awayName": "Celtics",
            "score": {"home": 100.0, "away": 98.0, "estimated": false},
            "odds": {"homeMoneyline": -150.0, "awayMoneyline": 130.0}
        }])
    );
    let decoded: Vec<MergedEvent> = serde_json::from_value(encoded).expect("decode");
    assert_eq!(decoded, merged);
}

#[test]
fn empty_inputs_produce_empty_output() {
    assert!(merge(&[], &[]).is_empty());
}

#[test]
fn repeated_merges_are_identical() {
    let (live_feed, odds_feed) = slate();
    let live_events = live(live_feed);
    let odds_events = parse_odds_events(Value::Array(odds_feed));
    assert_eq!(merge(&live_events, &odds_events), merge(&live_events, &odds_events));
}

#[test]
fn nickname_fallback_does_not_borrow_another_games_odds() {
    let live_events = live(json!([{
        "id": "g7",
        "teams": {"home": {"name": "Nets"}, "away": {"name": "Celtics"}}
    }]));
    let odds_events = parse_odds_events(json!([odds_entry(
        "Charlotte Hornets",
        "Boston Celtics",
        240,
        -300
    )]));

    let merged = merge(&live_events, &odds_events);
    assert_eq!(merged[0].odds, OddsQuote::unresolved());
}
