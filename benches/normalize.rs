use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dwd_wfs::{parse_forecast_collection, parse_warning_collection};
use serde_json::{json, Value};

fn feature_collection(properties: Vec<Value>) -> Value {
    let features: Vec<Value> = properties
        .into_iter()
        .map(|p| json!({ "type": "Feature", "properties": p }))
        .collect();
    json!({
        "type": "FeatureCollection",
        "timeStamp": "2024-05-01T09:12:41.532Z",
        "numberReturned": features.len(),
        "features": features,
    })
}

fn warnings(count: usize) -> Value {
    feature_collection(
        (0..count)
            .map(|i| {
                json!({
                    "WARNCELLID": 808436003,
                    "ONSET": "2024-05-01T10:00:00Z",
                    "EXPIRES": "2024-05-01T18:00:00Z",
                    "EVENT": "STARKREGEN",
                    "EC_II": 61 + (i % 4),
                    "HEADLINE": "Amtliche WARNUNG vor STARKREGEN",
                    "DESCRIPTION": "Es tritt Starkregen mit Niederschlagsmengen um 20 l/m² auf.",
                    "URGENCY": if i % 3 == 0 { "Future" } else { "Immediate" },
                    "SEVERITY": ["Minor", "Moderate", "Severe", "Extreme"][i % 4],
                    "PARAMETERNAME": "Niederschlagsdauer;Niederschlagsmenge",
                    "PARAMETERVALUE": "1;20",
                    "EC_AREA_COLOR": "255 153 0",
                })
            })
            .collect(),
    )
}

fn pollen(days: usize) -> Value {
    let kinds = [
        (1, "Hasel"),
        (2, "Erle"),
        (3, "Esche"),
        (4, "Birke"),
        (5, "Graeser"),
        (6, "Roggen"),
        (7, "Beifuss"),
        (8, "Ambrosia"),
    ];
    feature_collection(
        kinds
            .iter()
            .flat_map(|(code, name)| {
                (0..days).map(move |day| {
                    json!({
                        "GF": 62,
                        "GEN": "Harz",
                        "EC_II": code,
                        "PARAMETER_NAME": name,
                        "FORECAST_DATE": format!("2024-05-{:02}Z", day + 1),
                        "POLLENINT": (code + day as i64) % 7,
                        "PARAMETER_VALUE": "1-2",
                        "EC_AREA_COLOR": "255 255 0",
                    })
                })
            })
            .collect(),
    )
}

fn bench_normalize(c: &mut Criterion) {
    let warnings = warnings(50);
    let pollen = pollen(3);
    c.bench_function("parse_warning_collection", |b| {
        b.iter(|| parse_warning_collection(black_box(&warnings)))
    });
    c.bench_function("parse_forecast_collection", |b| {
        b.iter(|| parse_forecast_collection(black_box(&pollen), black_box("POLLENINT")))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
