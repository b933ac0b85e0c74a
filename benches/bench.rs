// Criterion benchmarks for Tour Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tour_match::core::{calculate_place_score, normalize_profile, Recommender};
use tour_match::models::{
    AgeRange, HealthConsiderations, Place, RawAge, ScoringWeights, Suitability, TravelerProfileInput,
};

const PLACE_TYPES: [&str; 5] = ["Beach", "Nature", "Historical", "Religious", "Educational"];
const HOBBIES: [&str; 5] = ["Surfing", "Hiking", "Photography", "Relaxation", "Sightseeing"];
const CONDITIONS: [&str; 3] = ["Asthma", "Back Pain", "Heart Disease"];

fn create_place(id: usize) -> Place {
    let not_recommended_for = if id % 4 == 0 {
        vec![CONDITIONS[id % CONDITIONS.len()].to_string()]
    } else {
        vec![]
    };

    Place {
        id: id.to_string(),
        name: format!("Place {}", id),
        place_type: vec![
            PLACE_TYPES[id % PLACE_TYPES.len()].to_string(),
            PLACE_TYPES[(id + 2) % PLACE_TYPES.len()].to_string(),
        ],
        suitable_for: Suitability {
            age_range: Some(AgeRange::new((id % 20) as i64, 60 + (id % 30) as i64)),
            hobbies: vec![
                HOBBIES[id % HOBBIES.len()].to_string(),
                HOBBIES[(id + 1) % HOBBIES.len()].to_string(),
            ],
            climate: vec![if id % 3 == 0 { "Cold" } else { "Tropical" }.to_string()],
            health_considerations: HealthConsiderations {
                not_recommended_for,
                special_facilities: vec![],
            },
        },
        ..Default::default()
    }
}

fn create_profile() -> TravelerProfileInput {
    TravelerProfileInput {
        age: Some(RawAge::Text("34".to_string())),
        gender: Some("female".to_string()),
        place_types: Some(vec!["Beach".to_string(), "Nature".to_string()]),
        hobbies: Some(vec!["Hiking".to_string(), "Photography".to_string()]),
        climate: Some("Tropical".to_string()),
        diseases: Some(vec!["Asthma".to_string()]),
        physical_disorders: Some(vec![]),
    }
}

fn bench_normalize_profile(c: &mut Criterion) {
    let input = create_profile();

    c.bench_function("normalize_profile", |b| {
        b.iter(|| normalize_profile(black_box(&input)))
    });
}

fn bench_place_score(c: &mut Criterion) {
    let profile = normalize_profile(&create_profile()).unwrap();
    let place = create_place(7);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_place_score", |b| {
        b.iter(|| calculate_place_score(black_box(&profile), black_box(&place), black_box(&weights)))
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::with_defaults();
    let input = create_profile();

    let mut group = c.benchmark_group("recommend");

    for place_count in [10, 50, 100, 500, 1000].iter() {
        let places: Vec<Place> = (0..*place_count).map(create_place).collect();

        group.bench_with_input(BenchmarkId::new("recommend", place_count), place_count, |b, _| {
            b.iter(|| recommender.recommend(black_box(&input), black_box(&places), None))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize_profile, bench_place_score, bench_recommend);

criterion_main!(benches);
