// Criterion benchmarks for the YachtRow discovery feed

use std::collections::HashSet;

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use yachtrow::core::{compute_feed, SwipeMachine};
use yachtrow::models::{BoatType, Listing, PreferenceSet, User};

const LOCATIONS: [&str; 5] = ["Miami, FL", "Monaco", "San Diego, CA", "Phuket, Thailand", "New York, NY"];

fn create_listing(id: usize) -> Listing {
    Listing {
        id: format!("listing{}", id),
        name: format!("Boat {}", id),
        description: "Benchmark listing".to_string(),
        price: 50_000.0 + (id % 100) as f64 * 10_000.0,
        image_urls: vec![],
        video_url: None,
        location: LOCATIONS[id % LOCATIONS.len()].to_string(),
        length_ft: 20.0 + (id % 80) as f64,
        boat_type: BoatType::ALL[id % BoatType::ALL.len()],
        manufacturer: None,
        year: 2000 + (id % 25) as u16,
        cabins: None,
        fuel_type: None,
        posted_by: User {
            id: "user1".to_string(),
            name: "Alice Skipper".to_string(),
            avatar_url: None,
            location: None,
        },
        posted_date: Utc::now(),
    }
}

fn create_preferences() -> PreferenceSet {
    PreferenceSet {
        location: Some("Miami".to_string()),
        boat_types: [BoatType::Sailboat, BoatType::MotorYacht, BoatType::Catamaran]
            .into_iter()
            .collect(),
        min_length_ft: Some(30.0),
        max_length_ft: Some(80.0),
    }
}

fn bench_compute_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_feed");
    let preferences = create_preferences();

    for size in [100usize, 1_000, 10_000] {
        let listings: Vec<Listing> = (0..size).map(create_listing).collect();
        let liked: HashSet<String> = (0..size).step_by(7).map(|i| format!("listing{}", i)).collect();
        let disliked: HashSet<String> = (0..size).step_by(11).map(|i| format!("listing{}", i)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &listings, |b, listings| {
            b.iter(|| {
                compute_feed(
                    black_box(listings),
                    black_box(&preferences),
                    black_box(&liked),
                    black_box(&disliked),
                )
            });
        });
    }

    group.finish();
}

fn bench_swipe_through(c: &mut Criterion) {
    let listings: Vec<Listing> = (0..500).map(create_listing).collect();
    let preferences = PreferenceSet::default();

    c.bench_function("swipe_through_500", |b| {
        b.iter(|| {
            let mut machine = SwipeMachine::new();
            let mut n = 0usize;
            while let Some(listing) = machine.state(&listings, &preferences).listing() {
                let id = listing.id.clone();
                if n % 2 == 0 {
                    machine.like(&id, &listings, &preferences);
                } else {
                    machine.dislike(&id, &listings, &preferences);
                }
                n += 1;
            }
            black_box(n)
        });
    });
}

criterion_group!(benches, bench_compute_feed, bench_swipe_through);
criterion_main!(benches);
