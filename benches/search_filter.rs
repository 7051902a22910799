use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use canteen_menu::models::Dish;
use canteen_menu::services::search_meals;

const NAMES: &[&str] = &[
    "Idli", "Masala Dosa", "Poha", "Upma", "Jeera Rice", "Dal Tadka", "Paneer Butter Masala",
    "Veg Biryani", "Tomato Soup", "Chapati", "Aloo Gobi", "Gulab Jamun",
];

fn meal(prefix: &str, size: usize) -> Vec<Dish> {
    (0..size)
        .map(|i| {
            Dish::new(
                format!("{}-{}", prefix, i),
                format!("{} {}", NAMES[i % NAMES.len()], i),
                i.to_string(),
            )
        })
        .collect()
}

fn bench_search_meals(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_meals");

    for size in [10usize, 100, 1000] {
        let breakfast = meal("b", size);
        let lunch = meal("l", size);
        let dinner = meal("d", size);

        for query in ["i", "masala", "nothing matches"] {
            group.bench_with_input(
                BenchmarkId::new(query, size),
                &(&breakfast, &lunch, &dinner),
                |b, (breakfast, lunch, dinner)| {
                    b.iter(|| search_meals(black_box(query), breakfast, lunch, dinner))
                },
            );
        }
    }

    group.finish();
}

fn bench_blank_query(c: &mut Criterion) {
    let breakfast = meal("b", 1000);
    let lunch = meal("l", 1000);
    let dinner = meal("d", 1000);

    c.bench_function("search_meals_blank_query", |b| {
        b.iter(|| search_meals(black_box("   "), &breakfast, &lunch, &dinner))
    });
}

criterion_group!(benches, bench_search_meals, bench_blank_query);
criterion_main!(benches);
