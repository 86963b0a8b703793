#![allow(dead_code, reason = "shared between bench binaries")]

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::{Value, json};

/// Expression evaluated by every benchmark, written in the syntax both
/// engines accept.
pub const EXPRESSION: &str =
    "user.age * 2 + items.length % 3 > 40 && user.active || show_details";

/// Generate n random contexts to use in the benchmark
pub fn generate_random_contexts(n: usize) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(42); // Fixed seed for reproducibility
    let mut contexts = Vec::with_capacity(n);

    for _ in 0..n {
        let name = random_string(&mut rng, 5, 10);
        let age = rng.random_range(18..80);
        let is_active = rng.random_bool(0.7);

        let items_count = rng.random_range(3..10);
        let items: Vec<Value> = (0..items_count)
            .map(|_| {
                json!({
                    "name": random_string(&mut rng, 3, 8),
                    "value": rng.random_range(10..1000),
                })
            })
            .collect();

        contexts.push(json!({
            "user": {
                "name": name,
                "age": age,
                "active": is_active
            },
            "items": items,
            "show_details": rng.random_bool(0.8),
        }));
    }

    contexts
}

/// Generate a random string with length between min and max
fn random_string(rng: &mut StdRng, min_len: usize, max_len: usize) -> String {
    let len = rng.random_range(min_len..=max_len);
    (0..len)
        .map(|_| char::from(rng.random_range(b'a'..=b'z')))
        .collect()
}

// Print binary size information - can be used from individual benchmarks
pub fn print_binary_size() {
    let binary_path = std::env::current_exe().unwrap();
    let metadata = std::fs::metadata(binary_path.clone()).unwrap();
    let size_bytes = metadata.len();
    let size_kb = size_bytes as f64 / 1024.0;

    println!("Binary size: {:.2} KB ({} bytes)", size_kb, size_bytes);
}
