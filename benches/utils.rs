use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::{Value, json};

/// Generate n random VM payloads to use in the benchmark
pub fn generate_random_payloads(n: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42); // Fixed seed for reproducibility
    let mut payloads = Vec::with_capacity(n);

    for _ in 0..n {
        let disks_count = rng.random_range(1..5);
        let mut disks = Vec::with_capacity(disks_count);
        for _ in 0..disks_count {
            disks.push(json!({
                "image_id": rng.random_range(0..100).to_string(),
                "size": rng.random_range(1024..65536),
                "target": if rng.random_bool(0.5) { Value::Null } else { json!("vda") },
            }));
        }

        let tags: Vec<String> = (0..rng.random_range(0..6))
            .map(|_| random_string(&mut rng, 3, 8))
            .collect();

        let vm = json!({
            "VM": {
                "name": random_string(&mut rng, 5, 10),
                "cpu": rng.random_range(1..16),
                "memory": if rng.random_bool(0.8) { json!("1024") } else { json!("") },
                "tags": tags,
                "graphics": {
                    "type": "VNC",
                    "listen": "0.0.0.0",
                    "passwd": Value::Null,
                },
                "disk": disks,
            }
        });
        payloads.push(vm.to_string());
    }

    payloads
}

/// Generate a random string with length between min and max
fn random_string(rng: &mut StdRng, min_len: usize, max_len: usize) -> String {
    let charset = "abcdefghijklmnopqrstuvwxyz";
    let len = rng.random_range(min_len..=max_len);

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset.chars().nth(idx).unwrap()
        })
        .collect()
}
