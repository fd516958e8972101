use fruitslot_core::{ProvablyFairRng, SlotEngine};

fn main() {
    // Example end-to-end spin
    let server_seed = "example-server-seed";
    let client_seed = "example-client-seed";
    let nonce = 1u64;
    let mut rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    let engine = SlotEngine::default();
    match engine.spin(100, &mut rng) {
        Ok(outcome) => println!(
            "server_seed_hash={} balance={} win={:?}\n{}",
            rng.server_seed_hash_hex(),
            outcome.balance,
            outcome.result.line,
            outcome.grid
        ),
        Err(e) => eprintln!("{e}"),
    }
}
