// Encryption and bounded-search benchmarks.
//
// Decryption cost is dominated by the baby-step/giant-step search, so the
// one-shot path (table rebuilt per call) and the reusable decryptor are
// measured separately. Commitment opening uses the smaller search bound.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ark_std::rand::{rngs::StdRng, SeedableRng};

use veil_ledger::config::VALUE_DECRYPT_BOUND;
use veil_ledger::crypto::ValueDecryptor;
use veil_ledger::{
    decrypt_value, encrypt_value, generate_keys, open_commitment, CurveContext,
};

fn bench_encrypt(c: &mut Criterion) {
    let ctx = CurveContext::bn254();
    let mut rng = StdRng::seed_from_u64(42);
    let (public, _) = generate_keys(&ctx, "bench", &mut rng).unwrap();

    c.bench_function("encryption/encrypt_value", |b| {
        b.iter(|| encrypt_value(&public, black_box(12_345), &mut rng).unwrap());
    });
}

fn bench_decrypt(c: &mut Criterion) {
    let ctx = CurveContext::bn254();
    let mut rng = StdRng::seed_from_u64(42);
    let (public, private) = generate_keys(&ctx, "bench", &mut rng).unwrap();
    // Worst case for the giant steps: the top of the domain.
    let (ct, _, _) = encrypt_value(&public, VALUE_DECRYPT_BOUND - 1, &mut rng).unwrap();

    c.bench_function("encryption/decrypt_value_one_shot", |b| {
        b.iter(|| decrypt_value(&private, black_box(&ct)).unwrap());
    });

    let decryptor = ValueDecryptor::new(&private);
    c.bench_function("encryption/decrypt_value_reused_table", |b| {
        b.iter(|| decryptor.decrypt(black_box(&ct)).unwrap());
    });
}

fn bench_open_commitment(c: &mut Criterion) {
    let ctx = CurveContext::bn254();
    let mut rng = StdRng::seed_from_u64(42);
    let (public, _) = generate_keys(&ctx, "bench", &mut rng).unwrap();
    let (_, commitment, _) = encrypt_value(&public, 49_999, &mut rng).unwrap();

    c.bench_function("encryption/open_commitment", |b| {
        b.iter(|| open_commitment(&public, black_box(&commitment)).unwrap());
    });
}

criterion_group!(benches, bench_encrypt, bench_decrypt, bench_open_commitment);
criterion_main!(benches);
