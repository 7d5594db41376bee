use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dpair_algorithms::bls12_381::{Engine, G1Affine, G1Projective, G2Affine, G2Projective};
use dpair_api::{HashToCurve, PairingEngine};
use rand::rngs::OsRng;

const DST: &[u8] = b"DPAIR-BENCH-BLS12381G2_XMD:SHA-256_SSWU_RO_";

/// Verify a BLS-style equation e(sig, G2) == e(H(m), pk) for increasing
/// numbers of aggregated messages
fn bench_aggregate_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate-verify");
    group.sample_size(10);

    for n in [1usize, 4, 16, 64] {
        let msgs: Vec<Vec<u8>> = (0..n).map(|i| format!("message {i}").into_bytes()).collect();
        let keys: Vec<G2Affine> = (0..n)
            .map(|_| G2Affine::from(G2Projective::random(OsRng)))
            .collect();
        let hashes: Vec<G1Affine> = msgs
            .iter()
            .map(|m| G1Affine::hash_to_curve(m, DST).unwrap())
            .collect();
        let sig = G1Affine::from(G1Projective::random(OsRng));

        group.bench_with_input(BenchmarkId::new("engine", n), &n, |b, _| {
            b.iter(|| {
                let mut engine = Engine::new();
                engine.add_pair_inv_g1(&sig, &G2Affine::generator());
                for (h, pk) in hashes.iter().zip(&keys) {
                    engine.add_pair(h, pk);
                }
                engine.check()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate_verify);
criterion_main!(benches);
