// A minimal BLS signature scheme (minimal-signature-size variant) built on
// hash-to-curve and the multi-pairing engine

use dpair_algorithms::bls12_381::{
    Engine, G1Affine, G1Projective, G2Affine, G2Projective, Scalar, Suite,
};
use dpair_api::{HashToCurve, PairingEngine};
use rand::rngs::OsRng;

fn keygen() -> (Scalar, G2Affine) {
    let sk = Scalar::random(OsRng);
    let pk = G2Affine::from(G2Projective::generator() * sk);
    (sk, pk)
}

fn sign(sk: &Scalar, dst: &[u8], msg: &[u8]) -> dpair_api::Result<G1Affine> {
    let h = G1Projective::hash_to_curve(msg, dst)?;
    Ok(G1Affine::from(h * sk))
}

fn verify(pk: &G2Affine, dst: &[u8], msg: &[u8], sig: &G1Affine) -> bool {
    let Ok(h) = G1Affine::hash_to_curve(msg, dst) else {
        return false;
    };
    // e(sig, G2) == e(H(m), pk)  <=>  e(-sig, G2) * e(H(m), pk) == 1
    let mut engine = Engine::new();
    engine
        .add_pair_inv_g1(sig, &G2Affine::generator())
        .add_pair(&h, pk);
    engine.check()
}

fn main() -> dpair_api::Result<()> {
    let dst = Suite::G1_XMD_SHA256_SSWU_RO.dst(b"DPAIR-SIG-EXAMPLE-");
    let (sk, pk) = keygen();

    let msg = b"attack at dawn";
    let sig = sign(&sk, &dst, msg)?;
    println!("signature: {}", hex::encode(sig.to_compressed()));
    println!("valid:     {}", verify(&pk, &dst, msg, &sig));
    println!("tampered:  {}", verify(&pk, &dst, b"attack at dusk", &sig));

    // signatures on the same message aggregate by addition
    let (sk2, pk2) = keygen();
    let sig2 = sign(&sk2, &dst, msg)?;
    let agg_sig = G1Affine::from(G1Projective::from(sig) + sig2);
    let agg_pk = G2Affine::from(G2Projective::from(pk) + pk2);
    println!("aggregate: {}", verify(&agg_pk, &dst, msg, &agg_sig));

    Ok(())
}
