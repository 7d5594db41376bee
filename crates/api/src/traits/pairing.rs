//! Accumulating pairing engines

/// A stateful product-of-pairings accumulator
///
/// Pairs are added one at a time; `result` applies a single final
/// exponentiation to the whole product and leaves the engine empty so it can
/// be reused.
pub trait PairingEngine: Default {
    /// Left input group
    type G1;
    /// Right input group
    type G2;
    /// Target group
    type Gt: PartialEq;

    /// Multiply `e(p, q)` into the accumulated product
    fn add_pair(&mut self, p: &Self::G1, q: &Self::G2) -> &mut Self;

    /// Multiply `e(-p, q)` into the accumulated product
    fn add_pair_inv_g1(&mut self, p: &Self::G1, q: &Self::G2) -> &mut Self;

    /// Multiply `e(p, -q)` into the accumulated product
    fn add_pair_inv_g2(&mut self, p: &Self::G1, q: &Self::G2) -> &mut Self;

    /// Drop every pending pair and reset the product to one
    fn reset(&mut self) -> &mut Self;

    /// Final-exponentiate the product and reset the engine
    fn result(&mut self) -> Self::Gt;

    /// Whether the accumulated product is the identity of the target group
    fn check(&mut self) -> bool;

    /// Evaluate a single pairing
    fn pair(p: &Self::G1, q: &Self::G2) -> Self::Gt {
        let mut engine = Self::default();
        engine.add_pair(p, q);
        engine.result()
    }
}
