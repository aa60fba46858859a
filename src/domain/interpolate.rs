// Gap filling for reading sequences
use super::reading::{Circuit, Reading};

/// Fills missing balances by linear interpolation between the nearest known
/// neighbors, independently per circuit.
///
/// Index distance stands in for elapsed time, which assumes roughly uniform
/// sampling intervals. With a known value on only one side the gap is filled
/// flat from that side; an all-missing circuit fills with 0.
pub fn interpolate_missing(readings: &[Reading]) -> Vec<Reading> {
    let mut processed = readings.to_vec();
    for circuit in [Circuit::Light, Circuit::Ac] {
        for i in 0..processed.len() {
            if processed[i].balance(circuit).is_some() {
                continue;
            }
            let prev = processed[..i]
                .iter()
                .enumerate()
                .rev()
                .find_map(|(idx, r)| r.balance(circuit).map(|v| (idx, v)));
            let next = processed[i + 1..]
                .iter()
                .enumerate()
                .find_map(|(offset, r)| r.balance(circuit).map(|v| (i + 1 + offset, v)));
            let value = match (prev, next) {
                (Some((p, pv)), Some((n, nv))) => {
                    pv + (nv - pv) / (n - p) as f64 * (i - p) as f64
                }
                (Some((_, pv)), None) => pv,
                (None, Some((_, nv))) => nv,
                (None, None) => 0.0,
            };
            processed[i].set_balance(circuit, value);
        }
    }
    processed
}
