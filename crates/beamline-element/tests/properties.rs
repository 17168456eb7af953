//! Property tests over every transfer builder.

use beamline_core::{PhaseMatrix, ReferenceParticle};
use beamline_element::{
    Drift, Generic, Marker, Quadrupole, RfCavity, SBend, Solenoid, TransferBuilder,
};
use proptest::prelude::*;

fn arb_reference() -> impl Strategy<Value = ReferenceParticle> {
    prop_oneof![
        Just(ReferenceParticle::unset()),
        (1.0e6f64..1.0e9, 1.0e3f64..1.0e9, 0.05f64..1.0).prop_map(|(es, ek, z)| {
            ReferenceParticle::new(es, ek).unwrap().with_charge(z)
        }),
    ]
}

/// A well-conditioned symmetric positive definite 7×7 matrix.
fn arb_covariance() -> impl Strategy<Value = PhaseMatrix> {
    prop::collection::vec(-1.0f64..1.0, 49).prop_map(|v| {
        let a = PhaseMatrix::from_row_slice(&v);
        a * a.transpose() + PhaseMatrix::identity() * 0.1
    })
}

fn builders(length: f64, k: f64) -> Vec<Box<dyn TransferBuilder>> {
    vec![
        Box::new(Marker::default()),
        Box::new(Generic::new(PhaseMatrix::identity() * 1.5, length)),
        Box::new(Drift::new(length)),
        Box::new(SBend::new(length, 0.2 * length.signum(), k).unwrap()),
        Box::new(Quadrupole::new(length, k)),
        Box::new(Solenoid::new(length, k / 1e3)),
        Box::new(RfCavity::new(length, 1.0e4, -30.0)),
    ]
}

fn max_asymmetry(m: &PhaseMatrix) -> f64 {
    (m - m.transpose()).amax() / m.amax().max(1.0)
}

proptest! {
    #[test]
    fn congruence_keeps_symmetry(
        reference in arb_reference(),
        sigma in arb_covariance(),
        length in 0.01f64..2.0,
        k in -20.0f64..20.0,
    ) {
        for b in builders(length, k) {
            let t = match b.transfer(&reference) {
                Ok(t) => t,
                // The cavity refuses an unset reference.
                Err(_) => continue,
            };
            let out = t * sigma * t.transpose();
            prop_assert!(
                max_asymmetry(&out) < 1e-10,
                "{} broke symmetry",
                b.type_name()
            );
        }
    }

    #[test]
    fn zero_strength_matches_drift(
        reference in arb_reference(),
        length in -2.0f64..2.0,
    ) {
        let drift = Drift::new(length).transfer(&reference).unwrap();
        let quad = Quadrupole::new(length, 0.0).transfer(&reference).unwrap();
        let sol = Solenoid::new(length, 0.0).transfer(&reference).unwrap();
        let bend = SBend::new(length, 0.0, 0.0).unwrap().transfer(&reference).unwrap();
        prop_assert_eq!(quad, drift);
        prop_assert_eq!(sol, drift);
        prop_assert_eq!(bend, drift);
    }

    #[test]
    fn transfer_is_deterministic(
        reference in arb_reference(),
        length in 0.01f64..2.0,
        k in -20.0f64..20.0,
    ) {
        for (a, b) in builders(length, k).iter().zip(builders(length, k).iter()) {
            prop_assert_eq!(a.transfer(&reference).ok(), b.transfer(&reference).ok());
        }
    }
}
