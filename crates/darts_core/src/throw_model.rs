//! # Throw Model
//!
//! **Aim + Error = Landing point**
//!
//! Scatter is isotropic: the miss distance is half-normal with scale σ and the
//! miss direction is uniform over [-π, π), independent of where the player
//! aimed. The error source is a trait so tests can script exact misses.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::collections::VecDeque;
use std::f64::consts::PI;

use crate::board::{AimTarget, Board, Hit, PolarCoordinate};
use crate::config::validate_sigma;
use crate::error::{DartsError, Result};

/// Displacement of one dart from its aim point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowError {
    /// Distance from the aim point (mm)
    pub magnitude: f64,
    /// Direction of the miss (radians), measured in the board frame
    pub direction: f64,
}

impl ThrowError {
    pub fn zero() -> Self {
        Self { magnitude: 0.0, direction: 0.0 }
    }

    pub fn new(magnitude: f64, direction: f64) -> Self {
        Self { magnitude, direction }
    }
}

/// Anything that can produce throw errors for a given scatter σ.
pub trait ErrorSource {
    fn next_error(&mut self, sigma: f64) -> Result<ThrowError>;
}

/// Sample one throw error: |N(0, σ)| distance, uniform direction.
pub fn sample_throw_error(sigma: f64, rng: &mut impl Rng) -> ThrowError {
    let n: f64 = StandardNormal.sample(rng);
    ThrowError { magnitude: (n * sigma).abs(), direction: rng.gen_range(-PI..PI) }
}

/// Error source backed by a random generator.
#[derive(Debug, Clone)]
pub struct RandomErrors<R> {
    rng: R,
}

impl<R: Rng> RandomErrors<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> ErrorSource for RandomErrors<R> {
    fn next_error(&mut self, sigma: f64) -> Result<ThrowError> {
        Ok(sample_throw_error(sigma, &mut self.rng))
    }
}

/// Fixed sequence of errors, ignoring σ. Running dry is an error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedErrors {
    errors: VecDeque<ThrowError>,
}

impl ScriptedErrors {
    pub fn new(errors: impl IntoIterator<Item = ThrowError>) -> Self {
        Self { errors: errors.into_iter().collect() }
    }

    /// Perfect darts, `count` of them.
    pub fn perfect(count: usize) -> Self {
        Self::new(std::iter::repeat(ThrowError::zero()).take(count))
    }

    pub fn remaining(&self) -> usize {
        self.errors.len()
    }
}

impl ErrorSource for ScriptedErrors {
    fn next_error(&mut self, _sigma: f64) -> Result<ThrowError> {
        self.errors.pop_front().ok_or(DartsError::ErrorSourceExhausted)
    }
}

/// Displace `aim` by `err`. A zero error returns the aim unchanged.
pub fn apply_error(aim: PolarCoordinate, err: &ThrowError) -> PolarCoordinate {
    if err.magnitude == 0.0 {
        return aim.normalized();
    }

    let (x, y) = aim.to_cartesian();
    let dx = err.magnitude * err.direction.cos();
    let dy = err.magnitude * err.direction.sin();

    PolarCoordinate::from_cartesian(x + dx, y + dy)
}

/// Throwing model for a player with scatter σ (mm).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowModel {
    sigma: f64,
}

impl ThrowModel {
    pub fn new(sigma: f64) -> Result<Self> {
        validate_sigma(sigma)?;
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Landing point for a dart aimed at `aim`.
    pub fn perturb(
        &self,
        aim: PolarCoordinate,
        source: &mut impl ErrorSource,
    ) -> Result<PolarCoordinate> {
        let err = source.next_error(self.sigma)?;
        Ok(apply_error(aim, &err))
    }

    /// Aim at `target`, scatter, and score the landing point.
    pub fn throw_at(
        &self,
        board: &Board,
        target: &AimTarget,
        source: &mut impl ErrorSource,
    ) -> Result<Hit> {
        let aim = board.aim_target_coordinate(target)?;
        let landing = self.perturb(aim, source)?;
        let hit = board.resolve(landing);
        tracing::trace!(
            target = %target,
            radius = landing.radius,
            angle = landing.angle,
            score = hit.score,
            "dart landed"
        );
        Ok(hit)
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ZoneKind;
    use crate::config::BullMode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_sigma_is_identity() {
        let model = ThrowModel::new(0.0).unwrap();
        let mut source = RandomErrors::new(ChaCha8Rng::seed_from_u64(42));
        let aim = PolarCoordinate::new(116.0, 1.3);
        for _ in 0..100 {
            assert_eq!(model.perturb(aim, &mut source).unwrap(), aim);
        }

        let wrapped = PolarCoordinate::new(64.0, -PI / 2.0);
        let out = model.perturb(wrapped, &mut source).unwrap();
        assert!((out.angle - 1.5 * PI).abs() < 1e-12);
        assert_eq!(out.radius, 64.0);
    }

    #[test]
    fn test_scripted_error_moves_dart() {
        let model = ThrowModel::new(10.0).unwrap();
        // Aim at the bull centre and miss straight up by 64mm: lands in the 6 sector
        let mut source = ScriptedErrors::new([ThrowError::new(64.0, PI / 2.0)]);
        let landing = model.perturb(PolarCoordinate::new(0.0, 0.0), &mut source).unwrap();
        assert!((landing.radius - 64.0).abs() < 1e-9);
        assert!((landing.angle - PI / 2.0).abs() < 1e-9);

        let board = Board::new(BullMode::Fused);
        assert_eq!(board.resolve(landing), Hit { score: 6, zone: ZoneKind::SingleInner, sector: 6 });
    }

    #[test]
    fn test_error_opposite_aim_crosses_centre() {
        // Triple 20 aimed, thrown 232mm straight back: lands on the other side at T3
        let aim = PolarCoordinate::new(116.0, 0.0);
        let landed = apply_error(aim, &ThrowError::new(232.0, PI));
        assert!((landed.radius - 116.0).abs() < 1e-9);
        assert!((landed.angle - PI).abs() < 1e-9);
    }

    #[test]
    fn test_scripted_source_runs_dry() {
        let model = ThrowModel::new(5.0).unwrap();
        let mut source = ScriptedErrors::perfect(1);
        let aim = PolarCoordinate::new(0.0, 0.0);
        assert!(model.perturb(aim, &mut source).is_ok());
        assert_eq!(source.remaining(), 0);
        assert_eq!(model.perturb(aim, &mut source), Err(DartsError::ErrorSourceExhausted));
    }

    #[test]
    fn test_negative_sigma_rejected() {
        assert!(ThrowModel::new(-0.5).is_err());
        assert!(ThrowModel::new(f64::NAN).is_err());
    }

    #[test]
    fn test_error_distribution_scale() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let sigma = 20.0;
        let errors: Vec<_> = (0..4000).map(|_| sample_throw_error(sigma, &mut rng)).collect();

        // Half-normal mean is σ·sqrt(2/π) ≈ 0.798σ
        let mean = errors.iter().map(|e| e.magnitude).sum::<f64>() / errors.len() as f64;
        assert!((mean - 0.798 * sigma).abs() < 1.0, "mean miss distance {}", mean);

        assert!(errors.iter().all(|e| e.magnitude >= 0.0));
        assert!(errors.iter().all(|e| (-PI..PI).contains(&e.direction)));

        let upward = errors.iter().filter(|e| e.direction > 0.0).count();
        assert!((1700..2300).contains(&upward), "direction skewed: {}", upward);
    }

    #[test]
    fn test_throw_at_perfect_dart_hits_target() {
        let board = Board::new(BullMode::Split);
        let model = ThrowModel::new(30.0).unwrap();
        let mut source = ScriptedErrors::perfect(3);
        for target in [AimTarget::triple(19), AimTarget::double(8), AimTarget::outer_bull(BullMode::Split)] {
            let hit = model.throw_at(&board, &target, &mut source).unwrap();
            assert_eq!(hit.score, target.score());
            assert_eq!(hit.zone, target.zone);
        }
    }

    #[test]
    fn test_throw_at_invalid_target() {
        let board = Board::new(BullMode::Fused);
        let model = ThrowModel::new(30.0).unwrap();
        let mut source = ScriptedErrors::perfect(1);
        let err = model.throw_at(&board, &AimTarget::triple(25), &mut source).unwrap_err();
        assert!(matches!(err, DartsError::InvalidZone { value: 25, zone: ZoneKind::Triple }));
        // The dart is never thrown
        assert_eq!(source.remaining(), 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the landing point is exactly `magnitude` away from the aim
            #[test]
            fn prop_miss_distance_matches_magnitude(
                r in 0.0f64..198.0,
                theta in 0.0f64..6.28,
                magnitude in 0.0f64..100.0,
                direction in -3.14f64..3.14
            ) {
                let aim = PolarCoordinate::new(r, theta);
                let landed = apply_error(aim, &ThrowError::new(magnitude, direction));
                let (ax, ay) = aim.to_cartesian();
                let (lx, ly) = landed.to_cartesian();
                prop_assert!(((lx - ax).hypot(ly - ay) - magnitude).abs() < 1e-6);
                prop_assert!(landed.angle >= 0.0 && landed.angle < std::f64::consts::TAU);
            }
        }
    }
}
