//! Dartboard geometry
//!
//! Bidirectional mapping between scoring semantics and the board's polar frame.
//!
//! ## Coordinate System
//! - radius: millimetres from the centre of the bull (0 - 198 on the board)
//! - angle: radians in [0, 2π), the centre of the 20 sector sits at 0 and
//!   sectors follow the standard ordering in steps of π/10
//!
//! Radial bands are upper-inclusive (`r <= 9` is the inner bull), and an
//! angular boundary belongs to the sector whose upper bound equals it.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::config::BullMode;
use crate::error::{DartsError, Result};

/// Physical ring radii (mm), outer edge of each band
pub mod radius {
    pub const INNER_BULL: f64 = 9.0;
    pub const OUTER_BULL: f64 = 22.0;
    pub const INNER_SINGLE: f64 = 106.0;
    pub const TRIPLE: f64 = 126.0;
    pub const OUTER_SINGLE: f64 = 178.0;
    pub const DOUBLE: f64 = 198.0;

    /// Board edge; anything further out scores nothing.
    pub const BOARD: f64 = DOUBLE;
}

/// Sector values clockwise-from-top on a real board, here counted upwards in angle.
pub const SECTOR_ORDER: [u32; 20] =
    [20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5];

/// Angular width of one sector (18°).
pub const SECTOR_WIDTH: f64 = PI / 10.0;

const HALF_SECTOR: f64 = PI / 20.0;

/// Upper bound of every sector, in table order. Sector 20 also owns everything
/// above the last bound (it straddles angle 0).
const SECTOR_UPPER_BOUNDS: [(u32, f64); 20] = [
    (20, 1.0 * HALF_SECTOR),
    (1, 3.0 * HALF_SECTOR),
    (18, 5.0 * HALF_SECTOR),
    (4, 7.0 * HALF_SECTOR),
    (13, 9.0 * HALF_SECTOR),
    (6, 11.0 * HALF_SECTOR),
    (10, 13.0 * HALF_SECTOR),
    (15, 15.0 * HALF_SECTOR),
    (2, 17.0 * HALF_SECTOR),
    (17, 19.0 * HALF_SECTOR),
    (3, 21.0 * HALF_SECTOR),
    (19, 23.0 * HALF_SECTOR),
    (7, 25.0 * HALF_SECTOR),
    (16, 27.0 * HALF_SECTOR),
    (8, 29.0 * HALF_SECTOR),
    (11, 31.0 * HALF_SECTOR),
    (14, 33.0 * HALF_SECTOR),
    (9, 35.0 * HALF_SECTOR),
    (12, 37.0 * HALF_SECTOR),
    (5, 39.0 * HALF_SECTOR),
];

/// Scoring zone of a dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    InnerBull,
    OuterBull,
    SingleInner,
    SingleOuter,
    Double,
    Triple,
    OutOfBoard,
}

impl ZoneKind {
    /// Multiplier applied to the sector value. Bulls carry their own value.
    pub fn multiplier(self) -> u32 {
        match self {
            ZoneKind::SingleInner | ZoneKind::SingleOuter => 1,
            ZoneKind::Double => 2,
            ZoneKind::Triple => 3,
            ZoneKind::InnerBull | ZoneKind::OuterBull => 1,
            ZoneKind::OutOfBoard => 0,
        }
    }

    pub fn is_bull(self) -> bool {
        matches!(self, ZoneKind::InnerBull | ZoneKind::OuterBull)
    }

    fn from_radius(r: f64) -> ZoneKind {
        if !(0.0..=radius::BOARD).contains(&r) {
            ZoneKind::OutOfBoard
        } else if r <= radius::INNER_BULL {
            ZoneKind::InnerBull
        } else if r <= radius::OUTER_BULL {
            ZoneKind::OuterBull
        } else if r <= radius::INNER_SINGLE {
            ZoneKind::SingleInner
        } else if r <= radius::TRIPLE {
            ZoneKind::Triple
        } else if r <= radius::OUTER_SINGLE {
            ZoneKind::SingleOuter
        } else {
            ZoneKind::Double
        }
    }

    /// Radius aimed at for this zone: the middle of its band.
    fn aim_radius(self) -> Option<f64> {
        match self {
            ZoneKind::InnerBull => Some(0.0),
            // Any angle works for the ring around the inner bull; 15.5mm sits
            // 6.5mm from both of its edges.
            ZoneKind::OuterBull => Some((radius::INNER_BULL + radius::OUTER_BULL) / 2.0),
            ZoneKind::SingleInner => Some((radius::OUTER_BULL + radius::INNER_SINGLE) / 2.0),
            ZoneKind::Triple => Some((radius::INNER_SINGLE + radius::TRIPLE) / 2.0),
            ZoneKind::SingleOuter => Some((radius::TRIPLE + radius::OUTER_SINGLE) / 2.0),
            ZoneKind::Double => Some((radius::OUTER_SINGLE + radius::DOUBLE) / 2.0),
            ZoneKind::OutOfBoard => None,
        }
    }
}

/// Point in the board's polar frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarCoordinate {
    pub radius: f64,
    pub angle: f64,
}

impl PolarCoordinate {
    pub fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }

    /// Same point with the angle folded into [0, 2π).
    pub fn normalized(self) -> Self {
        Self { radius: self.radius, angle: normalize_angle(self.angle) }
    }

    pub fn to_cartesian(self) -> (f64, f64) {
        (self.radius * self.angle.cos(), self.radius * self.angle.sin())
    }

    pub fn from_cartesian(x: f64, y: f64) -> Self {
        Self { radius: x.hypot(y), angle: normalize_angle(y.atan2(x)) }
    }
}

pub(crate) fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// One sector the player aims at.
///
/// `sector` is the base value 1-20 for ring zones, and the bull's own value
/// (25 or 50) for bull zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AimTarget {
    pub sector: u32,
    pub zone: ZoneKind,
}

impl AimTarget {
    pub fn new(sector: u32, zone: ZoneKind) -> Self {
        Self { sector, zone }
    }

    pub fn single(sector: u32) -> Self {
        Self::new(sector, ZoneKind::SingleInner)
    }

    pub fn double(sector: u32) -> Self {
        Self::new(sector, ZoneKind::Double)
    }

    pub fn triple(sector: u32) -> Self {
        Self::new(sector, ZoneKind::Triple)
    }

    pub fn inner_bull() -> Self {
        Self::new(50, ZoneKind::InnerBull)
    }

    pub fn outer_bull(bull_mode: BullMode) -> Self {
        Self::new(bull_mode.outer_bull_value(), ZoneKind::OuterBull)
    }

    /// Points scored if the dart lands where aimed.
    pub fn score(&self) -> u32 {
        self.sector * self.zone.multiplier()
    }
}

impl fmt::Display for AimTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.zone {
            ZoneKind::InnerBull => write!(f, "BULL"),
            ZoneKind::OuterBull => write!(f, "OB{}", self.sector),
            ZoneKind::SingleInner | ZoneKind::SingleOuter => write!(f, "S{}", self.sector),
            ZoneKind::Double => write!(f, "D{}", self.sector),
            ZoneKind::Triple => write!(f, "T{}", self.sector),
            ZoneKind::OutOfBoard => write!(f, "OUT"),
        }
    }
}

/// Where a dart landed and what it scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub score: u32,
    pub zone: ZoneKind,
    /// Base sector value (bull value for bull zones, 0 off the board)
    pub sector: u32,
}

impl Hit {
    pub fn miss() -> Self {
        Self { score: 0, zone: ZoneKind::OutOfBoard, sector: 0 }
    }
}

/// Board for one bull configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    bull_mode: BullMode,
}

impl Board {
    pub fn new(bull_mode: BullMode) -> Self {
        Self { bull_mode }
    }

    pub fn bull_mode(&self) -> BullMode {
        self.bull_mode
    }

    /// Centre of the zone for `sector` in polar coordinates.
    pub fn aim_coordinate(&self, sector: u32, zone: ZoneKind) -> Result<PolarCoordinate> {
        let invalid = DartsError::InvalidZone { value: sector, zone };
        let radius = zone.aim_radius().ok_or_else(|| invalid.clone())?;

        let angle = match zone {
            ZoneKind::InnerBull if sector == 50 => 0.0,
            ZoneKind::OuterBull if sector == self.bull_mode.outer_bull_value() => 0.0,
            ZoneKind::InnerBull | ZoneKind::OuterBull => return Err(invalid),
            _ => sector_index(sector).ok_or(invalid)? as f64 * SECTOR_WIDTH,
        };

        Ok(PolarCoordinate { radius, angle })
    }

    pub fn aim_target_coordinate(&self, target: &AimTarget) -> Result<PolarCoordinate> {
        self.aim_coordinate(target.sector, target.zone)
    }

    /// Score a landing point.
    pub fn resolve(&self, coordinate: PolarCoordinate) -> Hit {
        match ZoneKind::from_radius(coordinate.radius) {
            ZoneKind::OutOfBoard => Hit::miss(),
            ZoneKind::InnerBull => Hit { score: 50, zone: ZoneKind::InnerBull, sector: 50 },
            ZoneKind::OuterBull => {
                let value = self.bull_mode.outer_bull_value();
                Hit { score: value, zone: ZoneKind::OuterBull, sector: value }
            }
            zone => {
                let sector = sector_at(coordinate.angle);
                Hit { score: sector * zone.multiplier(), zone, sector }
            }
        }
    }
}

fn sector_index(sector: u32) -> Option<usize> {
    SECTOR_ORDER.iter().position(|&v| v == sector)
}

/// Sector value owning `angle`.
pub fn sector_at(angle: f64) -> u32 {
    let theta = normalize_angle(angle);
    SECTOR_UPPER_BOUNDS
        .iter()
        .find(|(_, upper)| theta <= *upper)
        .map(|(value, _)| *value)
        .unwrap_or(20)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RING_ZONES: [ZoneKind; 4] =
        [ZoneKind::SingleInner, ZoneKind::Triple, ZoneKind::SingleOuter, ZoneKind::Double];

    #[test]
    fn test_sector_table_is_a_permutation() {
        let mut values = SECTOR_ORDER.to_vec();
        values.sort_unstable();
        assert_eq!(values, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_aim_radii_are_band_midpoints() {
        let board = Board::new(BullMode::Fused);
        assert_eq!(board.aim_coordinate(50, ZoneKind::InnerBull).unwrap().radius, 0.0);
        assert_eq!(board.aim_coordinate(50, ZoneKind::OuterBull).unwrap().radius, 15.5);
        assert_eq!(board.aim_coordinate(7, ZoneKind::SingleInner).unwrap().radius, 64.0);
        assert_eq!(board.aim_coordinate(7, ZoneKind::Triple).unwrap().radius, 116.0);
        assert_eq!(board.aim_coordinate(7, ZoneKind::SingleOuter).unwrap().radius, 152.0);
        assert_eq!(board.aim_coordinate(7, ZoneKind::Double).unwrap().radius, 188.0);
    }

    #[test]
    fn test_outer_bull_aim_stays_in_ring() {
        for (mode, score) in [(BullMode::Fused, 50), (BullMode::Split, 25)] {
            let board = Board::new(mode);
            let aim = board.aim_target_coordinate(&AimTarget::outer_bull(mode)).unwrap();
            assert!(aim.radius > radius::INNER_BULL && aim.radius < radius::OUTER_BULL);
            assert_eq!(aim.radius - radius::INNER_BULL, radius::OUTER_BULL - aim.radius);

            let hit = board.resolve(aim);
            assert_eq!((hit.zone, hit.score), (ZoneKind::OuterBull, score));
        }
    }

    #[test]
    fn test_aim_angles_follow_sector_order() {
        let board = Board::new(BullMode::Fused);
        assert_eq!(board.aim_coordinate(20, ZoneKind::Triple).unwrap().angle, 0.0);
        let one = board.aim_coordinate(1, ZoneKind::Triple).unwrap().angle;
        assert!((one - PI / 10.0).abs() < 1e-12);
        let five = board.aim_coordinate(5, ZoneKind::Double).unwrap().angle;
        assert!((five - 19.0 * PI / 10.0).abs() < 1e-12);
        let nine = board.aim_coordinate(9, ZoneKind::Double).unwrap().angle;
        assert!((nine - 17.0 * PI / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_aim_rejects_invalid_pairs() {
        let board = Board::new(BullMode::Split);
        assert!(matches!(
            board.aim_coordinate(20, ZoneKind::OutOfBoard),
            Err(DartsError::InvalidZone { .. })
        ));
        assert!(board.aim_coordinate(0, ZoneKind::Triple).is_err());
        assert!(board.aim_coordinate(21, ZoneKind::Double).is_err());
        assert!(board.aim_coordinate(25, ZoneKind::InnerBull).is_err());
        assert!(board.aim_coordinate(50, ZoneKind::OuterBull).is_err());
        assert!(board.aim_coordinate(25, ZoneKind::OuterBull).is_ok());

        let fat = Board::new(BullMode::Fused);
        assert!(fat.aim_coordinate(25, ZoneKind::OuterBull).is_err());
        assert!(fat.aim_coordinate(50, ZoneKind::OuterBull).is_ok());
    }

    #[test]
    fn test_resolve_radial_bands() {
        let board = Board::new(BullMode::Split);
        let at = |r: f64| board.resolve(PolarCoordinate::new(r, 0.0));

        assert_eq!(at(0.0).zone, ZoneKind::InnerBull);
        assert_eq!(at(9.0).zone, ZoneKind::InnerBull);
        assert_eq!(at(9.01).score, 25);
        assert_eq!(at(22.0).zone, ZoneKind::OuterBull);
        assert_eq!(at(22.5), Hit { score: 20, zone: ZoneKind::SingleInner, sector: 20 });
        assert_eq!(at(106.0).zone, ZoneKind::SingleInner);
        assert_eq!(at(110.0).score, 60);
        assert_eq!(at(130.0).zone, ZoneKind::SingleOuter);
        assert_eq!(at(198.0).score, 40);
        assert_eq!(at(198.5), Hit::miss());
        assert_eq!(at(-1.0), Hit::miss());
    }

    #[test]
    fn test_fused_outer_bull_scores_fifty() {
        let board = Board::new(BullMode::Fused);
        let hit = board.resolve(PolarCoordinate::new(15.0, 2.0));
        assert_eq!(hit, Hit { score: 50, zone: ZoneKind::OuterBull, sector: 50 });
    }

    #[test]
    fn test_sector_boundaries_are_upper_inclusive() {
        assert_eq!(sector_at(0.0), 20);
        assert_eq!(sector_at(HALF_SECTOR), 20);
        assert_eq!(sector_at(HALF_SECTOR + 1e-9), 1);
        assert_eq!(sector_at(3.0 * HALF_SECTOR), 1);
        assert_eq!(sector_at(39.0 * HALF_SECTOR), 5);
        assert_eq!(sector_at(39.0 * HALF_SECTOR + 1e-9), 20);
        assert_eq!(sector_at(-0.01), 20);
        assert_eq!(sector_at(TAU + SECTOR_WIDTH), 1);
    }

    #[test]
    fn test_aim_target_scores() {
        assert_eq!(AimTarget::triple(20).score(), 60);
        assert_eq!(AimTarget::double(16).score(), 32);
        assert_eq!(AimTarget::single(5).score(), 5);
        assert_eq!(AimTarget::inner_bull().score(), 50);
        assert_eq!(AimTarget::outer_bull(BullMode::Split).score(), 25);
        assert_eq!(AimTarget::triple(19).to_string(), "T19");
        assert_eq!(AimTarget::inner_bull().to_string(), "BULL");
    }

    #[test]
    fn test_round_trip_every_legal_pair() {
        for mode in [BullMode::Fused, BullMode::Split] {
            let board = Board::new(mode);
            for sector in 1..=20 {
                for zone in RING_ZONES {
                    let hit = board.resolve(board.aim_coordinate(sector, zone).unwrap());
                    assert_eq!((hit.sector, hit.zone), (sector, zone));
                    assert_eq!(hit.score, AimTarget::new(sector, zone).score());
                }
            }
            for target in [AimTarget::inner_bull(), AimTarget::outer_bull(mode)] {
                let hit = board.resolve(board.aim_target_coordinate(&target).unwrap());
                assert_eq!((hit.sector, hit.zone), (target.sector, target.zone));
            }
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a ring hit always scores base value times the ring multiplier
            #[test]
            fn prop_resolve_score_consistent(r in 0.0f64..250.0, theta in -10.0f64..10.0) {
                let board = Board::new(BullMode::Split);
                let hit = board.resolve(PolarCoordinate::new(r, theta));
                match hit.zone {
                    ZoneKind::OutOfBoard => prop_assert_eq!(hit.score, 0),
                    ZoneKind::InnerBull => prop_assert_eq!(hit.score, 50),
                    ZoneKind::OuterBull => prop_assert_eq!(hit.score, 25),
                    zone => {
                        prop_assert!((1..=20).contains(&hit.sector));
                        prop_assert_eq!(hit.score, hit.sector * zone.multiplier());
                    }
                }
            }

            /// Property: cartesian conversion preserves the point
            #[test]
            fn prop_cartesian_round_trip(r in 0.1f64..200.0, theta in 0.0f64..6.28) {
                let p = PolarCoordinate::new(r, theta);
                let (x, y) = p.to_cartesian();
                let back = PolarCoordinate::from_cartesian(x, y);
                prop_assert!((back.radius - r).abs() < 1e-9);
                prop_assert!((back.angle - theta).abs() < 1e-9);
            }
        }
    }
}
