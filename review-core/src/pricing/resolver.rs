//! Tier and displacement cost lookup

use super::tables::{ClientType, PricingTier, table_for};
use crate::money::round_money;
use rust_decimal::Decimal;
use shared::{Displacement, KmOption};

/// Distance contributed by the fixed bands
const UP_TO_50_KM: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const UP_TO_100_KM: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Pick the pricing tier for a total distance.
///
/// Returns the first tier (ascending `max_km`) that covers `total_km`,
/// falling back to the last tier. Never fails.
pub fn rate_for_distance(total_km: Decimal, client_type: ClientType) -> &'static PricingTier {
    let table = table_for(client_type);
    table
        .tiers
        .iter()
        .find(|tier| tier.covers(total_km))
        .unwrap_or_else(|| table.last_tier())
}

/// Travel cost of one displacement
///
/// Fixed bands use the table's flat fee; above 100 km is billed per km
/// and rounded to cents. Negative `km_total` counts as zero here.
pub fn displacement_cost(displacement: &Displacement, client_type: ClientType) -> Decimal {
    let table = table_for(client_type);
    match displacement.km_option {
        KmOption::None => Decimal::ZERO,
        KmOption::UpTo50 => table.flat_fee_up_to_50,
        KmOption::UpTo100 => table.flat_fee_up_to_100,
        KmOption::Above100 => {
            let km = displacement.km_total.max(Decimal::ZERO);
            round_money(km * table.per_km_rate)
        }
    }
}

/// Distance one displacement contributes to tier selection
pub fn displacement_km(displacement: &Displacement) -> Decimal {
    match displacement.km_option {
        KmOption::None => Decimal::ZERO,
        KmOption::UpTo50 => UP_TO_50_KM,
        KmOption::UpTo100 => UP_TO_100_KM,
        KmOption::Above100 if displacement.km_total > Decimal::ZERO => displacement.km_total,
        KmOption::Above100 => Decimal::ZERO,
    }
}

/// Total distance over all displacements
pub fn total_displacement_km(displacements: &[Displacement]) -> Decimal {
    displacements.iter().map(displacement_km).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::tables::{EXISTING_CLIENT_TABLE, NEW_CLIENT_TABLE};

    fn disp(option: KmOption, km_total: i64) -> Displacement {
        Displacement {
            km_option: option,
            km_total: Decimal::from(km_total),
            vehicle_id: None,
        }
    }

    #[test]
    fn test_rate_for_zero_km_existing_client() {
        let tier = rate_for_distance(Decimal::ZERO, ClientType::Existing);
        assert_eq!(tier.rate, Decimal::from(150));
        assert_eq!(tier.min_hours, Decimal::from(2));
    }

    #[test]
    fn test_rate_for_distance_boundaries_are_inclusive() {
        let t50 = rate_for_distance(Decimal::from(50), ClientType::New);
        assert_eq!(t50, &NEW_CLIENT_TABLE.tiers[0]);
        let t51 = rate_for_distance(Decimal::new(501, 1), ClientType::New);
        assert_eq!(t51, &NEW_CLIENT_TABLE.tiers[1]);
        let t100 = rate_for_distance(Decimal::from(100), ClientType::New);
        assert_eq!(t100, &NEW_CLIENT_TABLE.tiers[1]);
        let huge = rate_for_distance(Decimal::from(100_000), ClientType::New);
        assert_eq!(huge, NEW_CLIENT_TABLE.last_tier());
    }

    #[test]
    fn test_rate_for_distance_monotonic() {
        for client in [ClientType::Existing, ClientType::New] {
            let mut previous = Decimal::ZERO;
            for km in (0..=600).step_by(5) {
                let tier = rate_for_distance(Decimal::from(km), client);
                assert!(tier.rate >= previous, "km {km} client {client}");
                assert!(table_for(client).tiers.contains(tier));
                previous = tier.rate;
            }
        }
    }

    #[test]
    fn test_displacement_cost_new_client_above_100() {
        let cost = displacement_cost(&disp(KmOption::Above100, 120), ClientType::New);
        assert_eq!(cost, Decimal::new(30840, 2));
    }

    #[test]
    fn test_displacement_cost_per_km_rounds_half_up() {
        let d = Displacement {
            km_option: KmOption::Above100,
            km_total: Decimal::new(1005, 1), // 100.5 km × 2.57 = 258.285
            vehicle_id: None,
        };
        assert_eq!(displacement_cost(&d, ClientType::New), Decimal::new(25829, 2));
    }

    #[test]
    fn test_displacement_cost_flat_fees() {
        assert_eq!(
            displacement_cost(&disp(KmOption::UpTo50, 0), ClientType::Existing),
            EXISTING_CLIENT_TABLE.flat_fee_up_to_50
        );
        assert_eq!(
            displacement_cost(&disp(KmOption::UpTo100, 999), ClientType::New),
            NEW_CLIENT_TABLE.flat_fee_up_to_100
        );
        assert_eq!(
            displacement_cost(&disp(KmOption::None, 80), ClientType::New),
            Decimal::ZERO
        );
        assert_eq!(
            displacement_cost(&disp(KmOption::Above100, -30), ClientType::New),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_total_displacement_km() {
        let displacements = vec![
            disp(KmOption::None, 300),
            disp(KmOption::UpTo50, 0),
            disp(KmOption::UpTo100, 0),
            disp(KmOption::Above100, 120),
            disp(KmOption::Above100, -10),
        ];
        assert_eq!(total_displacement_km(&displacements), Decimal::from(270));
        assert_eq!(total_displacement_km(&[]), Decimal::ZERO);
    }
}
