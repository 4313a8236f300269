//! Proximity and overlap tests between the player and world objects

use glam::Vec2;

use super::order::Order;
use super::stations::{Station, Stations};
use crate::consts::*;

/// Circle vs axis-aligned box centered at `center`
pub fn circle_rect_overlap(circle: Vec2, radius: f32, center: Vec2, half_extents: Vec2) -> bool {
    let closest = circle.clamp(center - half_extents, center + half_extents);
    circle.distance_squared(closest) <= radius * radius
}

/// Player circle touches the order's box
pub fn player_overlaps_order(player_pos: Vec2, order: &Order) -> bool {
    circle_rect_overlap(
        player_pos,
        PLAYER_RADIUS,
        order.pos(),
        Vec2::new(ORDER_WIDTH, ORDER_HEIGHT) / 2.0,
    )
}

/// Closest station within reach, locked or not
pub fn nearest_station(player_pos: Vec2, stations: &Stations) -> Option<&Station> {
    stations
        .iter()
        .map(|s| (s, s.pos.distance(player_pos)))
        .filter(|(_, d)| *d <= STATION_REACH)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(s, _)| s)
}

/// Indices of orders the player is touching, front-most (largest x) first
pub fn overlapping_orders(player_pos: Vec2, orders: &[Order]) -> Vec<usize> {
    let mut hits: Vec<usize> = orders
        .iter()
        .enumerate()
        .filter(|(_, o)| player_overlaps_order(player_pos, o))
        .map(|(i, _)| i)
        .collect();
    hits.sort_by(|&a, &b| {
        orders[b]
            .x
            .partial_cmp(&orders[a].x)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits
}

pub fn power_up_pad_pos() -> Vec2 {
    Vec2::new(POWER_UP_PAD_X, POWER_UP_PAD_Y)
}

pub fn near_power_up_pad(player_pos: Vec2) -> bool {
    player_pos.distance(power_up_pad_pos()) <= POWER_UP_PAD_REACH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::UnlockRecord;
    use crate::sim::edit::EditType;

    #[test]
    fn test_circle_rect_overlap() {
        let half = Vec2::new(10.0, 5.0);
        assert!(circle_rect_overlap(Vec2::ZERO, 1.0, Vec2::ZERO, half));
        assert!(circle_rect_overlap(Vec2::new(14.0, 0.0), 4.0, Vec2::ZERO, half));
        assert!(!circle_rect_overlap(Vec2::new(14.1, 0.0), 4.0, Vec2::ZERO, half));
        // Corner: distance to (10,5) from (13,9) is 5
        assert!(!circle_rect_overlap(Vec2::new(13.0, 9.0), 4.9, Vec2::ZERO, half));
        assert!(circle_rect_overlap(Vec2::new(13.0, 9.0), 5.0, Vec2::ZERO, half));
    }

    #[test]
    fn test_nearest_station_within_reach() {
        let stations = Stations::from_record(&UnlockRecord::first_station_only());
        let discount = stations.get(EditType::Discount).pos;
        let hit = nearest_station(discount + Vec2::new(10.0, 20.0), &stations);
        assert_eq!(hit.map(|s| s.edit), Some(EditType::Discount));
        assert!(nearest_station(Vec2::new(640.0, 400.0), &stations).is_none());
    }

    #[test]
    fn test_overlapping_orders_front_first() {
        let orders = vec![
            Order::new(1, vec![EditType::Address], 500.0),
            Order::new(2, vec![EditType::Address], 540.0),
            Order::new(3, vec![EditType::Address], 900.0),
        ];
        let hits = overlapping_orders(Vec2::new(520.0, CONVEYOR_Y), &orders);
        assert_eq!(hits, vec![1, 0]);
    }

    #[test]
    fn test_power_up_pad_reach() {
        assert!(near_power_up_pad(power_up_pad_pos() + Vec2::new(0.0, 50.0)));
        assert!(!near_power_up_pad(Vec2::new(PLAYER_START_X, PLAYER_START_Y)));
    }
}
