//! Seating circle: nearest living neighbors

use crate::core::Player;

/// The other seats of an `n`-seat circle, in walking order from `seat`
///
/// Yields `n - 1` seats and never `seat` itself.
pub fn circle_order(n: usize, seat: usize, clockwise: bool) -> impl Iterator<Item = usize> {
    let start = if n == 0 { 0 } else { seat % n };
    (1..n).map(move |step| if clockwise { (start + step) % n } else { (start + n - step) % n })
}

/// Walk the circle from `seat` and return the first living player's seat
///
/// The start seat itself is never returned and each other seat is looked at
/// once; `None` means nobody else is alive (or the roster is empty).
pub fn next_living_neighbor(players: &[Player], seat: usize, clockwise: bool) -> Option<usize> {
    circle_order(players.len(), seat, clockwise).find(|&other| players[other].is_alive)
}

/// Both living neighbors of a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    pub clockwise: usize,
    pub counter_clockwise: usize,
}

impl Neighbors {
    /// `None` unless some other living player exists
    pub fn of(players: &[Player], seat: usize) -> Option<Self> {
        Some(Neighbors {
            clockwise: next_living_neighbor(players, seat, true)?,
            counter_clockwise: next_living_neighbor(players, seat, false)?,
        })
    }

    /// True when both directions reach the same player (two alive)
    pub fn is_single(&self) -> bool {
        self.clockwise == self.counter_clockwise
    }

    /// Distinct neighbor seats
    pub fn seats(&self) -> impl Iterator<Item = usize> {
        let second = (!self.is_single()).then_some(self.counter_clockwise);
        std::iter::once(self.clockwise).chain(second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn circle(alive: &[bool]) -> Vec<Player> {
        alive
            .iter()
            .enumerate()
            .map(|(i, &is_alive)| {
                let mut p = Player::new(PlayerId::new(i as u32 + 1), format!("P{}", i + 1));
                p.is_alive = is_alive;
                p
            })
            .collect()
    }

    #[test]
    fn test_neighbors_wrap_around() {
        let players = circle(&[true, true, true, true, true]);
        assert_eq!(next_living_neighbor(&players, 0, true), Some(1));
        assert_eq!(next_living_neighbor(&players, 0, false), Some(4));
        assert_eq!(next_living_neighbor(&players, 4, true), Some(0));
    }

    #[test]
    fn test_skips_dead_players() {
        let players = circle(&[true, false, false, true, false]);
        assert_eq!(next_living_neighbor(&players, 0, true), Some(3));
        assert_eq!(next_living_neighbor(&players, 0, false), Some(3));
    }

    #[test]
    fn test_never_returns_start_seat() {
        for n in 1..=15 {
            for dead_mask in 0u32..(1 << n.min(6)) {
                let alive: Vec<bool> = (0..n).map(|i| i >= 6 || dead_mask & (1 << i) == 0).collect();
                let players = circle(&alive);
                for seat in 0..n {
                    for clockwise in [true, false] {
                        if let Some(found) = next_living_neighbor(&players, seat, clockwise) {
                            assert_ne!(found, seat);
                            assert!(players[found].is_alive);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_other_living_player() {
        let players = circle(&[true, false, false]);
        assert_eq!(next_living_neighbor(&players, 0, true), None);
        assert!(Neighbors::of(&players, 0).is_none());
        assert_eq!(next_living_neighbor(&[], 0, true), None);
    }

    #[test]
    fn test_circle_order_visits_each_other_seat_once() {
        assert_eq!(circle_order(5, 3, true).collect::<Vec<_>>(), vec![4, 0, 1, 2]);
        assert_eq!(circle_order(5, 3, false).collect::<Vec<_>>(), vec![2, 1, 0, 4]);
        assert_eq!(circle_order(1, 0, true).count(), 0);
        assert_eq!(circle_order(0, 0, false).count(), 0);

        for n in 1..=15 {
            for seat in 0..n {
                let order: Vec<usize> = circle_order(n, seat, false).collect();
                assert_eq!(order.len(), n - 1);
                let mut sorted = order.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), n - 1);
                assert!(!order.contains(&seat));
            }
        }
    }

    #[test]
    fn test_lone_survivor_terminates() {
        for n in 1..=15 {
            for seat in 0..n {
                let alive: Vec<bool> = (0..n).map(|i| i == seat).collect();
                let players = circle(&alive);
                assert_eq!(next_living_neighbor(&players, seat, true), None);
                assert_eq!(next_living_neighbor(&players, seat, false), None);
            }
        }
    }

    #[test]
    fn test_farthest_neighbor_found_on_last_seat() {
        // Only the seat just behind the start is alive: the clockwise walk
        // reaches it last
        for n in 2..=15 {
            let mut alive = vec![false; n];
            alive[0] = true;
            alive[n - 1] = true;
            let players = circle(&alive);
            assert_eq!(next_living_neighbor(&players, 0, true), Some(n - 1));
            assert_eq!(next_living_neighbor(&players, 0, false), Some(n - 1));
            assert_eq!(circle_order(n, 0, true).last(), Some(n - 1));
        }
    }

    #[test]
    fn test_two_alive_share_neighbor() {
        let players = circle(&[true, false, true, false]);
        let neighbors = Neighbors::of(&players, 0).unwrap();
        assert!(neighbors.is_single());
        assert_eq!(neighbors.seats().collect::<Vec<_>>(), vec![2]);
    }
}
