use rand::RngExt;

pub const DEFAULT_NOTIFICATION_COUNT: usize = 3;

/// Number of UAV slots a notification may name when it isn't tied to the
/// displayed fleet.
pub const NOTIFICATION_UAV_POOL: usize = 5;

/// Produces `count` status-change messages, each naming a UAV drawn
/// uniformly from `UAV-1..=UAV-{pool}`. A zero pool falls back to
/// [`NOTIFICATION_UAV_POOL`].
pub fn sample_notifications<R: RngExt>(rng: &mut R, count: usize, pool: usize) -> Vec<String> {
    let pool = if pool == 0 { NOTIFICATION_UAV_POOL } else { pool };
    (1..=count)
        .map(|i| {
            let k = rng.random_range(1..=pool);
            format!("Notification {i}: UAV-{k} has changed status.")
        })
        .collect()
}

pub fn sample_notifications_default(count: usize) -> Vec<String> {
    sample_notifications(&mut rand::rng(), count, NOTIFICATION_UAV_POOL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Returns (position, uav index) if `msg` has the expected shape.
    fn parse(msg: &str) -> Option<(usize, usize)> {
        let rest = msg.strip_prefix("Notification ")?;
        let (pos, rest) = rest.split_once(": UAV-")?;
        let uav = rest.strip_suffix(" has changed status.")?;
        Some((pos.parse().ok()?, uav.parse().ok()?))
    }

    #[test]
    fn messages_follow_the_format() {
        let mut rng = StdRng::seed_from_u64(11);
        for m in [0, 1, 3, 25] {
            let msgs = sample_notifications(&mut rng, m, NOTIFICATION_UAV_POOL);
            assert_eq!(msgs.len(), m);
            for (i, msg) in msgs.iter().enumerate() {
                let (pos, k) = parse(msg).expect(msg);
                assert_eq!(pos, i + 1);
                assert!((1..=NOTIFICATION_UAV_POOL).contains(&k), "{msg}");
            }
        }
    }

    #[test]
    fn every_pool_index_is_reachable() {
        let mut rng = StdRng::seed_from_u64(5);
        let msgs = sample_notifications(&mut rng, 400, NOTIFICATION_UAV_POOL);
        for k in 1..=NOTIFICATION_UAV_POOL {
            assert!(msgs.iter().any(|m| parse(m).map(|(_, u)| u) == Some(k)));
        }
    }

    #[test]
    fn custom_pool_limits_referenced_uavs() {
        let mut rng = StdRng::seed_from_u64(8);
        for msg in sample_notifications(&mut rng, 100, 2) {
            let (_, k) = parse(&msg).unwrap();
            assert!(k == 1 || k == 2, "{msg}");
        }
    }

    #[test]
    fn zero_pool_uses_default() {
        let mut rng = StdRng::seed_from_u64(2);
        for msg in sample_notifications(&mut rng, 50, 0) {
            let (_, k) = parse(&msg).unwrap();
            assert!((1..=NOTIFICATION_UAV_POOL).contains(&k));
        }
    }

    #[test]
    fn repeated_calls_stay_valid() {
        let a = sample_notifications_default(DEFAULT_NOTIFICATION_COUNT);
        let b = sample_notifications_default(DEFAULT_NOTIFICATION_COUNT);
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
        assert!(a.iter().chain(b.iter()).all(|m| parse(m).is_some()));
    }
}
