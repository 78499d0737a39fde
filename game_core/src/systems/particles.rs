use crate::params::Params;
use crate::{GameRng, Particle};
use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

/// Trail colours
pub const PARTICLE_PALETTE: [[u8; 3]; 6] = [
    [0xFF, 0xD7, 0x00],
    [0xFF, 0x8C, 0x00],
    [0xFF, 0x45, 0x00],
    [0xDA, 0x70, 0xD6],
    [0x8A, 0x2B, 0xE2],
    [0x4B, 0x00, 0x82],
];

/// Spawn one trail particle at `origin`, evicting the oldest particles first
/// if the pool is already at `cap`.
pub fn emit_particle(world: &mut World, origin: Vec2, seq: u64, cap: usize, rng: &mut GameRng) {
    if cap == 0 {
        return;
    }

    let count = world.query::<&Particle>().iter().count();
    if count >= cap {
        let mut by_age: Vec<(u64, Entity)> = world
            .query::<&Particle>()
            .iter()
            .map(|(entity, p)| (p.seq, entity))
            .collect();
        by_age.sort_unstable_by_key(|(seq, _)| *seq);
        for (_, entity) in by_age.into_iter().take(count + 1 - cap) {
            let _ = world.despawn(entity);
        }
    }

    let drift = Params::PARTICLE_DRIFT;
    let particle = Particle {
        pos: origin,
        vel: Vec2::new(
            (rng.0.gen::<f32>() - 0.5) * drift,
            (rng.0.gen::<f32>() - 0.5) * drift,
        ),
        radius: rng
            .0
            .gen_range(Params::PARTICLE_MIN_RADIUS..Params::PARTICLE_MAX_RADIUS),
        alpha: 1.0,
        color: PARTICLE_PALETTE[rng.0.gen_range(0..PARTICLE_PALETTE.len())],
        seq,
    };
    world.spawn((particle,));
}

/// Advance every particle and fade it; particles whose alpha reaches zero
/// are removed in the same pass. Returns how many were removed.
pub fn update_particles(world: &mut World) -> usize {
    let mut expired = Vec::new();
    for (entity, particle) in world.query_mut::<&mut Particle>() {
        particle.pos += particle.vel;
        particle.alpha -= Params::PARTICLE_ALPHA_DECAY;
        if particle.alpha <= 0.0 {
            expired.push(entity);
        }
    }

    for entity in &expired {
        let _ = world.despawn(*entity);
    }
    expired.len()
}

pub fn particle_count(world: &World) -> usize {
    world.query::<&Particle>().iter().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitted_particle_starts_opaque_and_small() {
        let mut world = World::new();
        let mut rng = GameRng::new(3);
        emit_particle(&mut world, Vec2::new(10.0, 20.0), 0, 16, &mut rng);

        let (_e, p) = world.query_mut::<&Particle>().into_iter().next().unwrap();
        assert_eq!(p.pos, Vec2::new(10.0, 20.0));
        assert_eq!(p.alpha, 1.0);
        assert!(p.radius >= 1.0 && p.radius < 4.0);
        assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
        assert!(PARTICLE_PALETTE.contains(&p.color));
    }

    #[test]
    fn test_particles_expire_after_fading_out() {
        let mut world = World::new();
        let mut rng = GameRng::new(3);
        emit_particle(&mut world, Vec2::ZERO, 0, 16, &mut rng);

        // 1.0 / 0.03 -> gone on the 34th update
        for _ in 0..33 {
            assert_eq!(update_particles(&mut world), 0);
        }
        assert_eq!(update_particles(&mut world), 1);
        assert_eq!(particle_count(&world), 0);
    }

    #[test]
    fn test_pool_never_grows_without_emission() {
        let mut world = World::new();
        let mut rng = GameRng::new(11);
        for seq in 0..20 {
            emit_particle(&mut world, Vec2::ZERO, seq, 64, &mut rng);
            update_particles(&mut world);
        }

        let mut last = particle_count(&world);
        for _ in 0..40 {
            update_particles(&mut world);
            let now = particle_count(&world);
            assert!(now <= last);
            last = now;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn test_full_pool_evicts_oldest() {
        let mut world = World::new();
        let mut rng = GameRng::new(5);
        for seq in 0..6 {
            emit_particle(&mut world, Vec2::ZERO, seq, 4, &mut rng);
        }

        let mut seqs: Vec<u64> = world
            .query::<&Particle>()
            .iter()
            .map(|(_e, p)| p.seq)
            .collect();
        seqs.sort_unstable();
        assert_eq!(seqs, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_cap_emits_nothing() {
        let mut world = World::new();
        let mut rng = GameRng::new(5);
        emit_particle(&mut world, Vec2::ZERO, 0, 0, &mut rng);
        assert_eq!(particle_count(&world), 0);
    }
}
