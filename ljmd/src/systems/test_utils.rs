use crate::Vector3D;
use super::{Particle, ParticleSet};

pub fn test_particles(name: &str) -> ParticleSet {
    let particles = match name {
        "pair" => get_pair(),
        "argon" => get_argon(),
        "mixture" => get_mixture(),
        "lattice" => get_lattice(),
        _ => panic!("unknown test particles {}", name)
    };

    return ParticleSet::from_particles(particles).expect("invalid test particles");
}

/// Two particles in the attractive part of the potential with `sigma = 1`
fn get_pair() -> Vec<Particle> {
    vec![
        Particle::new(0, Vector3D::new(1.0, 1.0, 1.0), Vector3D::zero()),
        Particle::new(0, Vector3D::new(2.5, 1.0, 1.0), Vector3D::zero()),
    ]
}

/// Small disordered cluster, with some particles interacting across the borders of a
/// cubic cell of side 5
fn get_argon() -> Vec<Particle> {
    let positions = [
        [0.2, 0.3, 0.1],
        [1.4, 0.5, 0.3],
        [0.6, 1.6, 0.4],
        [3.9, 0.4, 0.2],
        [1.1, 1.2, 1.5],
        [2.5, 2.4, 2.6],
        [3.6, 2.9, 1.9],
        [0.4, 4.1, 3.9],
    ];

    let velocities = [
        [0.1, -0.2, 0.05],
        [-0.3, 0.1, 0.0],
        [0.0, 0.25, -0.1],
        [0.2, 0.0, 0.1],
        [-0.05, -0.05, 0.2],
        [0.15, 0.1, -0.2],
        [-0.1, 0.3, 0.0],
        [0.0, -0.1, -0.15],
    ];

    positions.iter().zip(&velocities).map(|(&position, &velocity)| {
        Particle::new(18, position.into(), velocity.into())
    }).collect()
}

/// Two types of particles, with type `1` and `6`
fn get_mixture() -> Vec<Particle> {
    vec![
        Particle::new(6, Vector3D::new(1.0, 1.0, 1.0), Vector3D::zero()),
        Particle::new(1, Vector3D::new(2.1, 1.2, 0.9), Vector3D::zero()),
        Particle::new(1, Vector3D::new(0.2, 2.0, 1.3), Vector3D::zero()),
        Particle::new(6, Vector3D::new(2.0, 2.4, 2.2), Vector3D::zero()),
        Particle::new(1, Vector3D::new(3.1, 3.0, 2.5), Vector3D::zero()),
    ]
}

/// Simple cubic lattice with 27 particles and spacing 1.1, filling a periodic
/// cubic cell of side 3.3
fn get_lattice() -> Vec<Particle> {
    let mut particles = Vec::new();
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                let position = Vector3D::new(0.55 + 1.1 * i as f64, 0.55 + 1.1 * j as f64, 0.55 + 1.1 * k as f64);
                particles.push(Particle::new(0, position, Vector3D::zero()));
            }
        }
    }
    return particles;
}
