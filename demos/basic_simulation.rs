//! Basic physics simulation example
//!
//! A crate falls onto a static floor under gravity.

use gridphy::prelude::*;

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    println!("GridPhy - Basic Simulation Example");
    println!("==================================\n");

    let mut world = World::new(WorldConfig::default())?;

    // Static floor slab, top surface at Y=0.5
    let _floor = world.add_body(
        RigidBody::new()
            .with_shape(ShapeKind::Aabb)
            .with_half_extents(Vec3::new(10.0, 0.5, 10.0))
            .with_restitution(0.0),
    );
    println!("Created floor at Y=0 (top surface at Y=0.5)");

    // Dynamic box dropped from above
    let falling = world.add_body(
        RigidBody::new()
            .with_mass(1.0)
            .with_position(Vec3::new(0.0, 5.0, 0.0))
            .with_shape(ShapeKind::Aabb)
            .with_half_extents(Vec3::splat(0.5))
            .with_restitution(0.0),
    );
    println!("Created box at Y=5.0 (half-extent=0.5)\n");

    let dt = world.config().fixed_dt;
    let total_time = 3.0;
    let steps = (total_time / dt) as usize;

    println!(
        "Simulating {} seconds ({} steps at {}Hz)...\n",
        total_time,
        steps,
        1.0 / dt
    );

    for i in 0..steps {
        world.advance(dt);

        // Print position every 30 frames (0.5 seconds)
        if i % 30 == 0 {
            if let Some(body) = world.body(falling) {
                println!(
                    "t={:.2}s: position=({:.3}, {:.3}, {:.3}), velocity=({:.3}, {:.3}, {:.3})",
                    i as f32 * dt,
                    body.position.x,
                    body.position.y,
                    body.position.z,
                    body.velocity.x,
                    body.velocity.y,
                    body.velocity.z
                );
            }
        }
    }

    if let Some(body) = world.body(falling) {
        println!(
            "\nFinal box position: ({:.3}, {:.3}, {:.3})",
            body.position.x, body.position.y, body.position.z
        );
    }
    println!("Expected resting position: ~(0, 1.0, 0) (floor top at 0.5 + half-extent 0.5)");

    Ok(())
}
