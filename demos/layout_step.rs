// demos/layout_step.rs
//
// Runs a few repulsion-only layout steps over random bodies and prints how the layout spreads.
// Set RUST_LOG=debug to see the tree builds.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rs_quadtree::models::{Body2, Vector2};
use rs_quadtree::quadtree::QuadTree2;
use rs_quadtree::utils::{QuadTreeError, QuadTreeSettings};

const BODY_COUNT: usize = 2_000;
const STEPS: usize = 20;
const TIME_STEP: f64 = 0.5;
const DRAG: f64 = 0.9;

fn main() -> Result<(), QuadTreeError> {
    env_logger::init();

    let mut rng = ChaCha8Rng::seed_from_u64(2015);
    let mut bodies: Vec<Body2> = (0..BODY_COUNT)
        .map(|_| Body2::new(Vector2::new([rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0)])))
        .collect();

    let settings = QuadTreeSettings::new(Some(-1.2), Some(0.8), None);
    let mut tree = QuadTree2::with_settings(settings)?;

    for step in 0..STEPS {
        for body in bodies.iter_mut() {
            body.reset_force();
        }

        tree.insert_bodies(&mut bodies)?;
        tree.accumulate_forces(&mut bodies);

        for body in bodies.iter_mut() {
            let acceleration = body.force * (1.0 / body.mass);
            body.velocity = (body.velocity + acceleration * TIME_STEP) * DRAG;
            body.prev_position = body.position;
            body.position += body.velocity * TIME_STEP;
        }

        let stats = tree.stats();
        let width = tree.root_node().map_or(0.0, |root| root.width());
        println!(
            "step {:>2}: width={:>10.3} nodes={:>5} pool={:>5}",
            step, width, stats.node_count, stats.pool_capacity
        );
    }

    Ok(())
}
