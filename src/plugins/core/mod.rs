//! Core plugin: shared resources, fixed timestep and physics.
//!
//! Must be registered before anything that reads `Tunables` at build time.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::input::ActionBindings;
use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let tunables = app
        .world()
        .get_resource::<Tunables>()
        .cloned()
        .unwrap_or_default();

    app.insert_resource(Time::<Fixed>::from_hz(tunables.fixed_hz));
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    app.init_resource::<ActionBindings>();
    app.init_resource::<GameRng>();

    // World geometry is only ever queried, never simulated against.
    app.add_plugins(PhysicsPlugins::default().with_length_unit(tunables.pixels_per_meter));
    app.insert_resource(Gravity(Vec2::ZERO));

    app.insert_resource(tunables);
}
