use bevy::prelude::*;

use simulation::SimulationUpdateSet;

pub mod camera;
pub mod egui_input_guard;
pub mod picking;
pub mod scene;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (camera::setup_camera, setup_lighting, scene::spawn_ground)
                .chain()
                .after(simulation::world_init::init_world),
        )
        .add_systems(
            Update,
            picking::handle_world_click.in_set(SimulationUpdateSet::Input),
        )
        .add_systems(
            Update,
            (
                camera::apply_camera_rig,
                scene::attach_building_meshes,
                scene::attach_agent_meshes,
                scene::animate_agent_bodies,
            )
                .in_set(SimulationUpdateSet::Visual),
        );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}
