//! Primitive meshes for the ground, buildings and agents.
//!
//! Meshes are attached to simulation entities when they appear; the
//! simulation owns their transforms.

use bevy::prelude::*;

use simulation::buildings::Building;
use simulation::collection::{AgentAnimation, Collector, Player};
use simulation::config::WORLD_HALF_EXTENT;

const AGENT_RADIUS: f32 = 0.3;
const AGENT_HEIGHT: f32 = 1.0;
/// Capsule center above the agent's feet.
const AGENT_BODY_Y: f32 = AGENT_RADIUS + AGENT_HEIGHT * 0.5;
const BOB_AMPLITUDE: f32 = 0.05;
const BOB_RATE: f32 = 12.0;
/// Vertical squash while the pickup is running.
const PICKUP_SQUASH: f32 = 0.85;

/// Mesh child of an agent, animated from its [`AgentAnimation`].
#[derive(Component)]
pub struct AgentBody;

/// Base color for a building by the resource it produces.
pub fn resource_color(resource_name: &str) -> Color {
    match resource_name {
        "Железо" => Color::srgb(0.45, 0.5, 0.6),
        "Дерево" => Color::srgb(0.55, 0.35, 0.2),
        "Камень" => Color::srgb(0.7, 0.7, 0.68),
        _ => Color::srgb(0.6, 0.4, 0.7),
    }
}

pub fn spawn_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let size = WORLD_HALF_EXTENT * 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(size, size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.32, 0.45, 0.28),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
    ));
}

pub fn attach_building_meshes(
    mut commands: Commands,
    buildings: Query<(Entity, &Building), Added<Building>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, building) in &buildings {
        let size = building.half_extents * 2.0;
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: resource_color(&building.resource_name),
                ..default()
            })),
            Visibility::default(),
        ));
    }
}

pub fn attach_agent_meshes(
    mut commands: Commands,
    agents: Query<Entity, Added<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for entity in &agents {
        let body = meshes.add(Capsule3d::new(AGENT_RADIUS, AGENT_HEIGHT));
        let nose = meshes.add(Cuboid::new(0.15, 0.15, 0.3));
        let body_material = materials.add(Color::srgb(0.9, 0.75, 0.3));
        let nose_material = materials.add(Color::srgb(0.2, 0.2, 0.25));

        commands
            .entity(entity)
            .insert(Visibility::default())
            .with_children(|parent| {
                parent
                    .spawn((
                        AgentBody,
                        Mesh3d(body),
                        MeshMaterial3d(body_material),
                        Transform::from_xyz(0.0, AGENT_BODY_Y, 0.0),
                    ))
                    .with_children(|body| {
                        // Points along local -Z so facing is visible.
                        body.spawn((
                            Mesh3d(nose),
                            MeshMaterial3d(nose_material),
                            Transform::from_xyz(0.0, 0.3, -AGENT_RADIUS),
                        ));
                    });
            });
    }
}

/// Bob while walking, squash while picking up.
pub fn animate_agent_bodies(
    time: Res<Time>,
    agents: Query<(&AgentAnimation, &Collector, &Children)>,
    mut bodies: Query<&mut Transform, With<AgentBody>>,
) {
    let phase = time.elapsed_secs() * BOB_RATE;
    for (animation, collector, children) in &agents {
        let y = if animation.moving {
            AGENT_BODY_Y + BOB_AMPLITUDE * phase.sin()
        } else {
            AGENT_BODY_Y
        };
        let squash = if collector.is_busy() { PICKUP_SQUASH } else { 1.0 };
        for &child in children.iter() {
            if let Ok(mut transform) = bodies.get_mut(child) {
                transform.translation.y = y;
                transform.scale = Vec3::new(1.0, squash, 1.0);
            }
        }
    }
}
