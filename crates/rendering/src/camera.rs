use bevy::prelude::*;

/// Fixed camera rig: the camera sits on a sphere around a ground focus point
/// and looks at it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraRig {
    /// Ground point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 60.0_f32.to_radians(),
            distance: 34.0,
        }
    }
}

impl CameraRig {
    pub fn eye(&self) -> Vec3 {
        // Spherical to cartesian offset from focus
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.focus + Vec3::new(x, y, z)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }

    /// Screen-space axis (x right, y down) rotated by the current yaw onto the
    /// ground plane. Not normalized.
    pub fn ground_direction(&self, axis: Vec2) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(
            axis.x * cos_yaw + axis.y * sin_yaw,
            0.0,
            -axis.x * sin_yaw + axis.y * cos_yaw,
        )
    }
}

pub fn setup_camera(mut commands: Commands) {
    let rig = CameraRig::default();
    commands.spawn((Camera3d::default(), rig.transform()));
    commands.insert_resource(rig);
}

/// Keeps the camera on the rig if something replaces the resource.
pub fn apply_camera_rig(rig: Res<CameraRig>, mut query: Query<&mut Transform, With<Camera3d>>) {
    if !rig.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = rig.transform();
}
