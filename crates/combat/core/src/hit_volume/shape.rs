use glam::{Quat, Vec3};

/// Position and orientation in world space. Forward is `+Z`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Rotation turning `+Z` toward `direction`; `None` for a zero vector.
    pub fn facing(direction: Vec3) -> Option<Quat> {
        let direction = direction.try_normalize()?;
        Some(Quat::from_rotation_arc(Vec3::Z, direction))
    }
}

/// Collider attached to a hit volume.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColliderShape {
    Sphere { radius: f32 },
    Box { half_extents: [f32; 3] },
}

impl ColliderShape {
    /// Whether this shape, placed at `pose`, touches a sphere.
    pub fn overlaps_sphere(&self, pose: &Pose, center: Vec3, radius: f32) -> bool {
        match *self {
            Self::Sphere { radius: own } => {
                let reach = own + radius;
                pose.position.distance_squared(center) <= reach * reach
            }
            Self::Box { half_extents } => {
                let half = Vec3::from_array(half_extents);
                let local = pose.rotation.inverse() * (center - pose.position);
                let closest = local.clamp(-half, half);
                local.distance_squared(closest) <= radius * radius
            }
        }
    }
}
