use nalgebra::Isometry3;

use super::{Device, GeometryObject};

/// Which of the two per-joint geometry sets a scoped object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InOut {
    /// Geometries rigidly attached to the joint's own body.
    Inner,
    /// Geometries of other bodies checked against the inner set.
    Outer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box { size: [f64; 3] },
    Cylinder { radius: f64, length: f64 },
    Capsule { radius: f64, length: f64 },
    Sphere { radius: f64 },
    Mesh { filename: String, scale: [f64; 3] },
}

// A collision object is addressed either directly in the global
// geometry index space, or through a joint's inner/outer table.
#[derive(Debug, Clone, Copy)]
enum Binding {
    Global(usize),
    Scoped {
        joint_index: usize,
        rank: usize,
        in_out: InOut,
    },
}

/// Transient handle to one collision geometry of a device.
///
/// Built fresh by every view access, never cached. Scoped handles
/// resolve their global index through the live membership tables, so
/// a handle observes the device as it currently is.
#[derive(Debug, Clone, Copy)]
pub struct CollisionObject<'a> {
    device: &'a Device,
    binding: Binding,
}

impl<'a> CollisionObject<'a> {
    pub(crate) fn new(device: &'a Device, index: usize) -> Self {
        debug_assert!(index < device.ngeoms());
        Self {
            device,
            binding: Binding::Global(index),
        }
    }

    pub(crate) fn scoped(
        device: &'a Device,
        joint_index: usize,
        rank: usize,
        in_out: InOut,
    ) -> Self {
        debug_assert!(joint_index < device.njoints());
        Self {
            device,
            binding: Binding::Scoped {
                joint_index,
                rank,
                in_out,
            },
        }
    }

    /// Index in the global geometry space.
    pub fn index(&self) -> usize {
        match self.binding {
            Binding::Global(index) => index,
            Binding::Scoped {
                joint_index,
                rank,
                in_out,
            } => {
                let table = match in_out {
                    InOut::Inner => &self.device.geom_model.inner,
                    InOut::Outer => &self.device.geom_model.outer,
                };
                table[joint_index][rank]
            }
        }
    }

    pub fn name(&self) -> &'a str {
        &self.geom().name
    }

    /// Internal index of the joint whose body carries this geometry.
    pub fn joint_index(&self) -> usize {
        self.geom().parent_joint
    }

    /// Geometry frame expressed in the parent joint frame.
    pub fn placement_in_joint(&self) -> &'a Isometry3<f64> {
        &self.geom().placement
    }

    pub fn shape(&self) -> &'a Shape {
        &self.geom().shape
    }

    fn geom(&self) -> &'a GeometryObject {
        &self.device.geom_model.objects[self.index()]
    }
}

// Two handles refer to the same element iff they resolve to the same
// geometry of the same device, whichever way they were obtained.
impl PartialEq for CollisionObject<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.device, other.device) && self.index() == other.index()
    }
}

impl Eq for CollisionObject<'_> {}
