use nalgebra::Isometry3;
use thiserror::Error;

mod bfs;
mod joint;
mod object;
mod object_vector;
mod urdf;
mod utils;

pub use joint::{Joint, JointMut};
pub use object::{CollisionObject, InOut, Shape};
pub use object_vector::{DeviceObjectVector, JointVector, JointVectorMut, ObjectVector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointType {
    Revolute,
    Continuous,
    Prismatic,
    Fixed,
    Floating,
    Planar,
    Spherical,
}

#[derive(Debug)]
pub struct JointModel {
    pub name: String,
    pub joint_type: JointType,

    // internal index of the parent joint
    pub parent: usize,

    // joint frame expressed in the parent joint frame
    pub placement: Isometry3<f64>,

    pub position_bounds: (f64, f64),

    // link rigidly attached to (moved by) this joint
    pub child_link: String,
}

#[derive(Debug)]
pub struct Model {
    // rigid body tree, joints[0] is the fixed universe joint
    pub joints: Vec<JointModel>,
}

impl Model {
    pub fn njoints(&self) -> usize {
        self.joints.len()
    }
}

#[derive(Debug)]
pub struct GeometryObject {
    pub name: String,

    // internal index of the joint whose body carries this geometry
    pub parent_joint: usize,

    // geometry frame expressed in the parent joint frame
    pub placement: Isometry3<f64>,

    pub shape: Shape,
}

#[derive(Debug)]
pub struct GeomModel {
    // global geometry index space: 0..ngeoms
    pub objects: Vec<GeometryObject>,

    // per-joint membership tables of global geometry indices,
    // both of length njoints
    pub inner: Vec<Vec<usize>>,
    pub outer: Vec<Vec<usize>>,
}

impl GeomModel {
    pub fn ngeoms(&self) -> usize {
        self.objects.len()
    }
}

#[derive(Debug)]
pub struct Device {
    pub name: String,
    pub model: Model,
    pub geom_model: GeomModel,
}

impl Device {
    /// Number of joints in the model numbering, universe included.
    pub fn njoints(&self) -> usize {
        self.model.njoints()
    }

    /// Total number of collision geometries.
    pub fn ngeoms(&self) -> usize {
        self.geom_model.ngeoms()
    }

    pub fn inner_object_count(&self, joint_index: usize) -> usize {
        self.geom_model.inner[joint_index].len()
    }

    pub fn outer_object_count(&self, joint_index: usize) -> usize {
        self.geom_model.outer[joint_index].len()
    }

    /// View over every collision geometry of the device.
    pub fn objects(&self) -> DeviceObjectVector<'_> {
        DeviceObjectVector::new(self)
    }

    /// View over the inner or outer geometries of one joint
    /// (internal numbering).
    pub fn joint_objects(&self, joint_index: usize, in_out: InOut) -> ObjectVector<'_> {
        ObjectVector::new(self, joint_index, in_out)
    }

    /// View over every joint except the universe.
    pub fn joints(&self) -> JointVector<'_> {
        JointVector::new(self)
    }

    pub fn joints_mut(&mut self) -> JointVectorMut<'_> {
        JointVectorMut::new(self)
    }
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to read urdf file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse urdf")]
    Parse(#[from] urdf_rs::UrdfError),

    #[error("model has no root link")]
    MissingRoot,

    #[error("`{0}` is not a urdf file")]
    NotUrdf(String),
}
