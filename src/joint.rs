use nalgebra::Isometry3;

use super::object_vector::ObjectVector;
use super::{Device, InOut, JointModel, JointType};

/// Transient handle to one joint of a device, in the model's internal
/// numbering (1..njoints; index 0 is the universe and is never handed
/// out).
#[derive(Debug, Clone, Copy)]
pub struct Joint<'a> {
    device: &'a Device,
    index: usize,
}

impl<'a> Joint<'a> {
    pub(crate) fn new(device: &'a Device, index: usize) -> Self {
        debug_assert!(index >= 1);
        debug_assert!(index < device.njoints());
        Self { device, index }
    }

    /// Index in the model numbering.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'a str {
        &self.model().name
    }

    pub fn joint_type(&self) -> JointType {
        self.model().joint_type
    }

    /// Internal index of the parent joint (0 for joints under the
    /// universe).
    pub fn parent_index(&self) -> usize {
        self.model().parent
    }

    /// Joint frame expressed in the parent joint frame.
    pub fn placement_in_parent(&self) -> &'a Isometry3<f64> {
        &self.model().placement
    }

    pub fn position_bounds(&self) -> (f64, f64) {
        self.model().position_bounds
    }

    /// Link rigidly attached to this joint.
    pub fn child_link(&self) -> &'a str {
        &self.model().child_link
    }

    /// Geometries carried by this joint's body.
    pub fn inner_objects(&self) -> ObjectVector<'a> {
        ObjectVector::new(self.device, self.index, InOut::Inner)
    }

    /// Geometries of other bodies checked against this joint's inner
    /// set.
    pub fn outer_objects(&self) -> ObjectVector<'a> {
        ObjectVector::new(self.device, self.index, InOut::Outer)
    }

    fn model(&self) -> &'a JointModel {
        &self.device.model.joints[self.index]
    }
}

impl PartialEq for Joint<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.device, other.device) && self.index == other.index
    }
}

impl Eq for Joint<'_> {}

/// Mutable counterpart of [`Joint`], obtained through
/// [`JointVectorMut`](crate::JointVectorMut). At most one can be live
/// at a time.
#[derive(Debug)]
pub struct JointMut<'a> {
    device: &'a mut Device,
    index: usize,
}

impl<'a> JointMut<'a> {
    pub(crate) fn new(device: &'a mut Device, index: usize) -> Self {
        debug_assert!(index >= 1);
        debug_assert!(index < device.njoints());
        Self { device, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.model().name
    }

    pub fn position_bounds(&self) -> (f64, f64) {
        self.model().position_bounds
    }

    pub fn set_position_bounds(&mut self, lower: f64, upper: f64) {
        self.model_mut().position_bounds = (lower, upper);
    }

    fn model(&self) -> &JointModel {
        &self.device.model.joints[self.index]
    }

    fn model_mut(&mut self) -> &mut JointModel {
        &mut self.device.model.joints[self.index]
    }
}
